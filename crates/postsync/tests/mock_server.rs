//! Mock hosted search index for integration tests.
//!
//! Implements just enough of the provider API: object upsert keyed by
//! objectID, an index listing for credential checks, and per-object
//! failure injection so tests can exercise the continue-on-error policy.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use warp::Filter;
use warp::http::StatusCode;

pub const TEST_APPLICATION_ID: &str = "TESTAPP";
pub const TEST_API_KEY: &str = "test-api-key";

/// In-memory mock of the hosted search index.
pub struct MockIndexServer {
    saved: Arc<Mutex<HashMap<String, Value>>>,
    rejected: Arc<Mutex<HashSet<String>>>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockIndexServer {
    pub fn new() -> Self {
        MockIndexServer {
            saved: Arc::new(Mutex::new(HashMap::new())),
            rejected: Arc::new(Mutex::new(HashSet::new())),
            shutdown: None,
        }
    }

    /// Reject upserts of the given objectID with HTTP 500.
    pub async fn reject_object(&self, object_id: &str) {
        self.rejected.lock().await.insert(object_id.to_string());
    }

    /// Snapshot of everything the index currently holds, by objectID.
    pub async fn saved_objects(&self) -> HashMap<String, Value> {
        self.saved.lock().await.clone()
    }

    /// Start the server on an ephemeral port and return its base URL.
    pub async fn start(&mut self) -> String {
        let saved = self.saved.clone();
        let rejected = self.rejected.clone();

        // PUT /1/indexes/:index/:objectID - upsert one record
        let save = warp::path!("1" / "indexes" / String / String)
            .and(warp::put())
            .and(warp::header::<String>("x-algolia-api-key"))
            .and(warp::body::json())
            .and_then(
                move |_index: String, object_id: String, api_key: String, body: Value| {
                    let saved = saved.clone();
                    let rejected = rejected.clone();
                    async move {
                        // The client percent-encodes ids; decode is a no-op
                        // if the framework already did it.
                        let object_id = urlencoding::decode(&object_id)
                            .map(|c| c.into_owned())
                            .unwrap_or(object_id);

                        if api_key != TEST_API_KEY {
                            return Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(
                                    &serde_json::json!({"message": "Invalid API key"}),
                                ),
                                StatusCode::FORBIDDEN,
                            ));
                        }

                        if rejected.lock().await.contains(&object_id) {
                            return Ok(warp::reply::with_status(
                                warp::reply::json(
                                    &serde_json::json!({"message": "Index unavailable"}),
                                ),
                                StatusCode::INTERNAL_SERVER_ERROR,
                            ));
                        }

                        saved.lock().await.insert(object_id.clone(), body);
                        Ok(warp::reply::with_status(
                            warp::reply::json(&serde_json::json!({
                                "updatedAt": "2026-08-07T00:00:00.000Z",
                                "taskID": 1,
                                "objectID": object_id,
                            })),
                            StatusCode::OK,
                        ))
                    }
                },
            );

        // GET /1/indexes - credential check
        let list = warp::path!("1" / "indexes")
            .and(warp::get())
            .and(warp::header::<String>("x-algolia-api-key"))
            .map(|api_key: String| {
                if api_key == TEST_API_KEY {
                    warp::reply::with_status(
                        warp::reply::json(&serde_json::json!({"items": []})),
                        StatusCode::OK,
                    )
                } else {
                    warp::reply::with_status(
                        warp::reply::json(&serde_json::json!({"message": "Invalid API key"})),
                        StatusCode::FORBIDDEN,
                    )
                }
            });

        let routes = save.or(list);

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let (addr, server) =
            warp::serve(routes).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
                rx.await.ok();
            });
        tokio::spawn(server);

        self.shutdown = Some(tx);
        format!("http://{}", addr)
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
