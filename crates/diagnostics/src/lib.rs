//! Lightweight logging facade for the postsync workspace.
//!
//! Log output is off by default so the tool stays quiet when it runs as a
//! site generator's post-build hook. Set POSTSYNC_LOG to enable it:
//!
//! - POSTSYNC_LOG=off (default) - no logs
//! - POSTSYNC_LOG=info - per-run operation logs
//! - POSTSYNC_LOG=debug - per-file diagnostic logs

use std::sync::Once;

// Re-export emit so the macros can refer to it from other crates.
pub use emit;

static INIT: Once = Once::new();

/// Initialize diagnostics from the POSTSYNC_LOG environment variable.
///
/// Call once at startup. Safe to call again; later calls are no-ops.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var("POSTSYNC_LOG").unwrap_or_else(|_| "off".to_string());

        let min_level = match log_level.as_str() {
            "off" => return,
            "debug" => emit::Level::Debug,
            "info" => emit::Level::Info,
            "warn" => emit::Level::Warn,
            "error" => emit::Level::Error,
            other => {
                eprintln!("Warning: unknown POSTSYNC_LOG value '{}', using 'info'", other);
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min_level))
            .init();

        // The runtime must outlive the process; there is no shutdown path
        // from a Once-guarded init.
        std::mem::forget(rt);
    });
}

// Re-export emit's logging macros directly. Wrapping them in `macro_rules`
// breaks emit's template capture: the identifiers emit generates for holes
// like `{discovered}` pick up the wrapper's macro hygiene instead of the
// call site's, so local variables become invisible. A plain re-export keeps
// the `diagnostics::{info,debug,warn,error}!` names and level semantics while
// preserving call-site hygiene.

/// Log normal operations: run started, post indexed, summary counts.
pub use emit::info;

/// Log per-file detail: paths discovered, records built, request URLs.
pub use emit::debug;

/// Log recoverable conditions: a post skipped, a publish rejected.
pub use emit::warn;

/// Log failures that end a run: config errors, fail-fast aborts.
pub use emit::error;
