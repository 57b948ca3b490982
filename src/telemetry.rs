//! Optional JSON trace log so status and title decisions can be inspected after a run.

use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::fmt::time::UtcTime;

const TRACE_LOG_ENV: &str = "TABSTRIP_TRACE_LOG";
const TRACE_LOG_FILE: &str = "tabstrip_trace.jsonl";

/// Set on the first enabled call; holds whether the file sink became global.
static SUBSCRIBER: OnceLock<bool> = OnceLock::new();

/// `$TABSTRIP_TRACE_LOG` when set and non-empty, else `tabstrip_trace.jsonl`
/// in the temp dir.
#[must_use]
pub fn tracing_log_path() -> PathBuf {
    trace_path(env::var_os(TRACE_LOG_ENV))
}

fn trace_path(configured: Option<OsString>) -> PathBuf {
    match configured {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => env::temp_dir().join(TRACE_LOG_FILE),
    }
}

/// Append JSON lines to `path` from the process-wide subscriber. Returns
/// false when the file cannot be opened or a subscriber is already set.
fn install(path: &Path) -> bool {
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .with_current_span(false)
        .with_span_list(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Install the trace subscriber when `enabled`. Only the first enabled call
/// does any work.
pub fn init_tracing(enabled: bool) {
    if enabled {
        SUBSCRIBER.get_or_init(|| install(&tracing_log_path()));
    }
}
