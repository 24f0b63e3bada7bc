//! Result printing: one JSON object per command in `--json` mode, prose otherwise.

use crate::cli::json_mode;

/// Unix time in milliseconds, stamped on every JSON result.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn emit(value: serde_json::Value, human: impl FnOnce()) {
    if json_mode() {
        println!("{value}");
    } else {
        human();
    }
}
