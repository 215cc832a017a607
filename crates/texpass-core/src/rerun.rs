//! Rerun detection
//!
//! LaTeX resolves cross-references across passes and says so in its log
//! when the current output is stale.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::working_area::LOG_FILE;

/// Log substring asking for another pass, as in
/// `Label(s) may have changed. Rerun to get cross-references right.`
pub const RERUN_MARKER: &str = "Rerun to get";

/// Check whether the log in `working_area` asks for another pass
///
/// An unreadable or missing log counts as "no": running too few passes is
/// recoverable, looping or failing is not.
pub fn needs_rerun(working_area: &Path) -> bool {
    let path = working_area.join(LOG_FILE);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("Cannot open {}: {}", path.display(), e);
            return false;
        }
    };
    log_requests_rerun(BufReader::new(file))
}

/// Scan a log line by line for [`RERUN_MARKER`]
///
/// Lines are matched lossily; TeX logs are not guaranteed to be UTF-8.
pub fn log_requests_rerun<R: BufRead>(mut reader: R) -> bool {
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return false,
            Ok(_) => {
                if String::from_utf8_lossy(&line).contains(RERUN_MARKER) {
                    return true;
                }
            }
            Err(e) => {
                log::debug!("Stopped scanning log: {}", e);
                return false;
            }
        }
    }
}
