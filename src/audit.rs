// Audit log module: an append-only record of submission outcomes. Each
// append opens the file, writes one timestamped line and closes it again,
// so no handle is held across the retry loop's sleeps.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only audit log, one `[<timestamp>] <message>` record per line.
/// The file is created on first write and never read back or rotated.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a log handle for `path`. Nothing is opened until the first
    /// [`append`](AuditLog::append).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the log is written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single record. A log that cannot be written must never fail
    /// the submission it describes, so errors are reported as a warning and
    /// dropped.
    pub fn append(&self, message: &str) {
        if let Err(err) = self.try_append(message) {
            log::warn!("could not write to {}: {err}", self.path.display());
        }
    }

    fn try_append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let stamp = Local::now().format("%a %b %e %H:%M:%S %Y");
        // One write per record keeps lines whole even if another handle is
        // appending to the same file.
        file.write_all(format!("[{stamp}] {message}\n").as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir) -> AuditLog {
        AuditLog::new(dir.path().join("report.log"))
    }

    fn lines(log: &AuditLog) -> Vec<String> {
        fs::read_to_string(log.path())
            .expect("log file should exist")
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn it_creates_the_file_on_first_append() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        assert!(!log.path().exists());
        log.append("Reported account successfully");
        assert!(log.path().exists());
    }

    #[test]
    fn it_appends_exactly_one_line_per_call() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append("Failed to report account");
        log.append("Retrying...");
        let lines = lines(&log);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Failed to report account"));
        assert!(lines[1].ends_with("Retrying..."));
    }

    #[test]
    fn it_prefixes_records_with_a_ctime_style_timestamp() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append("Reported account successfully");
        let line = lines(&log).remove(0);
        let (stamp, message) = line
            .strip_prefix('[')
            .and_then(|rest| rest.split_once("] "))
            .expect("line should look like '[<timestamp>] <message>'");
        assert_eq!(message, "Reported account successfully");
        NaiveDateTime::parse_from_str(stamp, "%a %b %e %H:%M:%S %Y")
            .expect("timestamp should be ctime-formatted");
    }

    #[test]
    fn it_swallows_an_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("no-such-dir").join("report.log"));
        // Must not panic or propagate; the submission goes on without a log.
        log.append("Request error");
        assert!(!log.path().exists());
    }
}
