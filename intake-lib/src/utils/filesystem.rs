use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::ERRORS_LOG_FILE;
use crate::utils::get_utc_iso_datetime;

/// Centralized function to write error messages to the errors log file
///
/// # Arguments
/// * `error_type` - A description of the error type/category (e.g., "Candidate Upload Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(error_type: &str, error_message: &str) {
    write_error_to_log_at(Path::new(ERRORS_LOG_FILE), error_type, error_message);
}

/// Same as [`write_error_to_log`] but against an explicit log file.
pub fn write_error_to_log_at(log_path: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    // An unwritable log file is ignored
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(log_path) {
        let _ = writeln!(file, "{}", log_entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_to_log_appends_entries() {
        let log_path = std::env::temp_dir().join(format!(
            "intake-lib-errors-{}-{}.log",
            std::process::id(),
            get_utc_iso_datetime().replace(':', "-")
        ));

        write_error_to_log_at(&log_path, "Candidate Upload Error", "first failure");
        write_error_to_log_at(&log_path, "Candidate Upload Error", "second failure");

        let content = std::fs::read_to_string(&log_path).unwrap();
        let _ = std::fs::remove_file(&log_path);

        assert!(content.contains("Candidate Upload Error:\nfirst failure"));
        assert!(content.contains("second failure"));
        assert!(content.find("first failure") < content.find("second failure"));
    }
}
