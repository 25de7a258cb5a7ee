//! CLI console output and exit code mapping.
//!
//! Prints the completion line on stdout and fatal errors on stderr.

use dirscrub::{Error, ErrorCode, Result, SanitizeReport};
use std::io::{self, Write};

/// Completion line for a finished run, naming any entries that failed.
pub fn completion_message(report: &SanitizeReport) -> String {
    let s = &report.summary;
    let mut message = format!(
        "Sanitized {}: {} files rewritten, {} renamed, {} failed",
        report.directory, s.rewritten, s.renamed, s.failed
    );

    let failed: Vec<&str> = report.failures().map(|e| e.name.as_str()).collect();
    if !failed.is_empty() {
        message.push_str(&format!(" ({})", failed.join(", ")));
    }
    message
}

pub fn print_completion(report: &SanitizeReport) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", completion_message(report)) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

/// Fatal error text, one line for the message plus one per hint.
pub fn error_lines(err: &Error) -> Vec<String> {
    let mut lines = vec![match err.cause_text() {
        Some(cause) => format!("Error: {} ({})", err.message, cause),
        None => format!("Error: {}", err.message),
    }];
    lines.extend(err.hints.iter().map(|h| format!("Hint: {}", h.message)));
    lines
}

pub fn print_error(err: &Error) {
    for line in error_lines(err) {
        eprintln!("{}", line);
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidValue => 2,

        ErrorCode::WorkdirUnresolvable | ErrorCode::DirectoryUnreadable => 3,

        ErrorCode::FileReadFailed
        | ErrorCode::FileWriteFailed
        | ErrorCode::FileRenameFailed
        | ErrorCode::InternalIoError => 1,
    }
}
