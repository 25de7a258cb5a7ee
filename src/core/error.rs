use serde::Serialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    WorkdirUnresolvable,
    DirectoryUnreadable,

    FileReadFailed,
    FileWriteFailed,
    FileRenameFailed,

    ConfigInvalidValue,

    InternalIoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::WorkdirUnresolvable => "workdir.unresolvable",
            ErrorCode::DirectoryUnreadable => "directory.unreadable",

            ErrorCode::FileReadFailed => "file.read_failed",
            ErrorCode::FileWriteFailed => "file.write_failed",
            ErrorCode::FileRenameFailed => "file.rename_failed",

            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::InternalIoError => "internal.io_error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathIoDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameDetails {
    pub from: String,
    pub to: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn workdir_unresolvable(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::WorkdirUnresolvable,
            "Could not resolve the current working directory",
            serde_json::json!({ "error": error.into() }),
        )
        .with_hint("Run the command from a directory that still exists")
    }

    pub fn directory_unreadable(path: &Path, error: impl Into<String>) -> Self {
        Self::path_io(
            ErrorCode::DirectoryUnreadable,
            "Could not read directory",
            path,
            error,
        )
        .with_hint("Check that the directory exists and is readable")
    }

    pub fn file_read_failed(path: &Path, error: impl Into<String>) -> Self {
        Self::path_io(ErrorCode::FileReadFailed, "Failed to read file", path, error)
    }

    pub fn file_write_failed(path: &Path, error: impl Into<String>) -> Self {
        Self::path_io(ErrorCode::FileWriteFailed, "Failed to write file", path, error)
    }

    pub fn file_rename_failed(from: &Path, to: &Path, error: impl Into<String>) -> Self {
        let details = to_details(RenameDetails {
            from: from.display().to_string(),
            to: to.display().to_string(),
            error: error.into(),
        });
        Self::new(ErrorCode::FileRenameFailed, "Failed to rename file", details)
    }

    fn path_io(code: ErrorCode, message: &str, path: &Path, error: impl Into<String>) -> Self {
        let details = to_details(PathIoDetails {
            path: path.display().to_string(),
            error: error.into(),
        });
        Self::new(code, message, details)
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// Whether this error aborts the whole run rather than a single entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self.code,
            ErrorCode::FileReadFailed | ErrorCode::FileWriteFailed | ErrorCode::FileRenameFailed
        )
    }

    /// The underlying error text stored in `details`, if any.
    pub fn cause_text(&self) -> Option<&str> {
        self.details.get("error").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_dotted_names() {
        assert_eq!(ErrorCode::WorkdirUnresolvable.as_str(), "workdir.unresolvable");
        assert_eq!(ErrorCode::FileRenameFailed.as_str(), "file.rename_failed");
    }

    #[test]
    fn per_file_errors_are_not_fatal() {
        let path = Path::new("/tmp/locked.bin");
        assert!(!Error::file_read_failed(path, "denied").is_fatal());
        assert!(!Error::file_write_failed(path, "denied").is_fatal());
        assert!(!Error::file_rename_failed(path, Path::new("/tmp/x"), "denied").is_fatal());
    }

    #[test]
    fn directory_errors_are_fatal() {
        assert!(Error::workdir_unresolvable("gone").is_fatal());
        assert!(Error::directory_unreadable(Path::new("/nope"), "denied").is_fatal());
        assert!(Error::config_invalid_value("target", None, "bad").is_fatal());
    }

    #[test]
    fn details_carry_path_and_cause() {
        let err = Error::file_read_failed(Path::new("/tmp/locked.bin"), "Permission denied");
        assert_eq!(err.details["path"], "/tmp/locked.bin");
        assert_eq!(err.cause_text(), Some("Permission denied"));
    }

    #[test]
    fn rename_details_name_both_paths() {
        let err = Error::file_rename_failed(
            Path::new("/tmp/note_DRAFT.txt"),
            Path::new("/tmp/note_.txt"),
            "exists",
        );
        assert_eq!(err.details["from"], "/tmp/note_DRAFT.txt");
        assert_eq!(err.details["to"], "/tmp/note_.txt");
    }

    #[test]
    fn hints_accumulate() {
        let err = Error::workdir_unresolvable("gone").with_hint("second");
        assert_eq!(err.hints.len(), 2);
        assert_eq!(err.hints[1].message, "second");
    }
}
