use thiserror::Error;

/// Outcome code of the most recent store operation.
///
/// Every public operation on [`ConfigStore`](crate::ConfigStore) records its
/// outcome here before returning: the failure kind on error, `None` on
/// success. A missing key on a read or delete is a negative-but-valid result,
/// not a failure, and also records `None`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    #[default]
    #[error("no error")]
    None,

    #[error("filesystem initialization failed")]
    FsInitFailed,

    #[error("config store not running")]
    FsNotRunning,

    #[error("config store already running")]
    FsAlreadyRunning,

    #[error("failed to open configuration file")]
    FileOpenFailed,

    #[error("failed to write configuration file")]
    FileWriteFailed,

    #[error("failed to create configuration file")]
    FileCreateFailed,

    #[error("JSON parsing failed")]
    JsonParseFailed,

    #[error("JSON serialization failed")]
    JsonSerializeFailed,

    #[error("configuration file size limit too small")]
    FileSizeTooSmall,

    #[error("configuration file size limit too large")]
    FileSizeTooLarge,
}

impl ErrorKind {
    /// Stable numeric code, for callers that report errors over a wire or
    /// a display too small for the message string.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::None => 0,
            ErrorKind::FsInitFailed => 1,
            ErrorKind::FsNotRunning => 2,
            ErrorKind::FsAlreadyRunning => 3,
            ErrorKind::FileOpenFailed => 4,
            ErrorKind::FileWriteFailed => 5,
            ErrorKind::FileCreateFailed => 6,
            ErrorKind::JsonParseFailed => 7,
            ErrorKind::JsonSerializeFailed => 8,
            ErrorKind::FileSizeTooSmall => 9,
            ErrorKind::FileSizeTooLarge => 10,
        }
    }

    /// True when this kind reports an actual failure.
    pub fn is_error(self) -> bool {
        self != ErrorKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            ErrorKind::None,
            ErrorKind::FsInitFailed,
            ErrorKind::FsNotRunning,
            ErrorKind::FsAlreadyRunning,
            ErrorKind::FileOpenFailed,
            ErrorKind::FileWriteFailed,
            ErrorKind::FileCreateFailed,
            ErrorKind::JsonParseFailed,
            ErrorKind::JsonSerializeFailed,
            ErrorKind::FileSizeTooSmall,
            ErrorKind::FileSizeTooLarge,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn none_is_not_an_error() {
        assert!(!ErrorKind::None.is_error());
        assert!(ErrorKind::FileOpenFailed.is_error());
        assert_eq!(ErrorKind::default(), ErrorKind::None);
    }

    #[test]
    fn messages_render() {
        assert_eq!(ErrorKind::None.to_string(), "no error");
        assert_eq!(
            ErrorKind::JsonParseFailed.to_string(),
            "JSON parsing failed"
        );
    }
}
