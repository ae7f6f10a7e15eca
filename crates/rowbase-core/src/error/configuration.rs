use super::Error;

/// Error when connection options are incomplete or inconsistent.
///
/// This occurs when:
/// - A required option (`user`, `password`, `db`) is missing
/// - Pool bounds are inconsistent (`minsize > maxsize`, `maxsize == 0`)
/// - A connection URL cannot be interpreted
///
/// These errors surface at startup, before any connection is attempted.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid configuration: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
