use super::Error;

/// Error when a `limit` is neither a row count nor an `(offset, count)` pair.
#[derive(Debug)]
pub(super) struct InvalidLimitError {
    value: Box<str>,
}

impl std::error::Error for InvalidLimitError {}

impl core::fmt::Display for InvalidLimitError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid limit value: {}", self.value)
    }
}

impl Error {
    /// Creates an invalid limit error; `value` is a rendering of the rejected limit.
    pub fn invalid_limit(value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidLimit(InvalidLimitError {
            value: value.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid limit error.
    pub fn is_invalid_limit(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidLimit(_))
    }
}
