use super::Error;

/// Error when a model declares no primary-key field.
#[derive(Debug)]
pub(super) struct MissingPrimaryKeyError {
    model: Box<str>,
}

impl std::error::Error for MissingPrimaryKeyError {}

impl core::fmt::Display for MissingPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "primary key not found (model: {})", self.model)
    }
}

impl Error {
    /// Creates a missing primary key error for `model`.
    pub fn missing_primary_key(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKeyError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
