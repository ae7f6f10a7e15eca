use super::Error;

/// Error when a model declares more than one primary-key field.
#[derive(Debug)]
pub(super) struct DuplicatePrimaryKeyError {
    model: Box<str>,
    field: Box<str>,
}

impl std::error::Error for DuplicatePrimaryKeyError {}

impl core::fmt::Display for DuplicatePrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "duplicate primary key for field: {} (model: {})",
            self.field, self.model
        )
    }
}

impl Error {
    /// Creates a duplicate primary key error for `field` of `model`.
    pub fn duplicate_primary_key(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicatePrimaryKey(
            DuplicatePrimaryKeyError {
                model: model.into().into(),
                field: field.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a duplicate primary key error.
    pub fn is_duplicate_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicatePrimaryKey(_))
    }
}
