use super::Error;

/// Error when a model is used with a database handle it was not registered on.
#[derive(Debug)]
pub(super) struct ModelNotRegisteredError {
    model: Box<str>,
}

impl std::error::Error for ModelNotRegisteredError {}

impl core::fmt::Display for ModelNotRegisteredError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model `{}` is not registered", self.model)
    }
}

impl Error {
    /// Creates a model not registered error.
    pub fn model_not_registered(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelNotRegistered(ModelNotRegisteredError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a model not registered error.
    pub fn is_model_not_registered(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelNotRegistered(_))
    }
}
