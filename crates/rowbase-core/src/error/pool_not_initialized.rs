use super::Error;

/// Error when a statement is issued before the connection pool was
/// initialized, or after it was closed.
#[derive(Debug)]
pub(super) struct PoolNotInitializedError;

impl std::error::Error for PoolNotInitializedError {}

impl core::fmt::Display for PoolNotInitializedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("connection pool is not initialized")
    }
}

impl Error {
    /// Creates a pool not initialized error.
    pub fn pool_not_initialized() -> Error {
        Error::from(super::ErrorKind::PoolNotInitialized(PoolNotInitializedError))
    }

    /// Returns `true` if this error is a pool not initialized error.
    pub fn is_pool_not_initialized(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PoolNotInitialized(_))
    }
}
