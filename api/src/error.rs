use cvs_client::ClassifiedError;
use cvs_client::session::StoreError;
use thiserror::Error;

/// Failure of a typed API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed after classification and retries.
    #[error(transparent)]
    Request(#[from] ClassifiedError),

    /// The call succeeded but the local credential store could not be updated.
    #[error("credential store: {0}")]
    Credentials(#[from] StoreError),
}

impl ApiError {
    /// The classified request failure, if that is what this is.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            ApiError::Request(err) => Some(err),
            ApiError::Credentials(_) => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
