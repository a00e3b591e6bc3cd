//! Errors returned by `ApiClient` resource methods

use thiserror::Error;

use super::policy::Operation;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside the operation's accepted set
    #[error("Invalid response code {code} for {operation} ({endpoint})")]
    InvalidResponseCode {
        operation: Operation,
        code: u16,
        endpoint: String,
    },

    /// A required parameter was not supplied; no request was sent
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The HTTP exchange itself failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}
