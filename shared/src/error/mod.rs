//! Error codes and response bodies shared between server and clients
//!
//! - [`ErrorCode`]: standardized error codes, each mapped to an HTTP status
//! - [`ErrorBody`]: the JSON body of every error response

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ErrorBody, MessageBody};
