use http::StatusCode;
use thiserror::Error;

use crate::envelope::GraphQLError;

/// Errors raised while compiling, sending or decoding an operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The selection shape is not record-like where a record is required.
    #[error("invalid query shape: {0}")]
    InvalidShape(String),

    /// A variable's type cannot be written as a GraphQL type signature.
    /// `name` is the offending type name.
    #[error("unsupported variable type {name:?}: {reason}")]
    UnsupportedVariableType { name: String, reason: String },

    /// A variable value could not be serialized into the request payload.
    #[error("failed to encode variable ${name}: {source}")]
    VariableEncode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response body could not be decoded into the requested shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a non-empty `errors` list.
    #[error("server returned {} error(s): {}", .0.len(), join_messages(.0))]
    Response(Vec<GraphQLError>),

    /// The compiled operation failed client-side syntax validation.
    #[error("compiled operation is not valid GraphQL: {0}")]
    InvalidQuery(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("non-success status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
