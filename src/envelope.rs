use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::OperationKind;
use crate::config::CompileOptions;
use crate::error::{Error, Result};

/// Wraps a selection body into a complete operation.
///
/// Forms, for keyword `k`:
/// - with variables: `k name(header)body`, `k (header)body` when anonymous
/// - named: `k name body`
/// - anonymous: `k body`, or the bare body for kinds configured so
pub fn construct(
    kind: OperationKind,
    name: &str,
    header: Option<&str>,
    body: &str,
    options: &CompileOptions,
) -> String {
    let keyword = kind.keyword();
    match header {
        Some(header) => format!("{} {}({}){}", keyword, name, header, body),
        None if !name.is_empty() => format!("{} {}{}", keyword, name, body),
        None if bare_when_anonymous(kind, options) => body.to_string(),
        None => format!("{}{}", keyword, body),
    }
}

fn bare_when_anonymous(kind: OperationKind, options: &CompileOptions) -> bool {
    match kind {
        OperationKind::Query => options.bare_anonymous_query,
        OperationKind::Subscription => options.bare_anonymous_subscription,
        // Mutations always carry their keyword.
        OperationKind::Mutation => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One entry of a response's `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Response envelope as returned by the server.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// Server errors take precedence over any partial data.
    pub fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(Error::Response(errors));
        }
        self.data.ok_or_else(|| {
            Error::Decode(serde::de::Error::custom("response contains no data"))
        })
    }
}

/// Decodes a raw response body into the shape `T` the operation selected.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let response: GraphQLResponse<T> = serde_json::from_slice(body)?;
    response.into_result()
}
