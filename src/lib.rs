pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod ident;
pub mod query_compiler;
pub mod scalar;
pub mod shape;
pub mod transport;
pub mod variables;

pub use client::Client;
pub use config::{ClientConfig, CompileOptions};
pub use envelope::{GraphQLError, GraphQLResponse, decode};
pub use error::{Error, Result};
pub use query_compiler::{QueryCompiler, compile};
pub use scalar::{
    GqlBool, GqlFloat64, GqlId, GqlInt64, GqlPoint, GqlString, GqlTime, Id, Nullable,
};
pub use shape::{FieldShape, GraphQLShape, RecordShape, TypeShape};
pub use transport::{HttpTransport, Transport};
pub use variables::{InputType, ScalarKind, Variable, VariableType, Variables};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// JSON body posted to a GraphQL endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
    #[serde(
        rename = "operationName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        GraphQLRequest {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }
}
