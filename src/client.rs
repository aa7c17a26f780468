use graphql_parser::query::parse_query;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    GraphQLRequest, OperationKind,
    config::{ClientConfig, CompileOptions},
    envelope,
    error::{Error, Result},
    query_compiler::QueryCompiler,
    shape::GraphQLShape,
    transport::{HttpTransport, Transport},
    variables::Variables,
};

/// Compiles typed operations, sends them and decodes the answer into the
/// same type.
pub struct Client {
    transport: Arc<dyn Transport + Send + Sync>,
    compiler: QueryCompiler,
    validate_queries: bool,
}

impl Client {
    pub fn new(transport: Box<dyn Transport + Send + Sync>) -> Self {
        Client {
            transport: Arc::from(transport),
            compiler: QueryCompiler::new(),
            validate_queries: false,
        }
    }

    /// HTTP client for the configured endpoint.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Client::new(Box::new(transport))
            .with_options(config.compile.clone())
            .validate_queries(config.validate_queries))
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.compiler = QueryCompiler::with_options(options);
        self
    }

    /// Parse each compiled operation before it is sent.
    pub fn validate_queries(mut self, enabled: bool) -> Self {
        self.validate_queries = enabled;
        self
    }

    /// Compiles the operation for `T` without sending it.
    pub fn compile<T: GraphQLShape + ?Sized>(
        &self,
        kind: OperationKind,
        name: &str,
        variables: &Variables,
    ) -> Result<String> {
        let query = self.compiler.compile::<T>(variables, kind, name)?;
        if self.validate_queries {
            parse_query::<String>(&query).map_err(|e| Error::InvalidQuery(e.to_string()))?;
        }
        Ok(query)
    }

    pub async fn query<T>(&self, variables: &Variables) -> Result<T>
    where
        T: GraphQLShape + DeserializeOwned,
    {
        self.run(OperationKind::Query, "", variables).await
    }

    pub async fn named_query<T>(&self, name: &str, variables: &Variables) -> Result<T>
    where
        T: GraphQLShape + DeserializeOwned,
    {
        self.run(OperationKind::Query, name, variables).await
    }

    pub async fn mutate<T>(&self, variables: &Variables) -> Result<T>
    where
        T: GraphQLShape + DeserializeOwned,
    {
        self.run(OperationKind::Mutation, "", variables).await
    }

    pub async fn named_mutate<T>(&self, name: &str, variables: &Variables) -> Result<T>
    where
        T: GraphQLShape + DeserializeOwned,
    {
        self.run(OperationKind::Mutation, name, variables).await
    }

    async fn run<T>(&self, kind: OperationKind, name: &str, variables: &Variables) -> Result<T>
    where
        T: GraphQLShape + DeserializeOwned,
    {
        let query = self.compile::<T>(kind, name, variables)?;
        let request = GraphQLRequest {
            query,
            variables: (!variables.is_empty()).then(|| variables.to_json()),
            operation_name: (!name.is_empty()).then(|| name.to_string()),
        };
        debug!(%kind, name, variables = variables.len(), "executing operation");

        let body = self.transport.execute(&request).await?;
        let result = envelope::decode(&body);
        if let Err(Error::Response(errors)) = &result {
            warn!(%kind, name, count = errors.len(), "server returned errors");
        }
        result
    }
}
