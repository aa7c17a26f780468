use tracing::trace;

use crate::OperationKind;
use crate::config::CompileOptions;
use crate::envelope;
use crate::error::{Error, Result};
use crate::shape::{FieldName, GraphQLShape, RecordShape, TypeShape};
use crate::variables::{Variables, query_arguments};

/// Turns selection shapes into minified operation text.
///
/// The compiler holds only its options; compiling is pure and may run
/// concurrently from any number of callers.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    options: CompileOptions,
}

impl QueryCompiler {
    pub fn new() -> Self {
        QueryCompiler::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        QueryCompiler { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles the operation selecting `T`.
    pub fn compile<T: GraphQLShape + ?Sized>(
        &self,
        variables: &Variables,
        kind: OperationKind,
        name: &str,
    ) -> Result<String> {
        self.compile_shape(&T::shape(), variables, kind, name)
    }

    pub fn compile_shape(
        &self,
        shape: &TypeShape,
        variables: &Variables,
        kind: OperationKind,
        name: &str,
    ) -> Result<String> {
        let body = self.selection(shape)?;
        let header = if variables.is_empty() {
            None
        } else {
            Some(query_arguments(
                variables,
                kind == OperationKind::Mutation,
                &self.options,
            )?)
        };
        let text = envelope::construct(kind, name, header.as_deref(), &body, &self.options);
        trace!(%kind, name, query = %text, "compiled operation");
        Ok(text)
    }

    /// Renders the selection set of the root record, e.g. `{foo,barBaz}`.
    pub fn selection(&self, shape: &TypeShape) -> Result<String> {
        let TypeShape::Record(root) = shape.element() else {
            return Err(Error::InvalidShape(
                "root of a selection must be a record".to_string(),
            ));
        };
        let mut buf = String::new();
        self.write_selection_set(&mut buf, root, None, 0)?;
        Ok(buf)
    }

    fn write_selection_set(
        &self,
        w: &mut String,
        record: &RecordShape,
        inverse: Option<&str>,
        depth: usize,
    ) -> Result<()> {
        w.push('{');
        let mut first = true;
        self.write_fields(w, record, inverse, &mut first, depth)?;
        w.push('}');
        Ok(())
    }

    /// Writes the fields of `record` into the current selection set.
    /// `first` is shared with inlined records so separators stay correct
    /// across the splice.
    fn write_fields(
        &self,
        w: &mut String,
        record: &RecordShape,
        inverse: Option<&str>,
        first: &mut bool,
        depth: usize,
    ) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(Error::InvalidShape(format!(
                "selection under {} nests deeper than {} levels",
                record.type_name(),
                self.options.max_depth
            )));
        }

        for field in record.fields() {
            let name = match field.resolved_name() {
                FieldName::Omitted => continue,
                FieldName::Name(name) => name,
            };
            if inverse == Some(name.as_str()) {
                // Back-reference to the parent: don't recurse.
                continue;
            }

            let shape = field.shape();
            let child = match shape.element() {
                TypeShape::Record(child) => Some(child),
                _ => None,
            };

            if field.is_inlined() {
                let child = child.ok_or_else(|| {
                    Error::InvalidShape(format!(
                        "embedded field {} of {} is not a record",
                        field.ident(),
                        record.type_name()
                    ))
                })?;
                if field.argument_suffix().is_some() {
                    return Err(Error::InvalidShape(format!(
                        "inlined field {} of {} cannot take arguments",
                        field.ident(),
                        record.type_name()
                    )));
                }
                // Spliced fields are guarded only by the embedded field's
                // own inverse name, never by the enclosing level's.
                self.write_fields(w, child, field.inverse_name(), first, depth + 1)?;
                continue;
            }

            if !*first {
                w.push(',');
            }
            *first = false;
            w.push_str(&name);
            if let Some(arguments) = field.argument_suffix() {
                w.push_str(arguments);
            }
            if let Some(child) = child {
                self.write_selection_set(w, child, field.inverse_name(), depth + 1)?;
            }
        }
        Ok(())
    }
}

/// Compiles `shape` with default options.
pub fn compile(
    shape: &TypeShape,
    variables: &Variables,
    kind: OperationKind,
    name: &str,
) -> Result<String> {
    QueryCompiler::new().compile_shape(shape, variables, kind, name)
}
