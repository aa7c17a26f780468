//! Operation variables and their GraphQL type signatures.
//!
//! The static type of each variable value decides the signature written
//! into the operation header, e.g. `Vec<IssueState>` → `[IssueState!]!`.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::config::CompileOptions;
use crate::error::{Error, Result};
use crate::scalar::Id;

/// Nullable scalar wrappers with a fixed entry in the type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Float64,
    Int64,
    String,
    Time,
    Id,
}

impl ScalarKind {
    /// Type table entry. Several entries already end in `!`.
    pub fn table_name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "Boolean",
            ScalarKind::Float64 => "Float!",
            ScalarKind::Int64 => "Int!",
            ScalarKind::String => "String!",
            ScalarKind::Time => "DateTime!",
            ScalarKind::Id => "ID",
        }
    }

    /// Table entry without its embedded required marker.
    pub fn base_name(self) -> &'static str {
        self.table_name().trim_end_matches('!')
    }
}

/// Static type of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableType {
    Scalar(ScalarKind),
    /// Enum, input object or built-in scalar, written by name.
    Named(String),
    List(Box<VariableType>),
    Optional(Box<VariableType>),
}

impl VariableType {
    pub fn named(name: impl Into<String>) -> Self {
        VariableType::Named(name.into())
    }

    pub fn list(element: VariableType) -> Self {
        VariableType::List(Box::new(element))
    }

    pub fn optional(element: VariableType) -> Self {
        VariableType::Optional(Box::new(element))
    }
}

/// Types usable as operation variables.
pub trait InputType: Serialize {
    fn variable_type() -> VariableType;
}

impl<T: InputType> InputType for Option<T> {
    fn variable_type() -> VariableType {
        VariableType::optional(T::variable_type())
    }
}

impl<T: InputType> InputType for Vec<T> {
    fn variable_type() -> VariableType {
        VariableType::list(T::variable_type())
    }
}

impl<T: InputType> InputType for VecDeque<T> {
    fn variable_type() -> VariableType {
        VariableType::list(T::variable_type())
    }
}

impl<T: InputType> InputType for [T] {
    fn variable_type() -> VariableType {
        VariableType::list(T::variable_type())
    }
}

impl<T: InputType, const N: usize> InputType for [T; N]
where
    [T; N]: Serialize,
{
    fn variable_type() -> VariableType {
        VariableType::list(T::variable_type())
    }
}

impl<T: InputType + ?Sized> InputType for Box<T> {
    fn variable_type() -> VariableType {
        T::variable_type()
    }
}

impl<T: InputType + ?Sized> InputType for &T {
    fn variable_type() -> VariableType {
        T::variable_type()
    }
}

macro_rules! named_input {
    ($name:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl InputType for $ty {
                fn variable_type() -> VariableType {
                    VariableType::named($name)
                }
            }
        )+
    };
}

named_input!("String" => String, str);
named_input!("Boolean" => bool);
named_input!("Int" => i8, i16, i32, i64, u8, u16, u32);
named_input!("Float" => f32, f64);
named_input!("DateTime" => DateTime<Utc>);
named_input!("ID" => Id);

/// A variable value paired with its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    ty: VariableType,
    value: Value,
}

impl Variable {
    pub fn new(ty: VariableType, value: Value) -> Self {
        Variable { ty, value }
    }

    pub fn from_input<V: InputType + ?Sized>(value: &V) -> serde_json::Result<Self> {
        Ok(Variable {
            ty: V::variable_type(),
            value: serde_json::to_value(value)?,
        })
    }

    pub fn ty(&self) -> &VariableType {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Named operation variables, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: BTreeMap<String, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` under `name`, replacing any previous entry.
    pub fn insert<V: InputType>(&mut self, name: impl Into<String>, value: V) -> Result<&mut Self> {
        let name = name.into();
        let variable = Variable::from_input(&value).map_err(|source| Error::VariableEncode {
            name: name.clone(),
            source,
        })?;
        self.entries.insert(name, variable);
        Ok(self)
    }

    /// Builder form of [`Variables::insert`].
    pub fn with<V: InputType>(mut self, name: impl Into<String>, value: V) -> Result<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    pub fn insert_variable(&mut self, name: impl Into<String>, variable: Variable) {
        self.entries.insert(name.into(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.entries.iter().map(|(name, var)| (name.as_str(), var))
    }

    /// The `variables` object of the request payload.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(name, var)| (name.clone(), var.value.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(String, Variable)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, Variable)>>(iter: I) -> Self {
        Variables {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, var) in &self.entries {
            map.serialize_entry(name, &var.value)?;
        }
        map.end()
    }
}

/// Writes the minified variable header body, e.g. `$a:Int!$b:Boolean`.
///
/// Variables are written in name order. No commas are inserted: commas are
/// insignificant in GraphQL.
pub fn query_arguments(
    variables: &Variables,
    is_mutation: bool,
    options: &CompileOptions,
) -> Result<String> {
    let mut buf = String::new();
    for (name, var) in variables.iter() {
        buf.push('$');
        buf.push_str(name);
        buf.push(':');
        write_argument_type(&mut buf, &var.ty, true, is_mutation, options)?;
    }
    Ok(buf)
}

/// Renders the GraphQL type signature of `ty`.
///
/// `value` marks a required (non-optional) position; it appends a trailing
/// `!` after the resolved type.
pub fn encode_type(
    ty: &VariableType,
    value: bool,
    is_mutation: bool,
    options: &CompileOptions,
) -> Result<String> {
    let mut buf = String::new();
    write_argument_type(&mut buf, ty, value, is_mutation, options)?;
    Ok(buf)
}

fn write_argument_type(
    w: &mut String,
    ty: &VariableType,
    value: bool,
    is_mutation: bool,
    options: &CompileOptions,
) -> Result<()> {
    match ty {
        VariableType::Optional(inner) => {
            // Optional: no "!" on the element, except inside mutations.
            let required = is_mutation && options.mutation_optional_as_required;
            return write_argument_type(w, inner, required, is_mutation, options);
        }
        VariableType::List(inner) => {
            w.push('[');
            write_argument_type(w, inner, true, is_mutation, options)?;
            w.push(']');
        }
        VariableType::Scalar(kind) => {
            if options.double_required_marker {
                w.push_str(kind.table_name());
            } else {
                w.push_str(kind.base_name());
            }
        }
        VariableType::Named(name) => {
            check_type_name(name)?;
            w.push_str(name);
        }
    }

    if value {
        w.push('!');
    }
    Ok(())
}

fn check_type_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
    if valid_start && chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        return Ok(());
    }
    Err(Error::UnsupportedVariableType {
        name: name.to_string(),
        reason: "not a valid GraphQL type name".to_string(),
    })
}
