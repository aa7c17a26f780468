//! Static descriptions of the data an operation selects.
//!
//! Every type used in a selection implements [`GraphQLShape`]. Records list
//! their fields in declared order through [`RecordShape`]; wrappers such as
//! `Option<T>` and `Vec<T>` describe themselves in terms of their element.
//!
//! ```
//! use gqlshape::{FieldShape, GqlInt64, GqlString, GraphQLShape, RecordShape, TypeShape};
//!
//! struct Viewer {
//!     login: GqlString,
//!     database_id: GqlInt64,
//! }
//!
//! impl GraphQLShape for Viewer {
//!     fn shape() -> TypeShape {
//!         RecordShape::new("Viewer")
//!             .field(FieldShape::of::<GqlString>("login"))
//!             .field(FieldShape::of::<GqlInt64>("database_id"))
//!             .into()
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use crate::ident;

/// Tag value that removes a field from the selection entirely.
pub const OMIT_TAG: &str = "-";

/// The selection-relevant description of a type.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// Terminal leaf: contributes only its field name.
    Scalar,
    /// Aggregate of fields rendered as a selection set.
    Record(RecordShape),
    /// List of the element type. Adds no syntax of its own.
    List(Box<TypeShape>),
    /// Nullable element type. Adds no syntax of its own.
    Optional(Box<TypeShape>),
}

impl TypeShape {
    /// Strips list and optional wrappers down to the element shape.
    pub fn element(&self) -> &TypeShape {
        match self {
            TypeShape::List(inner) | TypeShape::Optional(inner) => inner.element(),
            other => other,
        }
    }

    pub fn as_record(&self) -> Option<&RecordShape> {
        match self.element() {
            TypeShape::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.element(), TypeShape::Scalar)
    }
}

impl From<RecordShape> for TypeShape {
    fn from(record: RecordShape) -> Self {
        TypeShape::Record(record)
    }
}

/// A named record with its fields in declared order.
#[derive(Debug, Clone)]
pub struct RecordShape {
    type_name: String,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    pub fn new(type_name: impl Into<String>) -> Self {
        RecordShape {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Fields render in the order they are added.
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

/// Resolved output name of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldName {
    Name(String),
    Omitted,
}

/// One field of a record.
#[derive(Debug, Clone)]
pub struct FieldShape {
    ident: String,
    tag: Option<String>,
    arguments: Option<String>,
    inverse: Option<String>,
    embedded: bool,
    ty: fn() -> TypeShape,
}

impl FieldShape {
    /// A field named after its declared identifier, of type `T`.
    pub fn of<T: GraphQLShape + ?Sized>(ident: impl Into<String>) -> Self {
        FieldShape {
            ident: ident.into(),
            tag: None,
            arguments: None,
            inverse: None,
            embedded: false,
            ty: T::shape,
        }
    }

    /// An anonymous field whose sub-fields splice into the parent
    /// selection set, unless a tag is attached.
    ///
    /// The identifier is derived from [`std::any::type_name`], whose output
    /// is not guaranteed stable, so it is best-effort. Use
    /// [`FieldShape::embedded_named`] when the identifier matters (an
    /// inverse guard on the parent, or an empty tag).
    pub fn embedded<T: GraphQLShape + ?Sized>() -> Self {
        let path = std::any::type_name::<T>();
        let base = path.split('<').next().unwrap_or(path);
        let ident = base.rsplit("::").next().unwrap_or(base);
        FieldShape::embedded_named::<T>(ident)
    }

    /// Like [`FieldShape::embedded`], with an explicit identifier.
    pub fn embedded_named<T: GraphQLShape + ?Sized>(ident: impl Into<String>) -> Self {
        FieldShape {
            embedded: true,
            ..FieldShape::of::<T>(ident)
        }
    }

    /// Replaces the derived name with `tag` verbatim. A tag may carry
    /// arguments (`issue(number:1)`) or an inline fragment marker
    /// (`... on Issue`); [`OMIT_TAG`] drops the field.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Drops the field from the selection.
    pub fn omit(self) -> Self {
        self.tag(OMIT_TAG)
    }

    /// Appends an argument string after the field name, e.g. `(first:10)`.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = Some(arguments.into());
        self
    }

    /// Names the field on the child type that points back at this one.
    /// That field is left out of the child's selection set.
    pub fn inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn argument_suffix(&self) -> Option<&str> {
        self.arguments.as_deref()
    }

    pub fn inverse_name(&self) -> Option<&str> {
        self.inverse.as_deref()
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Embedded fields without an explicit tag are inlined.
    pub fn is_inlined(&self) -> bool {
        self.embedded && self.tag.is_none()
    }

    pub fn resolved_name(&self) -> FieldName {
        match self.tag.as_deref() {
            Some(OMIT_TAG) => FieldName::Omitted,
            Some(tag) if !tag.is_empty() => FieldName::Name(tag.to_string()),
            _ => FieldName::Name(ident::to_lower_camel_case(&self.ident)),
        }
    }

    /// Resolves the field's type. Resolution is deferred so that records
    /// may refer to themselves.
    pub fn shape(&self) -> TypeShape {
        (self.ty)()
    }
}

/// Types that can appear in a selection.
pub trait GraphQLShape {
    fn shape() -> TypeShape;
}

impl<T: GraphQLShape> GraphQLShape for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(Box::new(T::shape()))
    }
}

impl<T: GraphQLShape> GraphQLShape for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::List(Box::new(T::shape()))
    }
}

impl<T: GraphQLShape> GraphQLShape for VecDeque<T> {
    fn shape() -> TypeShape {
        TypeShape::List(Box::new(T::shape()))
    }
}

impl<T: GraphQLShape, const N: usize> GraphQLShape for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::List(Box::new(T::shape()))
    }
}

impl<T: GraphQLShape + ?Sized> GraphQLShape for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: GraphQLShape + ?Sized> GraphQLShape for Arc<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

macro_rules! scalar_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GraphQLShape for $ty {
                fn shape() -> TypeShape {
                    TypeShape::Scalar
                }
            }
        )*
    };
}

scalar_shape!(
    String,
    str,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    serde_json::Value,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
);

#[cfg(test)]
mod tests {
    use super::*;

    struct Node;

    impl GraphQLShape for Node {
        fn shape() -> TypeShape {
            RecordShape::new("Node")
                .field(FieldShape::of::<String>("ID"))
                .field(FieldShape::of::<Option<Vec<Node>>>("children"))
                .into()
        }
    }

    #[test]
    fn wrappers_unwrap_to_element() {
        let shape = <Option<Vec<Box<Node>>>>::shape();
        assert!(matches!(shape, TypeShape::Optional(_)));
        assert_eq!(shape.as_record().map(RecordShape::type_name), Some("Node"));
        assert!(<Vec<Option<i64>>>::shape().is_scalar());
    }

    #[test]
    fn self_referential_records_resolve_lazily() {
        let shape = Node::shape();
        let record = shape.as_record().unwrap();
        let children = record.fields()[1].shape();
        assert_eq!(children.as_record().unwrap().fields().len(), 2);
    }

    #[test]
    fn resolves_field_names() {
        assert_eq!(
            FieldShape::of::<String>("DatabaseID").resolved_name(),
            FieldName::Name("databaseId".into())
        );
        assert_eq!(
            FieldShape::of::<String>("avatar_url")
                .tag("avatarUrl(size:72)")
                .resolved_name(),
            FieldName::Name("avatarUrl(size:72)".into())
        );
        assert_eq!(
            FieldShape::of::<String>("secret").omit().resolved_name(),
            FieldName::Omitted
        );
        assert_eq!(
            FieldShape::of::<String>("Login").tag("").resolved_name(),
            FieldName::Name("login".into())
        );
    }

    #[test]
    fn embedded_fields_inline_only_without_tag() {
        let plain = FieldShape::embedded::<Node>();
        assert_eq!(plain.ident(), "Node");
        assert!(plain.is_inlined());

        let fragment = FieldShape::embedded::<Node>().tag("... on Node");
        assert!(fragment.is_embedded());
        assert!(!fragment.is_inlined());
    }

    #[test]
    fn embedded_named_keeps_given_ident() {
        let field = FieldShape::embedded_named::<Node>("TreeNode").tag("");
        assert_eq!(field.ident(), "TreeNode");
        assert!(field.is_embedded());
        assert_eq!(field.resolved_name(), FieldName::Name("treeNode".into()));
    }
}
