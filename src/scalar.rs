//! Nullable scalar wrappers.
//!
//! A wrapper pairs a value with an explicit validity flag so that "absent"
//! and "present with a zero value" stay distinct on the wire: an invalid
//! wrapper serializes as `null`, a valid one as the bare value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shape::{FieldShape, GraphQLShape, RecordShape, TypeShape};
use crate::variables::{InputType, ScalarKind, VariableType};

/// A value that may be `null` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nullable<T> {
    value: T,
    valid: bool,
}

pub type GqlBool = Nullable<bool>;
pub type GqlFloat64 = Nullable<f64>;
pub type GqlInt64 = Nullable<i64>;
pub type GqlString = Nullable<String>;
pub type GqlTime = Nullable<DateTime<Utc>>;
pub type GqlId = Nullable<Id>;

impl<T> Nullable<T> {
    pub fn new(value: T) -> Self {
        Nullable { value, valid: true }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_null(&self) -> bool {
        !self.valid
    }

    pub fn get(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> Nullable<T> {
    pub fn null() -> Self {
        Nullable {
            value: T::default(),
            valid: false,
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::new(value)
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::new(value),
            None => Nullable::null(),
        }
    }
}

impl From<&str> for GqlString {
    fn from(value: &str) -> Self {
        Nullable::new(value.to_string())
    }
}

impl From<&str> for GqlId {
    fn from(value: &str) -> Self {
        Nullable::new(Id::from(value))
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.valid {
            self.value.serialize(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

// Going through `Option` also maps a missing struct field to `None`.
impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}

impl<T> GraphQLShape for Nullable<T> {
    fn shape() -> TypeShape {
        TypeShape::Scalar
    }
}

/// Underlying types with an entry in the variable type table.
pub trait NullableKind {
    const KIND: ScalarKind;
}

impl NullableKind for bool {
    const KIND: ScalarKind = ScalarKind::Bool;
}

impl NullableKind for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;
}

impl NullableKind for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;
}

impl NullableKind for String {
    const KIND: ScalarKind = ScalarKind::String;
}

impl NullableKind for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::Time;
}

impl NullableKind for Id {
    const KIND: ScalarKind = ScalarKind::Id;
}

impl<T: NullableKind + Serialize> InputType for Nullable<T> {
    fn variable_type() -> VariableType {
        VariableType::Scalar(T::KIND)
    }
}

/// Opaque GraphQL `ID` value, serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub String);

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl GraphQLShape for Id {
    fn shape() -> TypeShape {
        TypeShape::Scalar
    }
}

/// Geographic point. Selected as a record, sent as the `Point` input type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GqlPoint {
    #[serde(default, skip_serializing_if = "Nullable::is_null")]
    pub latitude: GqlFloat64,
    #[serde(default, skip_serializing_if = "Nullable::is_null")]
    pub longitude: GqlFloat64,
}

impl GqlPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GqlPoint {
            latitude: Nullable::new(latitude),
            longitude: Nullable::new(longitude),
        }
    }
}

impl GraphQLShape for GqlPoint {
    fn shape() -> TypeShape {
        RecordShape::new("Point")
            .field(FieldShape::of::<GqlFloat64>("latitude"))
            .field(FieldShape::of::<GqlFloat64>("longitude"))
            .into()
    }
}

impl InputType for GqlPoint {
    fn variable_type() -> VariableType {
        VariableType::named("Point")
    }
}
