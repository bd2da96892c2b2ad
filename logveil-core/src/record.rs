//! record.rs - Statically declared field descriptors for typed records.
//!
//! A type opts into annotation-aware sanitization by implementing [`TaggedRecord`],
//! which hands out a [`RecordDescriptor`] built once per type. The descriptor lists each
//! field's name, its annotation and an accessor returning a [`FieldValue`] view of the
//! field. No runtime type introspection is involved.
//!
//! ```rust
//! use logveil_core::record::{FieldValue, RecordDescriptor, TaggedRecord};
//! use once_cell::sync::Lazy;
//!
//! struct Customer {
//!     id: u64,
//!     email: String,
//!     nickname: Option<String>,
//!     internal_score: f64,
//! }
//!
//! impl TaggedRecord for Customer {
//!     fn descriptor() -> &'static RecordDescriptor<Self> {
//!         static DESCRIPTOR: Lazy<RecordDescriptor<Customer>> = Lazy::new(|| {
//!             RecordDescriptor::<Customer>::builder("Customer")
//!                 .field("id", "preserve", |c| c.id.into())
//!                 .field("email", "redact,sensitive", |c| (&c.email).into())
//!                 .field("nickname", "", |c| (&c.nickname).into())
//!                 .unexported("internal_score")
//!                 .build()
//!         });
//!         &DESCRIPTOR
//!     }
//! }
//! ```
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::Result;

/// What an annotation asks the sanitizer to do with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldAction {
    /// Always redact. Non-string values become the fixed sentinel.
    Redact,
    /// Never redact; emit the raw value.
    Preserve,
}

/// A parsed annotation: `action[,sensitive]`.
///
/// `sensitive` is informational only and never changes how a field is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldTag {
    pub action: Option<FieldAction>,
    pub sensitive: bool,
}

impl FieldTag {
    /// Parses an annotation string. An empty string means "no annotation". Unknown
    /// tokens are ignored with a warning.
    pub fn parse(tag: &str) -> Self {
        let mut parsed = FieldTag::default();
        for token in tag.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_ascii_lowercase().as_str() {
                "redact" => parsed.action = Some(FieldAction::Redact),
                "preserve" => parsed.action = Some(FieldAction::Preserve),
                "sensitive" => parsed.sensitive = true,
                _ => warn!("Ignoring unknown field annotation token '{}' in '{}'.", token, tag),
            }
        }
        parsed
    }
}

/// A borrowed view of one field's value.
pub enum FieldValue<'a> {
    Null,
    Str(&'a str),
    /// Numbers and booleans. Never matched against patterns.
    Scalar(Value),
    /// Arbitrary structured data, traversed like any other keyed structure.
    Json(Value),
    Record(&'a dyn RecordView),
    List(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    pub fn record<R: RecordView>(record: &'a R) -> Self {
        FieldValue::Record(record)
    }

    pub fn optional_record<R: RecordView>(record: Option<&'a R>) -> Self {
        record.map_or(FieldValue::Null, |r| FieldValue::Record(r))
    }

    pub fn records<R: RecordView>(records: &'a [R]) -> Self {
        FieldValue::List(records.iter().map(|r| FieldValue::Record(r)).collect())
    }

    /// Serializes any value into a [`FieldValue::Json`].
    pub fn json<S: Serialize + ?Sized>(value: &S) -> Result<Self> {
        Ok(FieldValue::Json(serde_json::to_value(value)?))
    }

    /// The unsanitized JSON form of this value, nested records included.
    pub fn to_raw(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Str(s) => Value::String((*s).to_string()),
            FieldValue::Scalar(v) | FieldValue::Json(v) => v.clone(),
            FieldValue::Record(record) => Value::Object(raw_record(*record)),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::to_raw).collect()),
        }
    }
}

fn raw_record(record: &dyn RecordView) -> Map<String, Value> {
    record
        .fields()
        .into_iter()
        .map(|field| (field.name.to_string(), field.value.to_raw()))
        .collect()
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            FieldValue::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            FieldValue::Json(v) => f.debug_tuple("Json").field(v).finish(),
            FieldValue::Record(r) => f.debug_tuple("Record").field(&r.type_name()).finish(),
            FieldValue::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value.as_str())
    }
}

impl<'a, T> From<&'a Option<T>> for FieldValue<'a>
where
    &'a T: Into<FieldValue<'a>>,
{
    fn from(value: &'a Option<T>) -> Self {
        value.as_ref().map_or(FieldValue::Null, Into::into)
    }
}

impl<'a, T> From<&'a Vec<T>> for FieldValue<'a>
where
    &'a T: Into<FieldValue<'a>>,
{
    fn from(values: &'a Vec<T>) -> Self {
        FieldValue::List(values.iter().map(Into::into).collect())
    }
}

macro_rules! scalar_field_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue<'_> {
                fn from(value: $ty) -> Self {
                    FieldValue::Scalar(Value::from(value))
                }
            }

            impl From<&$ty> for FieldValue<'_> {
                fn from(value: &$ty) -> Self {
                    FieldValue::Scalar(Value::from(*value))
                }
            }
        )*
    };
}

scalar_field_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// One exported field of a record, as seen by the sanitizer.
#[derive(Debug)]
pub struct RecordField<'a> {
    pub name: &'static str,
    pub tag: FieldTag,
    pub value: FieldValue<'a>,
}

/// Object-safe view over a record. Implemented for every [`TaggedRecord`].
pub trait RecordView {
    fn type_name(&self) -> &'static str;

    /// Exported fields in declaration order. Unexported fields never appear here.
    fn fields(&self) -> Vec<RecordField<'_>>;
}

/// A type with a statically declared field descriptor table.
pub trait TaggedRecord: Sized + 'static {
    fn descriptor() -> &'static RecordDescriptor<Self>;
}

impl<T: TaggedRecord> RecordView for T {
    fn type_name(&self) -> &'static str {
        T::descriptor().type_name
    }

    fn fields(&self) -> Vec<RecordField<'_>> {
        T::descriptor()
            .fields
            .iter()
            .filter_map(|field| {
                field.accessor.map(|access| RecordField {
                    name: field.name,
                    tag: field.tag,
                    value: access(self),
                })
            })
            .collect()
    }
}

/// Accessor returning a view of one field of `T`.
pub type Accessor<T> = for<'r> fn(&'r T) -> FieldValue<'r>;

/// One entry of a descriptor table. Unexported fields carry no accessor.
pub struct FieldDescriptor<T> {
    pub name: &'static str,
    pub tag: FieldTag,
    accessor: Option<Accessor<T>>,
}

impl<T> FieldDescriptor<T> {
    pub fn is_exported(&self) -> bool {
        self.accessor.is_some()
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("exported", &self.is_exported())
            .finish()
    }
}

/// The field table of a record type. Built once, read-only afterwards.
pub struct RecordDescriptor<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> RecordDescriptor<T> {
    pub fn builder(type_name: &'static str) -> RecordDescriptorBuilder<T> {
        RecordDescriptorBuilder {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<T> fmt::Debug for RecordDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

pub struct RecordDescriptorBuilder<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> RecordDescriptorBuilder<T> {
    /// Declares an exported field. `tag` uses the `action[,sensitive]` syntax; pass ""
    /// for no annotation.
    pub fn field(mut self, name: &'static str, tag: &str, accessor: Accessor<T>) -> Self {
        self.fields.push(FieldDescriptor {
            name,
            tag: FieldTag::parse(tag),
            accessor: Some(accessor),
        });
        self
    }

    /// Declares a field that is never emitted.
    pub fn unexported(mut self, name: &'static str) -> Self {
        self.fields.push(FieldDescriptor {
            name,
            tag: FieldTag::default(),
            accessor: None,
        });
        self
    }

    pub fn build(self) -> RecordDescriptor<T> {
        RecordDescriptor {
            type_name: self.type_name,
            fields: self.fields,
        }
    }
}
