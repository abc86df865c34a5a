//! Metadata field definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type of a metadata field.
///
/// Serialized as the remote service's type name (`TEXT`, `SELECT`, ...).
/// Unknown type names are preserved in [`FieldType::Other`] so that fields
/// of types this crate does not know about can still be copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    LongText,
    /// Numeric value.
    Number,
    /// Calendar date.
    Date,
    /// Web address.
    Url,
    /// One value from an option list.
    Select,
    /// Any number of values from an option list.
    MultiSelect,
    /// A type name not covered above.
    Other(String),
}

impl FieldType {
    /// Returns the wire name of this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "TEXT",
            Self::LongText => "LONG_TEXT",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Url => "URL",
            Self::Select => "SELECT",
            Self::MultiSelect => "MULTISELECT",
            Self::Other(name) => name,
        }
    }

    /// Whether values of this type are drawn from an explicit option list.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "TEXT" => Self::Text,
            "LONG_TEXT" => Self::LongText,
            "NUMBER" => Self::Number,
            "DATE" => Self::Date,
            "URL" => Self::Url,
            "SELECT" => Self::Select,
            "MULTISELECT" => Self::MultiSelect,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metadata field definition owned by one collection.
///
/// `id` identifies the field within its collection. `name` is the key used
/// to match fields across collections and is not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Opaque identifier assigned by the remote service.
    pub id: String,
    /// Human-facing field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Allowed option values, in service order. Always empty for
    /// non-choice types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl MetadataField {
    /// Creates a field, dropping `options` unless the type is choice-typed.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        options: Vec<String>,
    ) -> Self {
        let options = if field_type.is_choice() {
            options
        } else {
            Vec::new()
        };
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            options,
        }
    }

    /// Whether this field carries an option list.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        self.field_type.is_choice()
    }

    /// Whether `option` is one of this field's allowed values.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|existing| existing == option)
    }

    /// Case-insensitive substring match on the field name.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Options whose value contains `query`, ignoring case.
    #[must_use]
    pub fn filter_options(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}

/// Payload for creating a field in a destination collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewField {
    /// Name of the field to create.
    pub name: String,
    /// Type of the field to create.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Initial option values; only meaningful for choice types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl NewField {
    /// Creates a payload, dropping `options` unless the type is choice-typed.
    pub fn new(name: impl Into<String>, field_type: FieldType, options: Vec<String>) -> Self {
        let options = if field_type.is_choice() {
            options
        } else {
            Vec::new()
        };
        Self {
            name: name.into(),
            field_type,
            options,
        }
    }
}
