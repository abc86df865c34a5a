//! Wire types for GraphQL requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use msd_model::{FieldType, MetadataField, NewField};

/// `data` of the [`LIBRARIES`](crate::queries::LIBRARIES) query.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandsData {
    /// Every brand visible to the token.
    #[serde(default)]
    pub brands: Vec<Brand>,
}

/// A brand and the first page of its libraries.
#[derive(Debug, Clone, Deserialize)]
pub struct Brand {
    /// Brand id.
    pub id: String,
    /// Brand name.
    #[serde(default)]
    pub name: Option<String>,
    /// First page of libraries.
    pub libraries: LibraryPage,
}

/// `data` of the [`BRAND_LIBRARY_PAGE`](crate::queries::BRAND_LIBRARY_PAGE) query.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandPageData {
    /// The brand, or `None` if it no longer exists.
    pub brand: Option<BrandLibraries>,
}

/// Libraries of a single brand.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandLibraries {
    /// One page of libraries.
    pub libraries: LibraryPage,
}

/// One page of libraries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPage {
    /// Libraries on this page.
    #[serde(default)]
    pub items: Vec<LibraryItem>,
    /// Whether another page follows.
    #[serde(default)]
    pub has_next_page: bool,
}

/// A library as listed in a page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    /// Library id.
    pub id: String,
    /// Library name.
    pub name: String,
    /// Only the ids of the library's fields.
    #[serde(default)]
    pub custom_metadata_properties: Vec<PropertyRef>,
}

impl LibraryItem {
    /// Whether the library has at least one metadata field.
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        !self.custom_metadata_properties.is_empty()
    }
}

/// A bare field reference.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyRef {
    /// Field id.
    pub id: String,
}

/// `data` of the [`LIBRARY_FIELDS`](crate::queries::LIBRARY_FIELDS) query.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryFieldsData {
    /// The library, or `None` if it does not exist.
    pub library: Option<LibraryFields>,
}

/// Field definitions of a library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryFields {
    /// Raw field definitions.
    #[serde(default)]
    pub custom_metadata_properties: Vec<RawProperty>,
}

/// A field definition as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    /// Field id.
    pub id: String,
    /// Field name.
    pub name: String,
    /// Type name and, for choice types, options.
    #[serde(rename = "type")]
    pub property_type: RawPropertyType,
}

/// Type part of a raw field definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPropertyType {
    /// Type name, e.g. `SELECT`.
    pub name: String,
    /// Options are kept undecoded so a malformed list cannot fail the
    /// whole response.
    #[serde(default)]
    pub options: Option<Value>,
}

/// A choice option as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    /// Option value.
    pub value: String,
}

impl RawProperty {
    /// Converts into a model field.
    ///
    /// A choice-typed field whose options cannot be decoded is kept, with no
    /// options.
    #[must_use]
    pub fn into_field(self) -> MetadataField {
        let field_type = FieldType::from(self.property_type.name);
        let options = if field_type.is_choice() {
            decode_options(&self.id, self.property_type.options)
        } else {
            Vec::new()
        };
        MetadataField::new(self.id, self.name, field_type, options)
    }
}

fn decode_options(field_id: &str, raw: Option<Value>) -> Vec<String> {
    let Some(raw) = raw else {
        tracing::warn!(field_id = %field_id, "Choice field has no options list");
        return Vec::new();
    };
    match serde_json::from_value::<Vec<RawOption>>(raw) {
        Ok(options) => options.into_iter().map(|o| o.value).collect(),
        Err(err) => {
            tracing::warn!(
                field_id = %field_id,
                error = %err,
                "Could not decode options, listing field without options"
            );
            Vec::new()
        }
    }
}

/// `data` of the [`CREATE_PROPERTY`](crate::queries::CREATE_PROPERTY) mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyData {
    /// Mutation payload.
    pub create_custom_metadata_property: CreatePropertyPayload,
}

/// Payload of a create mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyPayload {
    /// The created field.
    pub property: PropertyRef,
}

/// An option value in mutation inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionInput {
    /// Option value.
    pub value: String,
}

fn option_inputs(options: &[String]) -> Vec<OptionInput> {
    options
        .iter()
        .map(|value| OptionInput {
            value: value.clone(),
        })
        .collect()
}

/// Type part of a create input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyTypeInput {
    /// Type name.
    pub name: String,
    /// Options, sent for choice types only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionInput>>,
}

/// Input of the create mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyInput {
    /// Library receiving the field.
    pub parent_id: String,
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub property_type: PropertyTypeInput,
}

impl CreatePropertyInput {
    /// Builds the input for creating `field` in `parent_id`.
    #[must_use]
    pub fn new(parent_id: &str, field: &NewField) -> Self {
        let options = field
            .field_type
            .is_choice()
            .then(|| option_inputs(&field.options));
        Self {
            parent_id: parent_id.to_string(),
            name: field.name.clone(),
            property_type: PropertyTypeInput {
                name: field.field_type.as_str().to_string(),
                options,
            },
        }
    }
}

/// Input of the add-options mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptionsInput {
    /// Field receiving the options.
    pub property_id: String,
    /// Options to append.
    pub options: Vec<OptionInput>,
}

impl AddOptionsInput {
    /// Builds the input for appending `options` to `property_id`.
    #[must_use]
    pub fn new(property_id: &str, options: &[String]) -> Self {
        Self {
            property_id: property_id.to_string(),
            options: option_inputs(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn property(value: Value) -> RawProperty {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_select_property_decodes_options() {
        let field = property(json!({
            "id": "p1",
            "name": "Status",
            "type": {
                "name": "SELECT",
                "options": [{"id": "o1", "value": "Open"}, {"id": "o2", "value": "Closed"}]
            }
        }))
        .into_field();

        assert_eq!(field.field_type, FieldType::Select);
        assert_eq!(field.options, vec!["Open".to_string(), "Closed".to_string()]);
    }

    #[test]
    fn test_malformed_options_degrade_to_none() {
        let field = property(json!({
            "id": "p1",
            "name": "Status",
            "type": {"name": "MULTISELECT", "options": "broken"}
        }))
        .into_field();
        assert_eq!(field.field_type, FieldType::MultiSelect);
        assert!(field.options.is_empty());

        let field = property(json!({
            "id": "p2",
            "name": "Region",
            "type": {"name": "SELECT", "options": null}
        }))
        .into_field();
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_text_property_ignores_options() {
        let field = property(json!({
            "id": "p3",
            "name": "Title",
            "type": {"name": "TEXT"}
        }))
        .into_field();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_create_input_shape() {
        let field = NewField::new(
            "Status",
            FieldType::Select,
            vec!["Open".to_string()],
        );
        let input = serde_json::to_value(CreatePropertyInput::new("lib-9", &field)).unwrap();
        assert_eq!(
            input,
            json!({
                "parentId": "lib-9",
                "name": "Status",
                "type": {"name": "SELECT", "options": [{"value": "Open"}]}
            })
        );

        let field = NewField::new("Title", FieldType::Text, Vec::new());
        let input = serde_json::to_value(CreatePropertyInput::new("lib-9", &field)).unwrap();
        assert_eq!(input["type"], json!({"name": "TEXT"}));
    }

    #[test]
    fn test_add_options_input_shape() {
        let input = serde_json::to_value(AddOptionsInput::new(
            "p1",
            &["B".to_string(), "C".to_string()],
        ))
        .unwrap();
        assert_eq!(
            input,
            json!({"propertyId": "p1", "options": [{"value": "B"}, {"value": "C"}]})
        );
    }
}
