//! Pre-apply validation of a selection.

use serde::{Deserialize, Serialize};

use crate::catalog::FieldCatalog;
use crate::selection::SelectionState;

/// Result of checking a selection before planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    /// Choice-typed fields selected with no chosen option.
    Invalid {
        /// Every offending field's name, in selection order.
        field_names: Vec<String>,
    },
}

impl ValidationOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The single aggregated warning shown to the operator.
    #[must_use]
    pub fn warning_message(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { field_names } => Some(format!(
                "The following fields have no options selected: {}",
                field_names.join(", ")
            )),
        }
    }
}

/// Checks that every selected choice-typed field has at least one chosen option.
///
/// A field without an option entry counts as having none. Selected ids that
/// are not in the catalog are left to [`SelectionState::selected_fields`].
#[must_use]
pub fn validate_selection(selection: &SelectionState, catalog: &FieldCatalog) -> ValidationOutcome {
    let field_names: Vec<String> = selection
        .selected_ids()
        .iter()
        .filter_map(|id| catalog.get(id))
        .filter(|field| field.is_choice())
        .filter(|field| {
            selection
                .chosen_options(&field.id)
                .is_none_or(<[String]>::is_empty)
        })
        .map(|field| field.name.clone())
        .collect();

    if field_names.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid { field_names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msd_model::{FieldType, MetadataField};

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(
            "src",
            vec![
                MetadataField::new(
                    "p1",
                    "Status",
                    FieldType::Select,
                    vec!["Open".to_string()],
                ),
                MetadataField::new(
                    "p2",
                    "Channels",
                    FieldType::MultiSelect,
                    vec!["Web".to_string(), "Print".to_string()],
                ),
                MetadataField::new("p3", "Title", FieldType::Text, Vec::new()),
            ],
        )
    }

    #[test]
    fn test_all_options_selected_is_valid() {
        let catalog = catalog();
        let mut selection = SelectionState::new();
        selection.select_all_fields(&catalog);
        assert_eq!(validate_selection(&selection, &catalog), ValidationOutcome::Valid);
    }

    #[test]
    fn test_reports_every_empty_choice_field() {
        let catalog = catalog();
        let mut selection = SelectionState::new();
        selection.select_all_fields(&catalog);
        for field in catalog.iter() {
            selection.deselect_all_options(field);
        }

        let outcome = validate_selection(&selection, &catalog);
        assert_eq!(
            outcome,
            ValidationOutcome::Invalid {
                field_names: vec!["Status".to_string(), "Channels".to_string()],
            }
        );
        assert_eq!(
            outcome.warning_message().as_deref(),
            Some("The following fields have no options selected: Status, Channels")
        );
    }

    #[test]
    fn test_unselected_fields_are_ignored() {
        let catalog = catalog();
        let mut selection = SelectionState::new();
        let status = catalog.get("p1").unwrap();
        selection.toggle_expanded(status);
        selection.deselect_all_options(status);

        assert!(validate_selection(&selection, &catalog).is_valid());
    }

    #[test]
    fn test_empty_selection_is_valid() {
        assert!(validate_selection(&SelectionState::new(), &catalog()).is_valid());
    }
}
