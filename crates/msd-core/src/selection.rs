//! Which source fields and options the operator has chosen.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use msd_model::{FieldType, MetadataField};

use crate::catalog::FieldCatalog;
use crate::error::SelectionError;

/// Chosen fields and, for choice-typed fields, chosen option values.
///
/// Selecting a choice-typed field always resets its option entry to all of
/// its options; expanding pre-fills the entry only when there is none yet.
/// Option entries never hold the same value twice. A missing entry and
/// an empty entry are different states: only the empty entry is the result
/// of the operator deselecting every option.
///
/// Clear the state whenever the source or destination collection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected field ids, in selection order.
    selected: Vec<String>,
    /// Chosen options per choice-typed field id, in choice order.
    chosen_options: BTreeMap<String, Vec<String>>,
    /// Field ids whose option list is expanded.
    expanded: BTreeSet<String>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected field ids, in selection order.
    #[must_use]
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, field_id: &str) -> bool {
        self.selected.iter().any(|id| id == field_id)
    }

    #[must_use]
    pub fn is_expanded(&self, field_id: &str) -> bool {
        self.expanded.contains(field_id)
    }

    /// Chosen options for a field, or `None` if no entry exists yet.
    #[must_use]
    pub fn chosen_options(&self, field_id: &str) -> Option<&[String]> {
        self.chosen_options.get(field_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_option_chosen(&self, field_id: &str, option: &str) -> bool {
        self.chosen_options
            .get(field_id)
            .is_some_and(|chosen| chosen.iter().any(|o| o == option))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selects or deselects a field.
    ///
    /// Deselecting drops the field's option entry. Selecting a choice-typed
    /// field chooses all of its options, replacing any earlier entry.
    pub fn toggle_field(&mut self, field: &MetadataField) {
        if self.is_selected(&field.id) {
            self.selected.retain(|id| id != &field.id);
            self.chosen_options.remove(&field.id);
        } else {
            self.select_all_options(field);
            self.selected.push(field.id.clone());
        }
    }

    /// Expands or collapses a field's option list.
    pub fn toggle_expanded(&mut self, field: &MetadataField) {
        if !self.expanded.remove(&field.id) {
            self.expanded.insert(field.id.clone());
        }
        self.populate_default_options(field);
    }

    /// Chooses or un-chooses one option. Returns whether it is now chosen.
    ///
    /// Options the field does not define are ignored.
    pub fn toggle_option(&mut self, field: &MetadataField, option: &str) -> bool {
        if !field.is_choice() || !field.has_option(option) {
            return false;
        }
        self.populate_default_options(field);
        let chosen = self.chosen_options.entry(field.id.clone()).or_default();
        if let Some(pos) = chosen.iter().position(|o| o == option) {
            chosen.remove(pos);
            false
        } else {
            chosen.push(option.to_string());
            true
        }
    }

    /// Chooses every option of a choice-typed field.
    pub fn select_all_options(&mut self, field: &MetadataField) {
        if field.is_choice() {
            self.chosen_options
                .insert(field.id.clone(), unique_options(&field.options));
        }
    }

    /// Un-chooses every option, leaving an empty entry behind.
    pub fn deselect_all_options(&mut self, field: &MetadataField) {
        if field.is_choice() {
            self.chosen_options.insert(field.id.clone(), Vec::new());
        }
    }

    /// Selects every catalog field, in catalog order, with all options.
    pub fn select_all_fields(&mut self, catalog: &FieldCatalog) {
        self.selected = catalog.iter().map(|f| f.id.clone()).collect();
        self.chosen_options = catalog
            .iter()
            .filter(|f| f.is_choice())
            .map(|f| (f.id.clone(), unique_options(&f.options)))
            .collect();
    }

    /// Deselects every field and drops all option entries.
    pub fn deselect_all_fields(&mut self) {
        self.selected.clear();
        self.chosen_options.clear();
    }

    /// Resets everything, including expansion state.
    pub fn clear(&mut self) {
        self.deselect_all_fields();
        self.expanded.clear();
    }

    /// Copies the selected fields out of the catalog, in selection order.
    ///
    /// Each copy carries the chosen options instead of the catalog's full
    /// option list. The catalog is left untouched.
    pub fn selected_fields(
        &self,
        catalog: &FieldCatalog,
    ) -> Result<Vec<SelectedField>, SelectionError> {
        self.selected
            .iter()
            .map(|id| {
                let field = catalog
                    .get(id)
                    .ok_or_else(|| SelectionError::UnknownField(id.clone()))?;
                let options = if field.is_choice() {
                    self.chosen_options.get(id).cloned().unwrap_or_default()
                } else {
                    Vec::new()
                };
                Ok(SelectedField {
                    source_id: field.id.clone(),
                    name: field.name.clone(),
                    field_type: field.field_type.clone(),
                    options,
                })
            })
            .collect()
    }

    fn populate_default_options(&mut self, field: &MetadataField) {
        if field.is_choice() && !self.chosen_options.contains_key(&field.id) {
            self.chosen_options
                .insert(field.id.clone(), unique_options(&field.options));
        }
    }
}

/// `options` without repeated values, keeping first occurrences in order.
pub(crate) fn unique_options(options: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    options
        .iter()
        .filter(|option| seen.insert(option.as_str()))
        .cloned()
        .collect()
}

/// An independent copy of a selected source field, ready for planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedField {
    /// Id of the field in the source collection.
    pub source_id: String,
    pub name: String,
    pub field_type: FieldType,
    /// Chosen options; empty for non-choice types.
    pub options: Vec<String>,
}

impl SelectedField {
    #[must_use]
    pub fn is_choice(&self) -> bool {
        self.field_type.is_choice()
    }
}
