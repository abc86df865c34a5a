//! Building a [`SelectionState`] from command-line flags.

use std::str::FromStr;

use thiserror::Error;

use msd_core::{FieldCatalog, SelectionState};

/// Problems with the fields or options named on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionArgError {
    #[error("no fields selected; pass --field NAME or --all")]
    NothingSelected,
    #[error("source collection has no field named \"{0}\"")]
    UnknownField(String),
    #[error("field \"{0}\" is not selected; cannot exclude its options")]
    NotSelected(String),
    #[error("field \"{0}\" has no options to exclude")]
    NotChoice(String),
    #[error("field \"{field}\" has no option \"{value}\"")]
    UnknownOption { field: String, value: String },
    #[error("expected FIELD=VALUE, got \"{0}\"")]
    MalformedExclusion(String),
}

/// An option to leave out of a selected field, written `FIELD=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionExclusion {
    pub field: String,
    pub value: String,
}

impl FromStr for OptionExclusion {
    type Err = SelectionArgError;

    /// Splits on the first `=`; the value may itself contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((field, value)) = s.split_once('=') else {
            return Err(SelectionArgError::MalformedExclusion(s.to_string()));
        };
        if field.trim().is_empty() || value.is_empty() {
            return Err(SelectionArgError::MalformedExclusion(s.to_string()));
        }
        Ok(Self {
            field: field.trim().to_string(),
            value: value.to_string(),
        })
    }
}

/// Which fields to copy and which options to leave out.
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs<'a> {
    /// Field names, in the order they should be applied.
    pub fields: &'a [String],
    /// Select every field of the catalog, in catalog order.
    pub all: bool,
    pub exclusions: &'a [OptionExclusion],
}

/// Select the named fields with all their options, then drop excluded options.
///
/// Excluding every option of a field is allowed here; the resulting
/// selection then fails validation.
pub fn build_selection(
    catalog: &FieldCatalog,
    args: &SelectionArgs<'_>,
) -> Result<SelectionState, SelectionArgError> {
    let mut selection = SelectionState::new();

    if args.all {
        selection.select_all_fields(catalog);
    } else {
        if args.fields.is_empty() {
            return Err(SelectionArgError::NothingSelected);
        }
        for name in args.fields {
            let field = catalog
                .find_by_name(name)
                .ok_or_else(|| SelectionArgError::UnknownField(name.clone()))?;
            if !selection.is_selected(&field.id) {
                selection.toggle_field(field);
            }
        }
    }

    for exclusion in args.exclusions {
        let field = catalog
            .find_by_name(&exclusion.field)
            .ok_or_else(|| SelectionArgError::UnknownField(exclusion.field.clone()))?;
        if !selection.is_selected(&field.id) {
            return Err(SelectionArgError::NotSelected(field.name.clone()));
        }
        if !field.is_choice() {
            return Err(SelectionArgError::NotChoice(field.name.clone()));
        }
        if !field.has_option(&exclusion.value) {
            return Err(SelectionArgError::UnknownOption {
                field: field.name.clone(),
                value: exclusion.value.clone(),
            });
        }
        if selection.is_option_chosen(&field.id, &exclusion.value) {
            selection.toggle_option(field, &exclusion.value);
        }
    }

    Ok(selection)
}
