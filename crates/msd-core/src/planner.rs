//! Reconciliation of a selection against the destination's fields.
//!
//! Produces an [`ApplyPlan`] that only ever creates fields or appends
//! options. Destination fields are matched by name; the source name is
//! trimmed, destination names are compared as stored.

use std::collections::HashMap;

use msd_model::MetadataField;

use crate::selection::{SelectedField, unique_options};
use crate::types::{ApplyAction, ApplyPlan, CreateReason, PlanDecision, PlanStep, ReconcileMode};

/// Destination fields keyed by name, built fresh for each plan.
///
/// When several destination fields share a name, the last one wins.
#[derive(Debug, Default)]
pub struct ExistingFieldIndex<'a> {
    by_name: HashMap<&'a str, &'a MetadataField>,
}

impl<'a> ExistingFieldIndex<'a> {
    #[must_use]
    pub fn build(existing: &'a [MetadataField]) -> Self {
        let mut by_name = HashMap::with_capacity(existing.len());
        for field in existing {
            by_name.insert(field.name.as_str(), field);
        }
        Self { by_name }
    }

    /// Finds the destination field matching a source field name.
    #[must_use]
    pub fn lookup(&self, source_name: &str) -> Option<&'a MetadataField> {
        self.by_name.get(source_name.trim()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Builds the apply plan for `selected` against the destination's `existing` fields.
///
/// In [`ReconcileMode::Merge`] with an empty destination the result is the
/// same as in [`ReconcileMode::CreateNew`], apart from the recorded reason.
#[must_use]
pub fn plan_apply(
    selected: &[SelectedField],
    existing: &[MetadataField],
    mode: ReconcileMode,
) -> ApplyPlan {
    let mut plan = ApplyPlan::new(mode);

    match mode {
        ReconcileMode::CreateNew => {
            for field in selected {
                plan.steps.push(create_step(field, CreateReason::CreateNewMode));
            }
        }
        ReconcileMode::Merge if existing.is_empty() => {
            tracing::debug!("Destination has no fields, creating every selected field");
            for field in selected {
                plan.steps
                    .push(create_step(field, CreateReason::EmptyDestination));
            }
        }
        ReconcileMode::Merge => {
            let index = ExistingFieldIndex::build(existing);
            for field in selected {
                plan.steps.push(merge_step(field, &index));
            }
        }
    }

    tracing::debug!(
        mode = %mode,
        fields = plan.steps.len(),
        actions = plan.action_count(),
        "Built apply plan"
    );
    plan
}

fn merge_step(field: &SelectedField, index: &ExistingFieldIndex<'_>) -> PlanStep {
    let Some(existing) = index.lookup(&field.name) else {
        tracing::debug!(field = %field.name, "No destination field with this name");
        return create_step(field, CreateReason::NoMatch);
    };

    if existing.field_type != field.field_type {
        tracing::debug!(
            field = %field.name,
            source_type = %field.field_type,
            destination_type = %existing.field_type,
            "Type mismatch, creating a second field with the same name"
        );
        return create_step(
            field,
            CreateReason::TypeMismatch {
                existing: existing.field_type.clone(),
            },
        );
    }

    if !field.is_choice() {
        return up_to_date(field);
    }

    let options_to_add: Vec<String> = unique_options(&field.options)
        .into_iter()
        .filter(|option| !existing.has_option(option))
        .collect();

    if options_to_add.is_empty() {
        return up_to_date(field);
    }

    tracing::debug!(
        field = %field.name,
        target = %existing.id,
        count = options_to_add.len(),
        "Merging missing options"
    );
    PlanStep {
        field_name: field.name.clone(),
        decision: PlanDecision::Merge,
        action: Some(ApplyAction::MergeOptions {
            target_field_id: existing.id.clone(),
            options_to_add,
        }),
    }
}

fn create_step(field: &SelectedField, reason: CreateReason) -> PlanStep {
    let options = if field.is_choice() {
        unique_options(&field.options)
    } else {
        Vec::new()
    };
    PlanStep {
        field_name: field.name.clone(),
        decision: PlanDecision::Create(reason),
        action: Some(ApplyAction::CreateField {
            name: field.name.clone(),
            field_type: field.field_type.clone(),
            options,
        }),
    }
}

fn up_to_date(field: &SelectedField) -> PlanStep {
    tracing::debug!(field = %field.name, "Destination field already up to date");
    PlanStep {
        field_name: field.name.clone(),
        decision: PlanDecision::UpToDate,
        action: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msd_model::FieldType;
    use pretty_assertions::assert_eq;

    fn selected(name: &str, field_type: FieldType, options: &[&str]) -> SelectedField {
        SelectedField {
            source_id: format!("src-{name}"),
            name: name.to_string(),
            field_type,
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }

    fn existing(id: &str, name: &str, field_type: FieldType, options: &[&str]) -> MetadataField {
        MetadataField::new(
            id,
            name,
            field_type,
            options.iter().map(|o| (*o).to_string()).collect(),
        )
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_merge_adds_only_missing_options() {
        let selection = vec![selected("Status", FieldType::Select, &["A", "B"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["A"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);

        let actions: Vec<&ApplyAction> = plan.actions().collect();
        assert_eq!(
            actions,
            vec![&ApplyAction::MergeOptions {
                target_field_id: "d1".to_string(),
                options_to_add: strings(&["B"]),
            }]
        );
    }

    #[test]
    fn test_merge_is_idempotent_once_applied() {
        let selection = vec![selected("Status", FieldType::Select, &["A", "B"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["A", "B"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);

        assert!(plan.is_empty());
        assert_eq!(plan.steps[0].decision, PlanDecision::UpToDate);
    }

    #[test]
    fn test_merge_never_removes_destination_only_options() {
        let selection = vec![selected("Status", FieldType::Select, &["A"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["A", "Z"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_diff_follows_chosen_order() {
        let selection = vec![selected("Tags", FieldType::MultiSelect, &["C", "A", "B"])];
        let destination = vec![existing("d1", "Tags", FieldType::MultiSelect, &["A"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert_eq!(
            plan.actions().next(),
            Some(&ApplyAction::MergeOptions {
                target_field_id: "d1".to_string(),
                options_to_add: strings(&["C", "B"]),
            })
        );
    }

    #[test]
    fn test_type_mismatch_creates_duplicate_name() {
        let selection = vec![selected("Status", FieldType::MultiSelect, &["A"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["A"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);

        assert_eq!(
            plan.steps[0].decision,
            PlanDecision::Create(CreateReason::TypeMismatch {
                existing: FieldType::Select
            })
        );
        assert_eq!(
            plan.steps[0].action,
            Some(ApplyAction::CreateField {
                name: "Status".to_string(),
                field_type: FieldType::MultiSelect,
                options: strings(&["A"]),
            })
        );
    }

    #[test]
    fn test_matching_text_field_needs_nothing() {
        let selection = vec![selected("Title", FieldType::Text, &[])];
        let destination = vec![existing("d1", "Title", FieldType::Text, &[])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unmatched_field_is_created() {
        let selection = vec![selected("Title", FieldType::Text, &[])];
        let destination = vec![existing("d1", "Other", FieldType::Text, &[])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert_eq!(
            plan.steps[0].decision,
            PlanDecision::Create(CreateReason::NoMatch)
        );
    }

    #[test]
    fn test_empty_destination_matches_create_new_plan() {
        let selection = vec![
            selected("Status", FieldType::Select, &["Open"]),
            selected("Title", FieldType::Text, &[]),
        ];

        let merge = plan_apply(&selection, &[], ReconcileMode::Merge);
        let create = plan_apply(&selection, &[], ReconcileMode::CreateNew);

        let merge_actions: Vec<&ApplyAction> = merge.actions().collect();
        let create_actions: Vec<&ApplyAction> = create.actions().collect();
        assert_eq!(merge_actions, create_actions);
        assert_eq!(
            merge.steps[0].decision,
            PlanDecision::Create(CreateReason::EmptyDestination)
        );
    }

    #[test]
    fn test_create_new_ignores_existing_fields() {
        let selection = vec![selected("Status", FieldType::Select, &["Open"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["Open"])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::CreateNew);
        assert_eq!(plan.action_count(), 1);
        assert_eq!(
            plan.steps[0].decision,
            PlanDecision::Create(CreateReason::CreateNewMode)
        );
    }

    #[test]
    fn test_source_name_is_trimmed_destination_is_not() {
        let selection = vec![selected("  Status ", FieldType::Select, &["A"])];
        let destination = vec![existing("d1", "Status", FieldType::Select, &["A"])];
        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert!(plan.is_empty());

        let selection = vec![selected("Status", FieldType::Select, &["A"])];
        let destination = vec![existing("d1", " Status", FieldType::Select, &["A"])];
        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert_eq!(
            plan.steps[0].decision,
            PlanDecision::Create(CreateReason::NoMatch)
        );
    }

    #[test]
    fn test_duplicate_destination_names_last_wins() {
        let destination = vec![
            existing("d1", "Status", FieldType::Select, &["A"]),
            existing("d2", "Status", FieldType::Select, &["B"]),
        ];
        let index = ExistingFieldIndex::build(&destination);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("Status").map(|f| f.id.as_str()), Some("d2"));

        let selection = vec![selected("Status", FieldType::Select, &["A", "B"])];
        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        assert_eq!(
            plan.actions().next(),
            Some(&ApplyAction::MergeOptions {
                target_field_id: "d2".to_string(),
                options_to_add: strings(&["A"]),
            })
        );
    }

    #[test]
    fn test_steps_follow_selection_order() {
        let selection = vec![
            selected("Zeta", FieldType::Text, &[]),
            selected("Alpha", FieldType::Text, &[]),
            selected("Mid", FieldType::Select, &["X"]),
        ];
        let destination = vec![existing("d1", "Alpha", FieldType::Text, &[])];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        let names: Vec<&str> = plan.steps.iter().map(|s| s.field_name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(plan.action_count(), 2);
    }

    #[test]
    fn test_repeated_selected_options_are_planned_once() {
        let destination = vec![existing("d1", "Status", FieldType::Select, &["B"])];
        let selection = vec![
            selected("Status", FieldType::Select, &["A", "A", "B"]),
            selected("Tags", FieldType::MultiSelect, &["X", "Y", "X"]),
        ];

        let plan = plan_apply(&selection, &destination, ReconcileMode::Merge);
        let actions: Vec<&ApplyAction> = plan.actions().collect();
        assert_eq!(
            actions,
            vec![
                &ApplyAction::MergeOptions {
                    target_field_id: "d1".to_string(),
                    options_to_add: strings(&["A"]),
                },
                &ApplyAction::CreateField {
                    name: "Tags".to_string(),
                    field_type: FieldType::MultiSelect,
                    options: strings(&["X", "Y"]),
                },
            ]
        );
    }
}
