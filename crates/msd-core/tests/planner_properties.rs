//! Property tests for the reconciliation planner.

use proptest::prelude::*;

use msd_core::{
    ApplyAction, FieldType, MetadataField, ReconcileMode, SelectedField, plan_apply,
};

fn unique(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn option_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]", 0..8).prop_map(unique)
}

fn selected(options: Vec<String>) -> SelectedField {
    SelectedField {
        source_id: "s1".to_string(),
        name: "Tags".to_string(),
        field_type: FieldType::MultiSelect,
        options,
    }
}

proptest! {
    #[test]
    fn proptest_merge_adds_exactly_the_missing_options(
        chosen in option_list(),
        existing in option_list(),
    ) {
        let destination = vec![MetadataField::new("d1", "Tags", FieldType::MultiSelect, existing.clone())];
        let plan = plan_apply(&[selected(chosen.clone())], &destination, ReconcileMode::Merge);

        let expected: Vec<String> = chosen
            .iter()
            .filter(|o| !existing.contains(o))
            .cloned()
            .collect();

        match plan.actions().next() {
            Some(ApplyAction::MergeOptions { target_field_id, options_to_add }) => {
                prop_assert_eq!(target_field_id.as_str(), "d1");
                prop_assert_eq!(options_to_add, &expected);
            }
            Some(other) => prop_assert!(false, "unexpected action {:?}", other),
            None => prop_assert!(expected.is_empty()),
        }
        prop_assert!(plan.action_count() <= 1);
    }

    #[test]
    fn proptest_merge_is_idempotent_after_apply(
        chosen in option_list(),
        existing in option_list(),
    ) {
        let destination = vec![MetadataField::new("d1", "Tags", FieldType::MultiSelect, existing.clone())];
        let plan = plan_apply(&[selected(chosen.clone())], &destination, ReconcileMode::Merge);

        let mut merged = existing;
        if let Some(ApplyAction::MergeOptions { options_to_add, .. }) = plan.actions().next() {
            merged.extend(options_to_add.iter().cloned());
        }
        let destination = vec![MetadataField::new("d1", "Tags", FieldType::MultiSelect, merged)];
        let replan = plan_apply(&[selected(chosen)], &destination, ReconcileMode::Merge);

        prop_assert!(replan.is_empty());
    }

    #[test]
    fn proptest_create_new_creates_every_selected_field(count in 0usize..10) {
        let selection: Vec<SelectedField> = (0..count)
            .map(|i| SelectedField {
                source_id: format!("s{i}"),
                name: format!("Field {i}"),
                field_type: FieldType::Text,
                options: Vec::new(),
            })
            .collect();
        let destination = vec![MetadataField::new("d1", "Field 0", FieldType::Text, Vec::new())];

        let plan = plan_apply(&selection, &destination, ReconcileMode::CreateNew);

        prop_assert_eq!(plan.action_count(), count);
        let all_create = plan
            .actions()
            .all(|a| matches!(a, ApplyAction::CreateField { .. }));
        prop_assert!(all_create);
    }
}
