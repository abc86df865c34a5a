//! Plan and report types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use msd_model::FieldType;

/// How selected fields are reconciled against the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    /// Always create fresh fields, ignoring existing destination fields.
    CreateNew,
    /// Reuse same-name, same-type fields and only add missing options.
    #[default]
    Merge,
}

impl ReconcileMode {
    /// Maps the "overwrite existing fields" toggle onto a mode.
    #[must_use]
    pub const fn from_overwrite(overwrite_existing: bool) -> Self {
        if overwrite_existing {
            Self::Merge
        } else {
            Self::CreateNew
        }
    }

    /// Get a human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreateNew => "Create new",
            Self::Merge => "Merge",
        }
    }
}

impl fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single change to apply to the destination collection.
///
/// No action ever removes or renames anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyAction {
    /// Create a new field.
    CreateField {
        name: String,
        field_type: FieldType,
        options: Vec<String>,
    },
    /// Append option values to an existing choice-typed field.
    MergeOptions {
        target_field_id: String,
        options_to_add: Vec<String>,
    },
}

impl ApplyAction {
    /// A merge with nothing to add. Executing it would change nothing.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::MergeOptions { options_to_add, .. } if options_to_add.is_empty())
    }
}

impl fmt::Display for ApplyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateField {
                name, field_type, ..
            } => write!(f, "create {field_type} field \"{name}\""),
            Self::MergeOptions {
                target_field_id,
                options_to_add,
            } => write!(
                f,
                "add {} option(s) to field {target_field_id}",
                options_to_add.len()
            ),
        }
    }
}

/// Why the planner decided to create a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CreateReason {
    /// Create-new mode never looks at existing fields.
    CreateNewMode,
    /// Merge mode, but the destination had no fields at all.
    EmptyDestination,
    /// No destination field has this name.
    NoMatch,
    /// A same-named field exists with a different type.
    TypeMismatch { existing: FieldType },
}

/// The planner's decision for one selected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PlanDecision {
    Create(CreateReason),
    /// Missing options will be added to an existing field.
    Merge,
    /// A matching field already has everything; nothing to do.
    UpToDate,
}

/// One selected field and what the plan does with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Source field name, as selected.
    pub field_name: String,
    pub decision: PlanDecision,
    /// The action to run, absent for [`PlanDecision::UpToDate`].
    pub action: Option<ApplyAction>,
}

/// Ordered reconciliation result for one apply run.
///
/// Steps follow the order in which fields were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyPlan {
    pub mode: ReconcileMode,
    pub steps: Vec<PlanStep>,
}

impl ApplyPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new(mode: ReconcileMode) -> Self {
        Self {
            mode,
            steps: Vec::new(),
        }
    }

    /// Iterate over the actions to run, in plan order.
    pub fn actions(&self) -> impl Iterator<Item = &ApplyAction> {
        self.steps.iter().filter_map(|step| step.action.as_ref())
    }

    /// Number of actions the plan will run.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions().count()
    }

    /// True when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action_count() == 0
    }

    /// Find the step for a field by name.
    #[must_use]
    pub fn step(&self, field_name: &str) -> Option<&PlanStep> {
        self.steps.iter().find(|step| step.field_name == field_name)
    }
}

/// An action that was applied successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedAction {
    pub action: ApplyAction,
    /// Id returned by the service for a created field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_field_id: Option<String>,
}

/// Outcome of a fully successful plan execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub destination_id: String,
    pub applied: Vec<AppliedAction>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ApplyReport {
    /// Number of fields created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a.action, ApplyAction::CreateField { .. }))
            .count()
    }

    /// Number of existing fields that received new options.
    #[must_use]
    pub fn merged_count(&self) -> usize {
        self.applied
            .iter()
            .filter(|a| matches!(a.action, ApplyAction::MergeOptions { .. }))
            .count()
    }

    /// Total option values appended to existing fields.
    #[must_use]
    pub fn options_added(&self) -> usize {
        self.applied
            .iter()
            .map(|a| match &a.action {
                ApplyAction::MergeOptions { options_to_add, .. } => options_to_add.len(),
                ApplyAction::CreateField { .. } => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> ApplyAction {
        ApplyAction::CreateField {
            name: name.to_string(),
            field_type: FieldType::Text,
            options: Vec::new(),
        }
    }

    #[test]
    fn test_mode_from_overwrite() {
        assert_eq!(ReconcileMode::from_overwrite(true), ReconcileMode::Merge);
        assert_eq!(ReconcileMode::from_overwrite(false), ReconcileMode::CreateNew);
        assert_eq!(ReconcileMode::default(), ReconcileMode::Merge);
    }

    #[test]
    fn test_plan_actions_skip_up_to_date_steps() {
        let mut plan = ApplyPlan::new(ReconcileMode::Merge);
        plan.steps.push(PlanStep {
            field_name: "Title".to_string(),
            decision: PlanDecision::Create(CreateReason::NoMatch),
            action: Some(create("Title")),
        });
        plan.steps.push(PlanStep {
            field_name: "Status".to_string(),
            decision: PlanDecision::UpToDate,
            action: None,
        });

        assert_eq!(plan.action_count(), 1);
        assert!(!plan.is_empty());
        assert_eq!(
            plan.step("Status").map(|s| &s.decision),
            Some(&PlanDecision::UpToDate)
        );
    }

    #[test]
    fn test_action_display() {
        assert_eq!(create("Title").to_string(), "create TEXT field \"Title\"");
        let merge = ApplyAction::MergeOptions {
            target_field_id: "p9".to_string(),
            options_to_add: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(merge.to_string(), "add 2 option(s) to field p9");
    }

    #[test]
    fn test_action_serializes_with_kind_tag() {
        let json = serde_json::to_value(create("Title")).unwrap();
        assert_eq!(json["kind"], "create_field");
        assert_eq!(json["field_type"], "TEXT");
    }

    #[test]
    fn test_report_counts() {
        let now = Utc::now();
        let report = ApplyReport {
            destination_id: "dest".to_string(),
            applied: vec![
                AppliedAction {
                    action: create("Title"),
                    created_field_id: Some("p1".to_string()),
                },
                AppliedAction {
                    action: ApplyAction::MergeOptions {
                        target_field_id: "p2".to_string(),
                        options_to_add: vec!["A".to_string(), "B".to_string()],
                    },
                    created_field_id: None,
                },
            ],
            started_at: now,
            finished_at: now,
        };
        assert_eq!(report.created_count(), 1);
        assert_eq!(report.merged_count(), 1);
        assert_eq!(report.options_added(), 2);
    }
}
