use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use msd_core::{
    ApplyAction, ApplyPlan, ApplyReport, CreateReason, ExecutionFailure, PlanDecision,
};
use msd_model::{CollectionSummary, MetadataField};

use crate::commands::CopyResult;

pub fn print_collections(collections: &[&CollectionSummary]) {
    if collections.is_empty() {
        println!("No libraries with metadata fields found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Library"), header_cell("ID")]);
    apply_table_style(&mut table);
    for collection in collections {
        table.add_row(vec![
            Cell::new(&collection.name).add_attribute(Attribute::Bold),
            dim_cell(&collection.id),
        ]);
    }
    println!("{table}");
}

pub fn print_fields(fields: &[&MetadataField]) {
    if fields.is_empty() {
        println!("No matching fields.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Options"),
        header_cell("ID"),
    ]);
    apply_table_style(&mut table);
    for field in fields {
        table.add_row(vec![
            Cell::new(&field.name).add_attribute(Attribute::Bold),
            Cell::new(field.field_type.as_str()).fg(Color::Blue),
            options_cell(&field.options),
            dim_cell(&field.id),
        ]);
    }
    println!("{table}");
}

pub fn print_copy_result(result: &CopyResult) {
    match result {
        CopyResult::Invalid(outcome) => {
            if let Some(message) = outcome.warning_message() {
                eprintln!("warning: {message}");
            }
        }
        CopyResult::Completed {
            destination,
            plan,
            report,
        } => {
            print_plan(plan);
            match report {
                Some(report) => print_report(report),
                None => println!(
                    "Dry run: {} action(s) planned for {destination}, nothing applied.",
                    plan.action_count()
                ),
            }
        }
        CopyResult::Failed(failure) => print_failure(failure),
    }
}

pub fn print_plan(plan: &ApplyPlan) {
    println!("Mode: {}", plan.mode);
    if plan.steps.is_empty() {
        println!("Nothing selected.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Decision"),
        header_cell("Change"),
    ]);
    apply_plan_table_style(&mut table);
    for step in &plan.steps {
        table.add_row(vec![
            Cell::new(&step.field_name).add_attribute(Attribute::Bold),
            decision_cell(&step.decision),
            step.action.as_ref().map_or_else(|| dim_cell("-"), action_cell),
        ]);
    }
    println!("{table}");
}

fn print_report(report: &ApplyReport) {
    let elapsed = report.finished_at - report.started_at;
    println!(
        "Applied {} action(s) to {} in {} ms: {} created, {} merged ({} option(s) added).",
        report.applied.len(),
        report.destination_id,
        elapsed.num_milliseconds(),
        report.created_count(),
        report.merged_count(),
        report.options_added(),
    );
}

fn print_failure(failure: &ExecutionFailure) {
    eprintln!("error: {failure}");
    eprintln!("{}", failure.error.user_message());
    if failure.applied.is_empty() {
        eprintln!("No changes were made.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Applied before failure"), header_cell("New ID")]);
    apply_table_style(&mut table);
    for applied in &failure.applied {
        table.add_row(vec![
            Cell::new(applied.action.to_string()),
            applied
                .created_field_id
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    eprintln!("{table}");
}

fn decision_label(decision: &PlanDecision) -> String {
    match decision {
        PlanDecision::Create(CreateReason::CreateNewMode) => "create".to_string(),
        PlanDecision::Create(CreateReason::EmptyDestination) => {
            "create (destination empty)".to_string()
        }
        PlanDecision::Create(CreateReason::NoMatch) => "create (no match)".to_string(),
        PlanDecision::Create(CreateReason::TypeMismatch { existing }) => {
            format!("create (existing is {existing})")
        }
        PlanDecision::Merge => "merge".to_string(),
        PlanDecision::UpToDate => "up to date".to_string(),
    }
}

fn decision_cell(decision: &PlanDecision) -> Cell {
    let label = decision_label(decision);
    match decision {
        PlanDecision::Create(CreateReason::TypeMismatch { .. }) => Cell::new(label)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        PlanDecision::Create(_) => Cell::new(label).fg(Color::Green),
        PlanDecision::Merge => Cell::new(label).fg(Color::Cyan),
        PlanDecision::UpToDate => dim_cell(label),
    }
}

fn action_detail(action: &ApplyAction) -> String {
    match action {
        ApplyAction::CreateField {
            field_type,
            options,
            ..
        } if options.is_empty() => format!("new {field_type} field"),
        ApplyAction::CreateField {
            field_type,
            options,
            ..
        } => format!("new {field_type} field: {}", options.join(", ")),
        ApplyAction::MergeOptions { options_to_add, .. } => {
            format!("+ {}", options_to_add.join(", "))
        }
    }
}

fn action_cell(action: &ApplyAction) -> Cell {
    Cell::new(action_detail(action))
}

fn options_cell(options: &[String]) -> Cell {
    if options.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(options.join(", "))
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_plan_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Center);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msd_model::FieldType;

    #[test]
    fn test_decision_labels() {
        assert_eq!(
            decision_label(&PlanDecision::Create(CreateReason::TypeMismatch {
                existing: FieldType::Text
            })),
            "create (existing is TEXT)"
        );
        assert_eq!(decision_label(&PlanDecision::UpToDate), "up to date");
    }

    #[test]
    fn test_action_detail() {
        let action = ApplyAction::MergeOptions {
            target_field_id: "p1".to_string(),
            options_to_add: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(action_detail(&action), "+ B, C");

        let action = ApplyAction::CreateField {
            name: "Title".to_string(),
            field_type: FieldType::Text,
            options: Vec::new(),
        };
        assert_eq!(action_detail(&action), "new TEXT field");
    }
}
