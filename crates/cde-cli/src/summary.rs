use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cde_model::{ConfidenceLevel, Severity, Violation};

use crate::commands::MapResult;

pub fn print_summary(result: &MapResult) {
    let document = &result.document;
    println!("Input: {}", result.input.display());
    println!("Mapping document: {}", result.output.display());
    println!("Registry: {}", document.registry_fingerprint);
    if !document.complete {
        println!("Batch: partial");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Strategy"),
        header_cell("Confidence"),
        header_cell("Mappings"),
        header_cell("Share"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let total = document.mappings.len();
    for count in document.tally() {
        table.add_row(vec![
            Cell::new(count.strategy),
            confidence_cell(count.confidence),
            count_cell(count.mappings, Color::White),
            dim_cell(share(count.mappings, total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("rejected").fg(Color::DarkGrey),
        dim_cell("-"),
        count_cell(document.rejected.len(), Color::Red),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_violation_table(&document.validation.violations);
    println!(
        "Validation: {} error(s), {} warning(s), {} distinct slot(s)",
        document.validation.error_count(),
        document.validation.warning_count(),
        document.validation.distinct_slots
    );
    if !document.rejected.is_empty() {
        eprintln!("Rejected records:");
        for error in &document.rejected {
            eprintln!("- {error}");
        }
    }
}

fn print_violation_table(violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    let mut ordered: Vec<&Violation> = violations.iter().collect();
    ordered.sort_by_key(|violation| severity_rank(violation.severity));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Variable"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for violation in ordered {
        table.add_row(vec![
            severity_cell(violation.severity),
            Cell::new(violation.rule),
            match &violation.mapping {
                Some(reference) => Cell::new(reference),
                None => dim_cell("-"),
            },
            Cell::new(&violation.message),
        ]);
    }
    println!();
    println!("Violations:");
    println!("{table}");
}

/// Two-column key/value table used by `cde explain`.
pub fn print_decision(rows: &[(&str, String)]) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    for (key, value) in rows {
        table.add_row(vec![header_cell(key), Cell::new(value)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

fn confidence_cell(confidence: ConfidenceLevel) -> Cell {
    let color = match confidence {
        ConfidenceLevel::Exact => Color::Green,
        ConfidenceLevel::High => Color::Cyan,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Magenta,
        ConfidenceLevel::DatasetLocal => Color::DarkGrey,
    };
    Cell::new(confidence).fg(color)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 0,
        Severity::Warning => 1,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
