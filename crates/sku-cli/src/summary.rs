use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sku_model::ABSENT_MARKER;
use sku_standards::{DoctorReport, FindingKind, SeriesRegistry};

use sku_cli::types::GenerateResult;

pub fn print_summary(result: &GenerateResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Name"),
        header_cell("Sizes"),
        header_cell("Ratios"),
        header_cell("Excluded"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.series {
        table.add_row(vec![
            code_cell(&summary.code),
            Cell::new(&summary.name),
            Cell::new(summary.sizes),
            Cell::new(summary.ratios),
            count_cell(summary.excluded_pairs, Color::Yellow),
            Cell::new(summary.rows),
            output_cell(summary.output.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new("All series")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.total_rows()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_series_table(registry: &SeriesRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Name"),
        header_cell("Sizes"),
        header_cell("Ratios"),
        header_cell("Shaft"),
        header_cell("Backlash"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for entry in registry.entries() {
        let spec = &entry.spec;
        let shaft = if spec.has_shaft() {
            Cell::new(spec.shaft_options().join(", "))
        } else {
            dim_cell(ABSENT_MARKER)
        };
        table.add_row(vec![
            code_cell(&entry.code),
            Cell::new(spec.name()),
            Cell::new(spec.sizes().len()),
            Cell::new(spec.ratios().len()),
            shaft,
            Cell::new(spec.backlash_options().join(", ")),
            Cell::new(entry.rules.len()),
        ]);
    }
    println!("{table}");
}

pub fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Rules"),
        header_cell("Excluded"),
        header_cell("Rows"),
        header_cell("Findings"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for audit in &report.series {
        table.add_row(vec![
            code_cell(&audit.code),
            Cell::new(audit.rules),
            Cell::new(audit.excluded_pairs),
            Cell::new(audit.rows),
            count_cell(audit.findings.len(), Color::Yellow),
        ]);
    }
    println!("{table}");

    if report.finding_count() == 0 {
        println!("No findings.");
        return;
    }
    let mut findings = Table::new();
    findings.set_header(vec![
        header_cell("Series"),
        header_cell("Kind"),
        header_cell("Subject"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut findings);
    for finding in report.findings() {
        findings.add_row(vec![
            code_cell(&finding.series),
            kind_cell(finding.kind),
            Cell::new(&finding.subject),
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Findings:");
    println!("{findings}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: FindingKind) -> Cell {
    match kind {
        FindingKind::UnknownSize | FindingKind::UnknownRatio => {
            Cell::new(kind.as_str()).fg(Color::Red)
        }
        FindingKind::RedundantRule => Cell::new(kind.as_str()).fg(Color::DarkGrey),
        FindingKind::DeadRatio | FindingKind::EmptySize => {
            Cell::new(kind.as_str()).fg(Color::Yellow)
        }
    }
}

fn output_cell(path: Option<&Path>) -> Cell {
    match path.and_then(Path::file_name) {
        Some(name) => Cell::new(name.to_string_lossy()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
