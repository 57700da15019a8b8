use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ExtractionReport;

pub fn print_summary(report: &ExtractionReport) {
    println!("Output: {}", report.output_dir.display());
    println!(
        "Instances: {} discovered, {} processed, {} skipped",
        report.instance_count,
        report.summary.instances_processed,
        report.summary.skipped.len()
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let mut total_rows = 0usize;
    for (name, rows) in &report.summary.table_rows {
        total_rows += rows;
        table.add_row(vec![Cell::new(name), row_count_cell(*rows)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_skipped(report);
}

fn print_skipped(report: &ExtractionReport) {
    if report.summary.skipped.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Skipped instance"), header_cell("Reason")]);
    apply_table_style(&mut table);
    for skipped in &report.summary.skipped {
        table.add_row(vec![
            Cell::new(skipped.path.display()).fg(Color::Yellow),
            Cell::new(&skipped.reason),
        ]);
    }
    println!();
    println!("Skipped:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn row_count_cell(rows: usize) -> Cell {
    if rows == 0 {
        Cell::new(rows).fg(Color::DarkGrey)
    } else {
        Cell::new(rows)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
