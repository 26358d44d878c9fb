//! Table and JSON rendering of command results.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use csvbind::CsvRow;
use csvbind_cli::dynamic::{DynamicRecord, FieldSpec};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::DarkGrey)
}

pub fn print_files(files: &[PathBuf]) {
    for path in files {
        println!("{}", path.display());
    }
}

pub fn rows_table(rows: &[CsvRow]) -> Table {
    let mut table = Table::new();
    if let Some(first) = rows.first() {
        table.set_header(first.headers().map(header_cell).collect::<Vec<_>>());
    }
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row.iter().map(|(_, value)| Cell::new(value)).collect::<Vec<_>>());
    }
    table
}

pub fn records_table(specs: &[FieldSpec], records: &[DynamicRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(
        specs
            .iter()
            .map(|spec| header_cell(&spec.name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for record in records {
        let cells: Vec<Cell> = specs
            .iter()
            .map(|spec| match record.get(&spec.name) {
                Some(value) => Cell::new(value),
                None => dim_cell("-"),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

/// Writes one JSON object per line.
pub fn write_json_lines<T: Serialize>(items: &[T]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for item in items {
        serde_json::to_writer(&mut out, item).context("serialize record")?;
        writeln!(out).context("write stdout")?;
    }
    Ok(())
}
