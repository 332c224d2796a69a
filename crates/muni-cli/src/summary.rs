use std::collections::BTreeSet;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use muni_ingest::DatasetRegistry;
use muni_model::{HistoricalSeries, Indicator, IndicatorTable, MunicipalityKey, REPORT_YEARS};
use muni_report::{UNAVAILABLE_TEXT, format_population, format_value};

/// Indicators down the side, report years across the top.
pub fn print_indicator_table(result: &IndicatorTable) {
    println!("Municipality: {}", result.municipality);
    println!(
        "Population {}: {}",
        REPORT_YEARS[0],
        format_population(result.reference_population)
    );

    let mut table = Table::new();
    let mut header = vec![header_cell("Indicator")];
    header.extend(result.rows.iter().map(|row| header_cell(&row.year.to_string())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=result.rows.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for indicator in Indicator::ALL {
        let mut cells = vec![Cell::new(indicator.label())];
        for row in &result.rows {
            cells.push(value_cell(format_value(indicator, row.get(indicator))));
        }
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn print_history_table(series: &HistoricalSeries) {
    println!("Municipality: {}", series.municipality);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Total"),
        header_cell("Men"),
        header_cell("Women"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for point in &series.points {
        table.add_row(vec![
            Cell::new(point.year),
            value_cell(format_population(point.total)),
            value_cell(format_population(point.men)),
            value_cell(format_population(point.women)),
        ]);
    }
    println!("{table}");
}

pub fn print_municipality_list(keys: &[MunicipalityKey]) {
    if keys.is_empty() {
        println!("No municipalities match.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Municipality")]);
    apply_table_style(&mut table);
    for key in keys {
        table.add_row(vec![
            Cell::new(key.code()).fg(Color::Blue),
            Cell::new(key.name()),
        ]);
    }
    println!("{table}");
    println!("{} municipalities", keys.len());
}

pub fn print_dataset_summary(
    registry: &DatasetRegistry,
    municipality_count: usize,
    years: &BTreeSet<u16>,
    indicator_count: usize,
) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Key column"),
        header_cell("Join"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for dataset in registry.tables() {
        table.add_row(vec![
            Cell::new(dataset.kind().name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(dataset.key_column()),
            Cell::new(dataset.join()),
            Cell::new(dataset.row_count()),
            Cell::new(dataset.column_count()),
        ]);
    }
    println!("{table}");

    let years: Vec<String> = years.iter().map(u16::to_string).collect();
    println!("Municipalities: {municipality_count}");
    println!("Population years: {}", years.join(", "));
    println!("Indicators: {indicator_count}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn value_cell(text: String) -> Cell {
    if text == UNAVAILABLE_TEXT {
        dim_cell(text)
    } else {
        Cell::new(text)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
