use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use echem_cli::pipeline::{ConversionResult, Inspection};
use echem_model::{FieldDescriptor, Schema};

pub fn print_conversions(results: &[ConversionResult], failures: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Device"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Table"),
        header_cell("Schema"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_rows = 0usize;
    for result in results {
        total_rows += result.rows;
        table.add_row(vec![
            Cell::new(result.input.display())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(result.device),
            Cell::new(result.rows),
            Cell::new(result.schema.field_names().join(", ")),
            output_cell(result.table_path.is_some()),
            output_cell(result.schema_path.is_some()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    for result in results {
        if let Some(path) = &result.table_path {
            println!("Table: {}", path.display());
        }
        if let Some(path) = &result.schema_path {
            println!("Schema: {}", path.display());
        }
    }
    if !failures.is_empty() {
        eprintln!("Errors:");
        for failure in failures {
            eprintln!("- {failure}");
        }
    }
}

pub fn print_inspection(inspection: &Inspection) {
    println!("File: {}", inspection.input.display());
    println!("Device: {}", inspection.device);
    println!("Header lines: {}", inspection.header_lines);
    println!("Delimiter: {:?}", inspection.delimiter);
    match inspection.decimal {
        Some(decimal) => println!("Decimal: {decimal:?}"),
        None => println!("Decimal: not detected"),
    }
    println!("Rows: {}", inspection.rows);
    println!("{}", schema_table(&inspection.schema));
}

pub fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Unit"),
        header_cell("Dimension"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for field in schema {
        table.add_row(vec![
            Cell::new(&field.name).add_attribute(Attribute::Bold),
            optional_cell(field.unit.as_deref()),
            optional_cell(field.dimension.map(|dimension| dimension.as_str())),
            description_cell(field),
        ]);
    }
    table
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn description_cell(field: &FieldDescriptor) -> Cell {
    if field.is_auto_generated() {
        return Cell::new("auto-generated").fg(Color::Yellow);
    }
    optional_cell(field.description.as_deref())
}

fn output_cell(written: bool) -> Cell {
    if written {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
