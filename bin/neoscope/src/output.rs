//! Table output using comfy-table.

use clickhouse::{CatalogueQuery, Cell, Table};
use comfy_table::{Attribute, CellAlignment, ContentArrangement};

fn header(names: impl IntoIterator<Item = impl ToString>) -> Vec<comfy_table::Cell> {
    names
        .into_iter()
        .map(|name| comfy_table::Cell::new(name.to_string()).add_attribute(Attribute::Bold))
        .collect()
}

fn render_cell(cell: &Cell) -> comfy_table::Cell {
    let alignment = match cell {
        Cell::Int(_) | Cell::Float(_) => CellAlignment::Right,
        Cell::Text(_) | Cell::Bool(_) | Cell::Date(_) => CellAlignment::Left,
    };
    comfy_table::Cell::new(cell.to_string()).set_alignment(alignment)
}

/// Render a result set with its columns in statement order.
pub fn render_table(table: &Table) -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic).set_header(header(&table.columns));
    for row in &table.rows {
        out.add_row(row.iter().map(render_cell).collect::<Vec<_>>());
    }
    out
}

/// Render the catalogue listing.
pub fn render_catalogue() -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(["id", "description"]));
    for query in CatalogueQuery::ALL {
        out.add_row(vec![
            comfy_table::Cell::new(query.id()),
            comfy_table::Cell::new(query.label()),
        ]);
    }
    out
}

/// Format a titled result set. Empty results keep their header row.
pub fn format_result(title: &str, table: &Table) -> String {
    let footer = if table.is_empty() {
        "No results to display.".to_owned()
    } else {
        format!("{} row(s)", table.len())
    };
    format!("\n=== {title} ===\n{}\n{footer}", render_table(table))
}
