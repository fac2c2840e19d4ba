use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn create_cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Colors a check or job conclusion: green for success, red for failures,
/// yellow for anything still pending or skipped.
pub fn conclusion_cell(conclusion: Option<&str>) -> Cell {
    match conclusion {
        Some("success") => Cell::new("success").fg(TableColor::Green),
        Some(text @ ("failure" | "timed_out" | "startup_failure" | "cancelled")) => {
            Cell::new(text).fg(TableColor::Red)
        }
        Some(text) => Cell::new(text).fg(TableColor::Yellow),
        None => Cell::new("pending").fg(TableColor::DarkGrey),
    }
}

pub fn more_rows(hidden: usize, columns: usize) -> Vec<Cell> {
    let mut row = vec![Cell::new(format!("... and {hidden} more")).fg(TableColor::DarkGrey)];
    row.extend(vec![Cell::new(""); columns.saturating_sub(1)]);
    row
}
