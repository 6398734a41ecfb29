//! Table output for listings and summaries

use prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE;
use prettytable::{Cell, Row, Table};

/// Create an empty table with bold column titles
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
    ));
    table
}

/// Append one row; every cell is rendered with its `Display` impl
pub fn add_table_row<I>(table: &mut Table, cells: I)
where
    I: IntoIterator,
    I::Item: ToString,
{
    table.add_row(Row::new(
        cells
            .into_iter()
            .map(|cell| Cell::new(&cell.to_string()))
            .collect(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_accept_mixed_sources() {
        let mut table = create_table(&["Name", "Size"]);
        add_table_row(&mut table, ["barrel.dff", "2048"]);
        add_table_row(&mut table, vec![String::from("cone.dff"), 4096.to_string()]);

        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("barrel.dff"));
        assert!(rendered.contains("4096"));
    }
}
