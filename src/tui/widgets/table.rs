use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::core::table::{SortOrder, TableModel, SELECT_MARKER_WIDTH};

use super::styles::Palette;

pub fn render_table(f: &mut Frame, area: Rect, table: &TableModel, palette: &Palette) {
    let (cursor_column, _) = table.cursor_location();

    let mut constraints: Vec<Constraint> = table
        .column_widths()
        .into_iter()
        .map(Constraint::Length)
        .collect();
    constraints.push(Constraint::Length(SELECT_MARKER_WIDTH));

    let header = Row::new(header_cells(table, palette)).style(palette.header);

    let rows: Vec<Row> = table
        .window_rows()
        .into_iter()
        .map(|row| {
            let mut cells: Vec<Cell> = row
                .values
                .iter()
                .enumerate()
                .map(|(column, value)| {
                    let cell = Cell::from(value.to_string());
                    if row.is_cursor && column == cursor_column {
                        cell.style(palette.cursor_cell)
                    } else {
                        cell
                    }
                })
                .collect();
            cells.push(Cell::from(if row.selected { "[x]" } else { "[ ]" }));

            let mut style = palette.plain;
            if row.selected {
                style = style.patch(palette.selected_row);
            }
            if row.is_cursor {
                style = style.patch(palette.cursor_row);
            }
            Row::new(cells).style(style)
        })
        .collect();

    let widget = Table::new(rows)
        .header(header)
        .widths(&constraints)
        .column_spacing(1);

    f.render_widget(widget, area);
}

fn header_cells<'a>(table: &'a TableModel, palette: &Palette) -> Vec<Cell<'a>> {
    let (cursor_column, _) = table.cursor_location();
    let sort = table.sort();
    let filter = table.filter();

    let mut cells: Vec<Cell> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let mut title = column.name.clone();
            if let Some(sort) = sort.filter(|s| s.column == index) {
                title.push_str(match sort.order {
                    SortOrder::Ascending => " ▲",
                    SortOrder::Descending => " ▼",
                });
            }
            if filter.map(|f| f.column()) == Some(index) {
                title.push_str(" *");
            }
            let cell = Cell::from(title);
            if index == cursor_column {
                cell.style(palette.focused)
            } else {
                cell
            }
        })
        .collect();
    cells.push(Cell::from(""));
    cells
}
