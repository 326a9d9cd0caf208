//! Typed table model: cursor, sorting, selection and substring filtering.
//!
//! Rows keep a stable id (their index in the loaded snapshot). Sorting and
//! filtering only re-derive the list of visible ids; selection is keyed by id
//! so it survives both.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use crate::core::filter::FilterState;
use crate::domain::config::{ColumnKind, ColumnSpec};
use crate::domain::error::{RowdeskError, RowdeskResult};

/// Width reserved for the trailing selection marker column
pub const SELECT_MARKER_WIDTH: u16 = 3;

/// A typed cell
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Int(_) => ColumnKind::Integer,
            Value::Text(_) => ColumnKind::Text,
        }
    }

    fn contains_lowercase(&self, needle: &str) -> bool {
        self.to_string().to_lowercase().contains(needle)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

pub type Record = Vec<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub order: SortOrder,
}

/// A visible row as the renderer needs it
#[derive(Debug)]
pub struct RowView<'a> {
    pub id: usize,
    pub values: &'a [Value],
    pub selected: bool,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct TableModel {
    columns: Vec<ColumnSpec>,
    rows: Vec<Record>,
    visible: Vec<usize>,
    selected: BTreeSet<usize>,
    sort: Option<SortState>,
    filter: Option<FilterState>,
    cursor_column: usize,
    cursor_row: usize,
    offset: usize,
    width: u16,
    height: u16,
}

impl TableModel {
    pub fn new(columns: Vec<ColumnSpec>, rows: Vec<Record>) -> RowdeskResult<Self> {
        if columns.is_empty() {
            return Err(RowdeskError::data("A table needs at least one column"));
        }

        for (row_id, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(RowdeskError::data(format!(
                    "Row {} has {} values but {} columns are declared",
                    row_id,
                    row.len(),
                    columns.len()
                )));
            }
            for (value, column) in row.iter().zip(&columns) {
                if value.kind() != column.kind {
                    return Err(RowdeskError::data(format!(
                        "Row {} column '{}' expects {:?}, got {:?}",
                        row_id,
                        column.name,
                        column.kind,
                        value.kind()
                    )));
                }
            }
        }

        let mut table = Self {
            columns,
            visible: (0..rows.len()).collect(),
            rows,
            selected: BTreeSet::new(),
            sort: None,
            filter: None,
            cursor_column: 0,
            cursor_row: 0,
            offset: 0,
            width: 0,
            height: 0,
        };
        table.refresh_visible();
        Ok(table)
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.columns.get(column).map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible records in display order
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible.iter().map(move |&id| &self.rows[id])
    }

    // --- cursor ---------------------------------------------------------

    /// `(column, row)`, the row being an index into the visible rows
    pub fn cursor_location(&self) -> (usize, usize) {
        (self.cursor_column, self.cursor_row)
    }

    pub fn cursor_up(&mut self) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
        self.scroll_to_cursor();
    }

    pub fn cursor_down(&mut self) {
        if self.cursor_row + 1 < self.visible.len() {
            self.cursor_row += 1;
        }
        self.scroll_to_cursor();
    }

    pub fn cursor_left(&mut self) {
        self.cursor_column = self.cursor_column.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_column + 1 < self.columns.len() {
            self.cursor_column += 1;
        }
    }

    // --- sorting --------------------------------------------------------

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// A new column sorts ascending; the same column flips the order
    pub fn toggle_sort(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        let order = match self.sort {
            Some(SortState { column: current, order: SortOrder::Ascending }) if current == column => {
                SortOrder::Descending
            }
            _ => SortOrder::Ascending,
        };
        self.sort = Some(SortState { column, order });
        tracing::debug!(column, %order, "sort toggled");
        self.refresh_visible();
    }

    // --- filtering ------------------------------------------------------

    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    /// Case-insensitive substring match on the filter column. A filter on a
    /// column the table does not have is ignored.
    pub fn set_filter(&mut self, filter: Option<&FilterState>) {
        let filter = filter.filter(|f| f.column() < self.columns.len()).cloned();
        if filter != self.filter {
            self.filter = filter;
            self.refresh_visible();
        }
    }

    // --- selection ------------------------------------------------------

    pub fn is_selected(&self, row_id: usize) -> bool {
        self.selected.contains(&row_id)
    }

    /// Toggle the row under the cursor
    pub fn toggle_select(&mut self) {
        if let Some(&id) = self.visible.get(self.cursor_row) {
            if !self.selected.remove(&id) {
                self.selected.insert(id);
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.rows.len()).collect();
    }

    pub fn unselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.selected.len() == self.rows.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected records in load order
    pub fn selected_rows(&self) -> Vec<&Record> {
        self.selected.iter().map(|&id| &self.rows[id]).collect()
    }

    // --- geometry -------------------------------------------------------

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll_to_cursor();
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Lines available for rows; the header takes one
    pub fn body_height(&self) -> usize {
        usize::from(self.height.saturating_sub(1))
    }

    /// Per-column widths: the width left after the marker column and the
    /// one-cell gaps is shared by ratio, then raised to each minimum.
    pub fn column_widths(&self) -> Vec<u16> {
        let gaps = self.columns.len() as u32;
        let available = u32::from(self.width)
            .saturating_sub(u32::from(SELECT_MARKER_WIDTH))
            .saturating_sub(gaps);
        let total_ratio: u32 = self.columns.iter().map(|c| u32::from(c.ratio)).sum();

        self.columns
            .iter()
            .map(|c| {
                let share = if total_ratio == 0 {
                    0
                } else {
                    available * u32::from(c.ratio) / total_ratio
                };
                let share = u16::try_from(share).unwrap_or(u16::MAX);
                share.max(c.min_width)
            })
            .collect()
    }

    /// Range of visible-row indices that fits the body, cursor included
    pub fn visible_window(&self) -> Range<usize> {
        let body = self.body_height();
        let start = self.offset.min(self.visible.len());
        let end = (start + body).min(self.visible.len());
        start..end
    }

    pub fn window_rows(&self) -> Vec<RowView<'_>> {
        self.visible_window()
            .map(|index| {
                let id = self.visible[index];
                RowView {
                    id,
                    values: &self.rows[id],
                    selected: self.selected.contains(&id),
                    is_cursor: index == self.cursor_row,
                }
            })
            .collect()
    }

    fn scroll_to_cursor(&mut self) {
        let body = self.body_height();
        if body == 0 {
            self.offset = self.cursor_row;
            return;
        }
        if self.cursor_row < self.offset {
            self.offset = self.cursor_row;
        } else if self.cursor_row >= self.offset + body {
            self.offset = self.cursor_row + 1 - body;
        }
        let max_offset = self.visible.len().saturating_sub(body);
        self.offset = self.offset.min(max_offset);
    }

    fn refresh_visible(&mut self) {
        let needle = self.filter.as_ref().map(|f| (f.column(), f.text().to_lowercase()));
        let rows = &self.rows;

        let mut visible: Vec<usize> = (0..rows.len())
            .filter(|&id| match &needle {
                Some((column, text)) => rows[id][*column].contains_lowercase(text),
                None => true,
            })
            .collect();

        if let Some(SortState { column, order }) = self.sort {
            visible.sort_by(|&a, &b| {
                let ordering: Ordering = rows[a][column].cmp(&rows[b][column]);
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        self.visible = visible;
        self.cursor_row = self.cursor_row.min(self.visible.len().saturating_sub(1));
        self.scroll_to_cursor();
    }
}
