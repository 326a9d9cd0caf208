/// Active column filter. The text is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    column: usize,
    text: String,
}

impl FilterState {
    /// Returns `None` for empty text, which means "no filter"
    pub fn new(column: usize, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { column, text })
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Builds a column-scoped substring filter one keystroke at a time
#[derive(Debug, Clone, Default)]
pub struct FilterAccumulator {
    state: Option<FilterState>,
}

impl FilterAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `ch` when `column` is the active filter column, otherwise start
    /// over on `column`. Text typed on the previous column is dropped.
    pub fn push(&mut self, column: usize, ch: char) {
        match &mut self.state {
            Some(state) if state.column == column => state.text.push(ch),
            _ => {
                self.state = Some(FilterState {
                    column,
                    text: ch.to_string(),
                });
            }
        }
    }

    /// Drop the last character; an emptied filter is cleared outright
    pub fn backspace(&mut self) {
        if let Some(state) = &mut self.state {
            state.text.pop();
            if state.text.is_empty() {
                self.state = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    pub fn current(&self) -> Option<&FilterState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}
