//! Messenger-agnostic inline keyboard model.

/// A button grid. Rows render top to bottom, buttons left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

impl InlineKeyboard {
    /// Arrange buttons into rows of at most `columns` buttons, in order.
    pub fn from_grid(buttons: Vec<InlineButton>, columns: usize) -> Self {
        let columns = columns.max(1);
        let mut rows: Vec<Vec<InlineButton>> = Vec::new();
        for button in buttons {
            match rows.last_mut() {
                Some(row) if row.len() < columns => row.push(button),
                _ => rows.push(vec![button]),
            }
        }
        Self { rows }
    }

    /// Append a full row; empty rows are dropped.
    pub fn push_row(&mut self, row: Vec<InlineButton>) {
        if !row.is_empty() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(n: usize) -> Vec<InlineButton> {
        (0..n)
            .map(|i| InlineButton::new(format!("b{i}"), format!("d{i}")))
            .collect()
    }

    #[test]
    fn grid_chunks_in_order() {
        let kb = InlineKeyboard::from_grid(buttons(9), 4);
        let widths: Vec<usize> = kb.rows.iter().map(|r| r.len()).collect();
        assert_eq!(widths, vec![4, 4, 1]);
        assert_eq!(kb.rows[0][0].label, "b0");
        assert_eq!(kb.rows[2][0].label, "b8");
    }

    #[test]
    fn zero_columns_falls_back_to_one_per_row() {
        let kb = InlineKeyboard::from_grid(buttons(3), 0);
        assert_eq!(kb.rows.len(), 3);
    }

    #[test]
    fn empty_rows_are_dropped() {
        let mut kb = InlineKeyboard::default();
        kb.push_row(Vec::new());
        assert!(kb.is_empty());
        kb.push_row(buttons(1));
        assert_eq!(kb.rows.len(), 1);
    }
}
