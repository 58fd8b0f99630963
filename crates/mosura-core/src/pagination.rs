//! Pagination engine: turns an ordered item list into a windowed button grid
//! with prev/next navigation encoded as stateless callback data.
//!
//! Out-of-range policy: a page past the last non-empty page is clamped to the
//! last valid page. The same input always renders the same grid; the item list
//! is never mutated.

use crate::{
    keyboard::{InlineButton, InlineKeyboard},
    Result,
};

const PREV_LABEL: &str = "⬅️";
const NEXT_LABEL: &str = "➡️";

/// The slice of a list shown for one pagination step, plus its position.
/// Derived per render, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page index, 0-based, already clamped.
    pub page: usize,
    pub page_size: usize,
    /// Total item count of the full list.
    pub total: usize,
    /// Start index of the slice (inclusive).
    pub start: usize,
    /// End index of the slice (exclusive).
    pub end: usize,
}

impl PageWindow {
    /// Compute the window for `requested`, clamping to the last valid page.
    pub fn compute(total: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let last = if total == 0 {
            0
        } else {
            (total - 1) / page_size
        };
        let page = requested.min(last);
        let start = (page * page_size).min(total);
        let end = (start + page_size).min(total);

        Self {
            page,
            page_size,
            total,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether items remain after this slice.
    pub fn has_next(&self) -> bool {
        self.end < self.total
    }
}

/// Windowed keyboard builder over a borrowed item list.
///
/// The three closures mirror the render inputs: a per-item label, per-item
/// button data, and button data for a jump to a given page. Data producers
/// return `Result` so an oversized token surfaces immediately.
pub struct Paginator<'a, T, L, D, P>
where
    L: Fn(&T, usize) -> String,
    D: Fn(&T, usize) -> Result<String>,
    P: Fn(usize) -> Result<String>,
{
    items: &'a [T],
    item_label: L,
    item_data: D,
    page_data: P,
}

impl<'a, T, L, D, P> Paginator<'a, T, L, D, P>
where
    L: Fn(&T, usize) -> String,
    D: Fn(&T, usize) -> Result<String>,
    P: Fn(usize) -> Result<String>,
{
    pub fn new(items: &'a [T], item_label: L, item_data: D, page_data: P) -> Self {
        Self {
            items,
            item_label,
            item_data,
            page_data,
        }
    }

    /// Render one page as a button grid (`columns` item buttons per row)
    /// followed by a navigation row: prev iff not on the first page, next iff
    /// items remain after the slice.
    pub fn render_page(
        &self,
        page: usize,
        page_size: usize,
        columns: usize,
    ) -> Result<(InlineKeyboard, PageWindow)> {
        let window = PageWindow::compute(self.items.len(), page_size, page);

        let mut buttons = Vec::with_capacity(window.len());
        for item in &self.items[window.start..window.end] {
            let label = (self.item_label)(item, window.page);
            let data = (self.item_data)(item, window.page)?;
            buttons.push(InlineButton::new(label, data));
        }
        let mut keyboard = InlineKeyboard::from_grid(buttons, columns);

        let mut nav = Vec::new();
        if window.page > 0 {
            nav.push(InlineButton::new(
                PREV_LABEL,
                (self.page_data)(window.page - 1)?,
            ));
        }
        if window.has_next() {
            nav.push(InlineButton::new(
                NEXT_LABEL,
                (self.page_data)(window.page + 1)?,
            ));
        }
        keyboard.push_row(nav);

        Ok((keyboard, window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn fixture() -> Vec<String> {
        (0..50).map(|i| format!("item-{i}")).collect()
    }

    fn paginator(
        items: &[String],
    ) -> Paginator<
        '_,
        String,
        impl Fn(&String, usize) -> String,
        impl Fn(&String, usize) -> Result<String>,
        impl Fn(usize) -> Result<String>,
    > {
        Paginator::new(
            items,
            |item, _| item.clone(),
            |item, _| Ok(format!("pick:{item}")),
            |page| Ok(format!("goto:{page}")),
        )
    }

    fn nav_row(keyboard: &InlineKeyboard) -> Vec<String> {
        keyboard
            .rows
            .last()
            .map(|row| row.iter().map(|b| b.data.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let items = fixture();
        let (keyboard, window) = paginator(&items).render_page(0, 8, 1).unwrap();

        assert_eq!((window.start, window.end), (0, 8));
        assert_eq!(keyboard.rows.len(), 9); // 8 items + nav row
        assert_eq!(keyboard.rows[0][0].label, "item-0");
        assert_eq!(nav_row(&keyboard), vec!["goto:1"]);
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let items = fixture();
        let (keyboard, window) = paginator(&items).render_page(6, 8, 1).unwrap();

        assert_eq!((window.start, window.end), (48, 50));
        assert_eq!(window.len(), 2);
        assert!(!window.has_next());
        assert_eq!(nav_row(&keyboard), vec!["goto:5"]);
    }

    #[test]
    fn out_of_range_page_clamps_to_last_consistently() {
        let items = fixture();
        let pager = paginator(&items);
        let (first_kb, first_win) = pager.render_page(100, 8, 1).unwrap();
        let (again_kb, again_win) = pager.render_page(100, 8, 1).unwrap();

        assert_eq!(first_win.page, 6);
        assert_eq!((first_win.start, first_win.end), (48, 50));
        assert_eq!(first_win, again_win);
        assert_eq!(first_kb, again_kb);
    }

    #[test]
    fn item_data_receives_the_rendered_page() {
        let items = fixture();
        let pager = Paginator::new(
            &items,
            |item: &String, _| item.clone(),
            |_, page| Ok(format!("pick-on:{page}")),
            |page| Ok(format!("goto:{page}")),
        );

        // Item buttons carry the clamped page they were rendered on.
        let (keyboard, window) = pager.render_page(100, 8, 1).unwrap();
        assert_eq!(window.page, 6);
        assert_eq!(keyboard.rows[0][0].data, "pick-on:6");
    }

    #[test]
    fn rendering_is_deterministic() {
        let items = fixture();
        let pager = paginator(&items);
        let a = pager.render_page(3, 8, 2).unwrap();
        let b = pager.render_page(3, 8, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_list_renders_empty_window_without_nav() {
        let items: Vec<String> = Vec::new();
        let (keyboard, window) = paginator(&items).render_page(0, 8, 1).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.total, 0);
        assert!(keyboard.is_empty());
    }

    #[test]
    fn token_failure_is_surfaced_immediately() {
        let items = fixture();
        let pager = Paginator::new(
            &items,
            |item: &String, _| item.clone(),
            |_, _| {
                Err(Error::TokenTooLarge {
                    len: 100,
                    limit: 64,
                })
            },
            |page| Ok(format!("goto:{page}")),
        );
        assert!(matches!(
            pager.render_page(0, 8, 1),
            Err(Error::TokenTooLarge { .. })
        ));
    }

    #[test]
    fn window_math_handles_degenerate_sizes() {
        let w = PageWindow::compute(5, 0, 0);
        assert_eq!(w.page_size, 1);
        assert_eq!((w.start, w.end), (0, 1));

        let w = PageWindow::compute(8, 8, 1);
        assert_eq!(w.page, 0); // exactly one page, page 1 clamps back
    }
}
