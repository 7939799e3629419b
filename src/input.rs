//! Input normalization: key presses and taps on registered screen regions.
//!
//! The render pass registers a [`ClickTarget`] for every tappable region;
//! the DOM mouse handler converts pixels to a terminal cell and asks
//! [`ClickState::hit_test`] which action lives there.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press from keyboard.
    Key(char),
    /// A tap on a registered target, identified by its action ID
    /// (see `yoga::actions`).
    Click(u16),
}

/// A tappable rectangle in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and click handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register the full width of `area` at `row`; rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Hit-test a terminal cell. Later registrations sit on top, so they win
    /// when targets overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Whether a screen width (in columns) should use the stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel offset into a cell index along one axis.
///
/// `offset` is relative to the grid container's edge; `extent` is the
/// container's pixel size along that axis and `cells` its cell count.
/// Returns `None` outside the grid or for degenerate inputs.
fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_basic() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_respects_columns() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(10, 0, 5, 3), 7);
        assert_eq!(cs.hit_test(9, 1), None);
        assert_eq!(cs.hit_test(10, 1), Some(7));
        assert_eq!(cs.hit_test(14, 2), Some(7));
        assert_eq!(cs.hit_test(15, 1), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 80, 24), 1);
        cs.add_click_target(Rect::new(0, 5, 80, 1), 2);
        assert_eq!(cs.hit_test(3, 5), Some(2));
        assert_eq!(cs.hit_test(3, 6), Some(1));
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(2, 10, 20, 3);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 13, 2);
        cs.add_row_target(area, 11, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(2, 11), Some(3));
        assert_eq!(cs.hit_test(1, 11), None);
    }

    #[test]
    fn clear_removes_all_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 1, 1), 1);
        cs.clear_targets();
        assert!(cs.targets.is_empty());
        assert_eq!(cs.hit_test(0, 0), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row_basic() {
        // 30 rows over 450px → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
    }

    #[test]
    fn pixel_conversion_rejects_degenerate_input() {
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_x_to_col(10.0, 800.0, 0), None);
    }

    #[test]
    fn pixel_to_col_basic() {
        // 80 cols over 800px → 10px per col
        assert_eq!(pixel_x_to_col(0.0, 800.0, 80), Some(0));
        assert_eq!(pixel_x_to_col(95.0, 800.0, 80), Some(9));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn tap_pipeline_hits_registered_row() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 40;
        cs.terminal_rows = 50;
        let panel = Rect::new(0, 8, 40, 7);
        cs.add_row_target(panel, 9, 100);
        cs.add_row_target(panel, 10, 101);

        // Center of row 10 on a 750px-tall, 400px-wide grid
        let row = pixel_y_to_row(10.0 * 15.0 + 7.5, 750.0, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(123.0, 400.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(101));
    }
}
