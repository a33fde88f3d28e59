//! Drag session geometry
//!
//! Tracks the floating proxy and the placeholder slot while a row is dragged.
//! Indices are counted among the rows of the list *other* than the dragged one,
//! so the placeholder index on release is directly the reinsertion index.

/// Vertical extent of a row in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBox {
    pub top: f64,
    pub height: f64,
}

impl RowBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn mid(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Source row and final placeholder position of a finished drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dropped {
    pub source: usize,
    pub target: usize,
}

impl Dropped {
    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    source: usize,
    grab_offset: f64,
    proxy: RowBox,
    placeholder: usize,
}

impl DragSession {
    /// Start dragging row `source`, currently at `row`, grabbed at `pointer_y`.
    /// The placeholder starts in the row's own slot.
    pub fn begin(source: usize, row: RowBox, pointer_y: f64) -> Self {
        Self {
            source,
            grab_offset: pointer_y - row.top,
            proxy: row,
            placeholder: source,
        }
    }

    pub fn proxy_top(&self) -> f64 {
        self.proxy.top
    }

    /// Follow the pointer and recompute the placeholder slot.
    ///
    /// `others` are the remaining rows in document order. The placeholder goes before
    /// the first row whose midpoint lies below the proxy's midpoint, else at the end.
    pub fn pointer_moved(&mut self, pointer_y: f64, others: &[RowBox]) -> usize {
        self.proxy.top = pointer_y - self.grab_offset;
        let proxy_mid = self.proxy.mid();
        self.placeholder = others
            .iter()
            .position(|row| row.mid() > proxy_mid)
            .unwrap_or(others.len());
        self.placeholder
    }

    pub fn finish(self) -> Dropped {
        Dropped {
            source: self.source,
            target: self.placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rows of the given heights stacked from y = 0, minus the one at `skip`.
    fn others(heights: &[f64], skip: usize) -> Vec<RowBox> {
        let mut top = 0.0;
        let mut rows = Vec::new();
        for (i, h) in heights.iter().enumerate() {
            if i != skip {
                rows.push(RowBox::new(top, *h));
            }
            top += h;
        }
        rows
    }

    #[test]
    fn test_proxy_keeps_grab_offset() {
        let mut s = DragSession::begin(1, RowBox::new(40.0, 40.0), 55.0);
        s.pointer_moved(155.0, &[]);
        assert_eq!(s.proxy_top(), 140.0);
    }

    #[test]
    fn test_no_movement_drops_in_place() {
        let heights = [40.0, 40.0, 40.0];
        let mut s = DragSession::begin(1, RowBox::new(40.0, 40.0), 60.0);
        s.pointer_moved(60.0, &others(&heights, 1));
        assert_eq!(s.finish(), Dropped { source: 1, target: 1 });
    }

    #[test]
    fn test_drag_to_top() {
        let heights = [40.0, 40.0, 40.0];
        let mut s = DragSession::begin(2, RowBox::new(80.0, 40.0), 100.0);
        s.pointer_moved(5.0, &others(&heights, 2));
        let dropped = s.finish();
        assert_eq!(dropped, Dropped { source: 2, target: 0 });
        assert!(!dropped.is_noop());
    }

    #[test]
    fn test_drag_past_last_goes_to_end() {
        let heights = [40.0, 40.0, 40.0];
        let mut s = DragSession::begin(0, RowBox::new(0.0, 40.0), 20.0);
        assert_eq!(s.pointer_moved(500.0, &others(&heights, 0)), 2);
    }

    #[test]
    fn test_midpoint_comparison_with_uneven_rows() {
        // rows: a=[0,20) b=[20,120) c=[120,140); drag c
        let heights = [20.0, 100.0, 20.0];
        let mut s = DragSession::begin(2, RowBox::new(120.0, 20.0), 130.0);
        let rest = others(&heights, 2);

        // proxy mid at 75: above b's mid (70)? no -> after b
        assert_eq!(s.pointer_moved(75.0, &rest), 2);
        // proxy mid at 65: b's mid 70 is below -> before b
        assert_eq!(s.pointer_moved(65.0, &rest), 1);
        // proxy mid at 5: a's mid 10 is below -> first
        assert_eq!(s.pointer_moved(5.0, &rest), 0);
    }

    #[test]
    fn test_single_row_list() {
        let mut s = DragSession::begin(0, RowBox::new(0.0, 30.0), 15.0);
        assert_eq!(s.pointer_moved(-200.0, &[]), 0);
        assert!(s.finish().is_noop());
    }
}
