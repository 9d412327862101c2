//! Logical rectangle to controller window
//!
//! The controller addresses RAM by column (0..=255) and page (8 rows, 0..=20).
//! A draw request arrives in the host's logical coordinates and goes through,
//! in this order:
//!
//! 1. gap offset on all four edges
//! 2. Y mirror, on the X pair when axes are swapped (it becomes physical Y)
//! 3. axis swap
//! 4. rows to pages
//!
//! Mirroring happens before the swap so the reflected axis matches the layout
//! the [`remap`](crate::remap) engine produces.

use log::debug;

use crate::error::{MAX_COLUMNS, MAX_PAGES};

/// Rows per RAM page
pub const PAGE_HEIGHT: i32 = 8;

/// Rows spanned by display RAM, the axis the hardware Y mirror reflects
pub const MIRROR_SPAN: i32 = MAX_PAGES as i32 * PAGE_HEIGHT;

/// Draw region in the host's coordinates, end-exclusive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogicalRect {
    pub x_start: i32,
    pub y_start: i32,
    pub x_end: i32,
    pub y_end: i32,
}

impl LogicalRect {
    pub const fn new(x_start: i32, y_start: i32, x_end: i32, y_end: i32) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    fn offset(self, gap: Gap) -> Self {
        Self {
            x_start: self.x_start.saturating_add(gap.x),
            y_start: self.y_start.saturating_add(gap.y),
            x_end: self.x_end.saturating_add(gap.x),
            y_end: self.y_end.saturating_add(gap.y),
        }
    }

    fn swapped(self) -> Self {
        Self {
            x_start: self.y_start,
            y_start: self.x_start,
            x_end: self.y_end,
            y_end: self.x_end,
        }
    }
}

/// Run-time scan orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisState {
    /// Logical X/Y exchanged relative to the physical scan
    pub swap_axes: bool,
    /// Logical Y reflected
    pub y_mirror: bool,
}

/// Viewport offset added to every draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gap {
    pub x: i32,
    pub y: i32,
}

/// Controller RAM window, bounds inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalWindow {
    pub column_start: u8,
    pub column_end: u8,
    pub page_start: u8,
    pub page_end: u8,
}

impl PhysicalWindow {
    /// Columns in the window
    pub fn columns(&self) -> usize {
        usize::from(self.column_end - self.column_start) + 1
    }

    /// Pages in the window
    pub fn pages(&self) -> usize {
        usize::from(self.page_end - self.page_start) + 1
    }

    /// Bytes the controller expects after WRITE_RAM
    pub fn byte_count(&self) -> usize {
        self.pages() * self.columns()
    }
}

/// A physical rectangle the controller cannot address
///
/// Coordinates are after gap, mirror and swap, end-exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidWindow {
    pub x_start: i32,
    pub y_start: i32,
    pub x_end: i32,
    pub y_end: i32,
}

/// Reflect an end-exclusive span inside `[0, span)`
///
/// Applying it twice with the same `span` gives back the input, for spans
/// inside the controller range. Far out-of-range values saturate.
pub const fn mirror(start: i32, end: i32, span: i32) -> (i32, i32) {
    (span.saturating_sub(end), span.saturating_sub(start))
}

/// Map a logical rectangle to the controller window
pub fn to_physical(
    rect: LogicalRect,
    axes: AxisState,
    gap: Gap,
) -> Result<PhysicalWindow, InvalidWindow> {
    let mut r = rect.offset(gap);
    debug!(
        "after gap: ({}, {}) -> ({}, {}), swap_axes={}",
        r.x_start, r.y_start, r.x_end, r.y_end, axes.swap_axes
    );

    if axes.y_mirror {
        if axes.swap_axes {
            (r.x_start, r.x_end) = mirror(r.x_start, r.x_end, MIRROR_SPAN);
        } else {
            (r.y_start, r.y_end) = mirror(r.y_start, r.y_end, MIRROR_SPAN);
        }
    }

    if axes.swap_axes {
        r = r.swapped();
        debug!(
            "after swap: ({}, {}) -> ({}, {})",
            r.x_start, r.y_start, r.x_end, r.y_end
        );
    }

    let in_range = 0 <= r.x_start
        && r.x_start < r.x_end
        && r.x_end <= i32::from(MAX_COLUMNS)
        && 0 <= r.y_start
        && r.y_start < r.y_end
        && r.y_end <= MIRROR_SPAN;
    if !in_range {
        return Err(InvalidWindow {
            x_start: r.x_start,
            y_start: r.y_start,
            x_end: r.x_end,
            y_end: r.y_end,
        });
    }

    // Bounds checked above, every value fits in a byte
    let window = PhysicalWindow {
        column_start: r.x_start as u8,
        column_end: (r.x_end - 1) as u8,
        page_start: (r.y_start / PAGE_HEIGHT) as u8,
        page_end: ((r.y_end - 1) / PAGE_HEIGHT) as u8,
    };
    debug!(
        "pages {} -> {} ({}), columns {} -> {}",
        window.page_start,
        window.page_end,
        window.pages(),
        window.column_start,
        window.column_end
    );
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: AxisState = AxisState {
        swap_axes: false,
        y_mirror: false,
    };

    #[test]
    fn mirror_span_covers_all_pages() {
        assert_eq!(MIRROR_SPAN, 168);
    }

    #[test]
    fn identity_without_swap_mirror_or_gap() {
        for y_start in (0..128).step_by(3) {
            for y_end in (y_start + 1..=128).step_by(5) {
                for (x_start, x_end) in [(0, 256), (0, 1), (17, 99), (255, 256)] {
                    let rect = LogicalRect::new(x_start, y_start, x_end, y_end);
                    let window = to_physical(rect, PLAIN, Gap::default()).unwrap();
                    assert_eq!(i32::from(window.page_start), y_start / 8);
                    assert_eq!(i32::from(window.page_end), (y_end - 1) / 8);
                    assert_eq!(i32::from(window.column_start), x_start);
                    assert_eq!(i32::from(window.column_end), x_end - 1);
                }
            }
        }
    }

    #[test]
    fn mirror_is_involutive() {
        for span in [128, 168, 256] {
            for (start, end) in [(0, 8), (3, 77), (0, span), (40, 41)] {
                let (s, e) = mirror(start, end, span);
                assert_eq!(mirror(s, e, span), (start, end));
            }
        }
    }

    #[test]
    fn landscape_first_page_row() {
        let window = to_physical(LogicalRect::new(0, 0, 256, 8), PLAIN, Gap::default()).unwrap();
        assert_eq!((window.column_start, window.column_end), (0, 255));
        assert_eq!((window.page_start, window.page_end), (0, 0));
        assert_eq!(window.byte_count(), 256);
    }

    #[test]
    fn swapped_strip_becomes_columns() {
        let axes = AxisState {
            swap_axes: true,
            y_mirror: false,
        };
        let window = to_physical(LogicalRect::new(0, 0, 128, 8), axes, Gap::default()).unwrap();
        assert_eq!((window.page_start, window.page_end), (0, 15));
        assert_eq!((window.column_start, window.column_end), (0, 7));
        assert_eq!(window.byte_count(), 128);
    }

    #[test]
    fn y_mirror_without_swap_reflects_rows() {
        let axes = AxisState {
            swap_axes: false,
            y_mirror: true,
        };
        let window = to_physical(LogicalRect::new(0, 0, 256, 8), axes, Gap::default()).unwrap();
        assert_eq!((window.page_start, window.page_end), (20, 20));
        assert_eq!((window.column_start, window.column_end), (0, 255));
    }

    #[test]
    fn y_mirror_with_swap_reflects_logical_x() {
        let axes = AxisState {
            swap_axes: true,
            y_mirror: true,
        };
        let window = to_physical(LogicalRect::new(0, 0, 128, 8), axes, Gap::default()).unwrap();
        // X 0..128 -> 40..168, then becomes the row range
        assert_eq!((window.page_start, window.page_end), (5, 20));
        assert_eq!((window.column_start, window.column_end), (0, 7));
        assert_eq!(window.byte_count(), 16 * 8);
    }

    #[test]
    fn gap_applies_before_mirror() {
        let axes = AxisState {
            swap_axes: false,
            y_mirror: true,
        };
        let gap = Gap { x: 4, y: 8 };
        let window = to_physical(LogicalRect::new(0, 0, 16, 8), axes, gap).unwrap();
        // rows 8..16 -> 152..160
        assert_eq!((window.page_start, window.page_end), (19, 19));
        assert_eq!((window.column_start, window.column_end), (4, 19));
    }

    #[test]
    fn partial_pages_round_outwards() {
        let window = to_physical(LogicalRect::new(10, 5, 20, 17), PLAIN, Gap::default()).unwrap();
        assert_eq!((window.page_start, window.page_end), (0, 2));
        assert_eq!(window.byte_count(), 3 * 10);
    }

    #[test]
    fn rejects_out_of_range_and_empty() {
        let gap = Gap::default();
        assert!(to_physical(LogicalRect::new(0, 0, 257, 8), PLAIN, gap).is_err());
        assert!(to_physical(LogicalRect::new(-1, 0, 8, 8), PLAIN, gap).is_err());
        assert!(to_physical(LogicalRect::new(0, 0, 8, 169), PLAIN, gap).is_err());
        assert!(to_physical(LogicalRect::new(8, 0, 8, 8), PLAIN, gap).is_err());

        let err = to_physical(LogicalRect::new(0, 0, 8, 8), PLAIN, Gap { x: -2, y: 0 })
            .unwrap_err();
        assert_eq!(
            err,
            InvalidWindow {
                x_start: -2,
                y_start: 0,
                x_end: 6,
                y_end: 8
            }
        );
    }

    #[test]
    fn extreme_coordinates_saturate_into_rejection() {
        let far = LogicalRect::new(i32::MAX - 4, 0, i32::MAX, 8);
        assert!(to_physical(far, PLAIN, Gap { x: 10, y: 0 }).is_err());

        let near = LogicalRect::new(0, 0, 8, 8);
        assert!(to_physical(near, PLAIN, Gap { x: i32::MIN, y: i32::MIN }).is_err());

        let tall = LogicalRect::new(0, i32::MIN, 8, 8);
        let mirrored = AxisState {
            swap_axes: false,
            y_mirror: true,
        };
        assert!(to_physical(tall, mirrored, Gap::default()).is_err());

        let wide = LogicalRect::new(i32::MIN, 0, 8, 8);
        let swapped = AxisState {
            swap_axes: true,
            y_mirror: true,
        };
        assert!(to_physical(wide, swapped, Gap::default()).is_err());
    }

    #[test]
    fn full_ram_window_is_addressable() {
        let window =
            to_physical(LogicalRect::new(0, 0, 256, MIRROR_SPAN), PLAIN, Gap::default()).unwrap();
        assert_eq!((window.page_start, window.page_end), (0, 20));
        assert_eq!(window.byte_count(), 21 * 256);
    }
}
