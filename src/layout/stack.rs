//! LayoutStack: Nested frames that hand out equally sized slots.
//!
//! Each frame divides its content area (the frame rectangle minus its margin)
//! into `capacity` slots along one axis, separated by `gap`. Widgets pull
//! slots from the top frame in call order. Frames are pushed and popped every
//! render frame; the backing `Vec` is kept so steady-state frames do not
//! allocate.

use super::rect::{Margin, Orientation, Rect};
use thiserror::Error;

/// Misuse of the layout stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A frame was opened with zero slots.
    #[error("layout frame capacity must be at least 1")]
    ZeroCapacity,
    /// A frame was opened with more slots than fit in cell coordinates.
    #[error("layout frame capacity {capacity} exceeds {max}", max = i32::MAX)]
    CapacityTooLarge {
        /// Requested capacity.
        capacity: usize,
    },
    /// `next_slot` or `end_frame` was called with no open frame.
    #[error("layout stack is empty")]
    EmptyStack,
    /// More slots were requested than the frame was opened with.
    #[error("layout frame already handed out all {capacity} slots")]
    SlotsExhausted {
        /// Capacity of the exhausted frame.
        capacity: usize,
    },
    /// A render frame finished with frames still open (or too many closed).
    #[error("layout stack unbalanced at end of frame: depth {depth}, expected {expected}")]
    Unbalanced {
        /// Depth observed at the end of the render frame.
        depth: usize,
        /// Depth the render frame started with.
        expected: usize,
    },
}

/// One level of rectangle subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutFrame {
    /// Outer rectangle of the frame.
    pub rect: Rect,
    /// Axis along which slots are laid out.
    pub orientation: Orientation,
    /// Inset applied before partitioning.
    pub margin: Margin,
    /// Space between adjacent slots.
    pub gap: i32,
    /// Number of slots (between 1 and `i32::MAX`).
    pub capacity: usize,
    /// Number of slots already handed out.
    pub cursor: usize,
}

impl LayoutFrame {
    /// Size of one slot along the frame's axis, never negative.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn slot_extent(&self) -> i32 {
        let content = self.rect.inset(self.margin).extent(self.orientation);
        let slots = self.capacity as i32;
        let gaps = self.gap.saturating_mul(slots - 1);
        (content.saturating_sub(gaps) / slots).max(0)
    }

    /// Rectangle of slot `index`, without touching the cursor.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn slot(&self, index: usize) -> Rect {
        let content = self.rect.inset(self.margin);
        let extent = self.slot_extent();
        let offset = extent.saturating_add(self.gap).saturating_mul(index as i32);

        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(content.x + offset, content.y, extent, content.height)
            }
            Orientation::Vertical => {
                Rect::new(content.x, content.y + offset, content.width, extent)
            }
        }
    }
}

/// LIFO stack of layout frames.
#[derive(Clone, Debug, Default)]
pub struct LayoutStack {
    frames: Vec<LayoutFrame>,
}

impl LayoutStack {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Push a frame dividing `rect` into `capacity` slots.
    pub fn begin_frame(
        &mut self,
        rect: Rect,
        orientation: Orientation,
        margin: Margin,
        gap: i32,
        capacity: usize,
    ) -> Result<(), LayoutError> {
        if capacity == 0 {
            return Err(LayoutError::ZeroCapacity);
        }
        if i32::try_from(capacity).is_err() {
            return Err(LayoutError::CapacityTooLarge { capacity });
        }
        self.frames.push(LayoutFrame {
            rect,
            orientation,
            margin,
            gap,
            capacity,
            cursor: 0,
        });
        Ok(())
    }

    /// Hand out the next slot of the top frame.
    pub fn next_slot(&mut self) -> Result<Rect, LayoutError> {
        let frame = self.frames.last_mut().ok_or(LayoutError::EmptyStack)?;
        if frame.cursor >= frame.capacity {
            return Err(LayoutError::SlotsExhausted {
                capacity: frame.capacity,
            });
        }
        let rect = frame.slot(frame.cursor);
        frame.cursor += 1;
        Ok(rect)
    }

    /// Pop the top frame.
    pub fn end_frame(&mut self) -> Result<LayoutFrame, LayoutError> {
        self.frames.pop().ok_or(LayoutError::EmptyStack)
    }

    /// The top frame, if any.
    pub fn peek(&self) -> Option<&LayoutFrame> {
        self.frames.last()
    }

    /// Number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frame is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop every open frame, keeping the allocation.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Close frames until at most `depth` remain.
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Verify that the depth is back to `expected`.
    pub fn check_balance(&self, expected: usize) -> Result<(), LayoutError> {
        let depth = self.depth();
        if depth == expected {
            Ok(())
        } else {
            Err(LayoutError::Unbalanced { depth, expected })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(stack: &mut LayoutStack, n: usize) -> Vec<Rect> {
        (0..n).map(|_| stack.next_slot().unwrap()).collect()
    }

    #[test]
    fn test_two_horizontal_slots_with_gap() {
        let mut stack = LayoutStack::new();
        stack
            .begin_frame(Rect::new(0, 0, 500, 100), Orientation::Horizontal, Margin::ZERO, 10, 2)
            .unwrap();

        assert_eq!(stack.next_slot().unwrap(), Rect::new(0, 0, 245, 100));
        assert_eq!(stack.next_slot().unwrap(), Rect::new(255, 0, 245, 100));
        stack.end_frame().unwrap();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_vertical_with_margin() {
        let mut stack = LayoutStack::new();
        stack
            .begin_frame(
                Rect::new(10, 20, 40, 100),
                Orientation::Vertical,
                Margin::new(5, 3, 2, 4),
                2,
                3,
            )
            .unwrap();

        // content: x=12, y=25, w=34, h=92; slot = (92 - 4) / 3 = 29
        let got = slots(&mut stack, 3);
        assert_eq!(got[0], Rect::new(12, 25, 34, 29));
        assert_eq!(got[1], Rect::new(12, 56, 34, 29));
        assert_eq!(got[2], Rect::new(12, 87, 34, 29));
    }

    #[test]
    fn test_partition_sums_to_content_within_remainder() {
        let cases = [
            (Rect::new(0, 0, 97, 13), Orientation::Horizontal, Margin::uniform(1), 3, 7),
            (Rect::new(5, 5, 80, 61), Orientation::Vertical, Margin::new(2, 1, 0, 0), 1, 4),
            (Rect::new(0, 0, 120, 40), Orientation::Horizontal, Margin::uniform(1), 1, 2),
            (Rect::new(-3, 2, 33, 33), Orientation::Vertical, Margin::ZERO, 0, 5),
            (Rect::new(0, 0, 1000, 1), Orientation::Horizontal, Margin::ZERO, 7, 13),
        ];

        for (rect, orientation, margin, gap, capacity) in cases {
            let mut stack = LayoutStack::new();
            stack.begin_frame(rect, orientation, margin, gap, capacity).unwrap();
            let got = slots(&mut stack, capacity);

            let content = rect.inset(margin).extent(orientation);
            let used: i32 = got.iter().map(|r| r.extent(orientation)).sum::<i32>()
                + gap * (i32::try_from(capacity).unwrap() - 1);
            let remainder = content - used;
            assert!(remainder >= 0, "{rect:?}: overflowed by {}", -remainder);
            assert!(
                usize::try_from(remainder).unwrap() < capacity,
                "{rect:?}: remainder {remainder} >= capacity {capacity}"
            );

            // Slots are contiguous apart from the gap.
            for pair in got.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match orientation {
                    Orientation::Horizontal => assert_eq!(a.right() + gap, b.x),
                    Orientation::Vertical => assert_eq!(a.bottom() + gap, b.y),
                }
            }
        }
    }

    #[test]
    fn test_nested_frames() {
        let mut stack = LayoutStack::new();
        stack
            .begin_frame(Rect::new(0, 0, 120, 40), Orientation::Horizontal, Margin::uniform(1), 1, 2)
            .unwrap();
        let left = stack.next_slot().unwrap();
        assert_eq!(left, Rect::new(1, 1, 58, 38));

        stack
            .begin_frame(left, Orientation::Horizontal, Margin::ZERO, 1, 4)
            .unwrap();
        let inner = slots(&mut stack, 2);
        assert_eq!(inner[0], Rect::new(1, 1, 13, 38));
        assert_eq!(inner[1], Rect::new(15, 1, 13, 38));
        stack.end_frame().unwrap();

        // Outer cursor resumes where it left off.
        assert_eq!(stack.next_slot().unwrap(), Rect::new(60, 1, 58, 38));
        stack.end_frame().unwrap();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut stack = LayoutStack::new();
        let err = stack
            .begin_frame(Rect::new(0, 0, 10, 10), Orientation::Vertical, Margin::ZERO, 0, 0)
            .unwrap_err();
        assert_eq!(err, LayoutError::ZeroCapacity);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_capacity_beyond_cell_range_rejected() {
        let mut stack = LayoutStack::new();
        let rect = Rect::new(0, 0, 100, 10);
        for capacity in [1usize << 31, 1usize << 32, usize::MAX] {
            let err = stack
                .begin_frame(rect, Orientation::Horizontal, Margin::ZERO, 1, capacity)
                .unwrap_err();
            assert_eq!(err, LayoutError::CapacityTooLarge { capacity });
            assert_eq!(stack.depth(), 0);
            assert_eq!(stack.next_slot().unwrap_err(), LayoutError::EmptyStack);
        }

        let largest = usize::try_from(i32::MAX).unwrap();
        stack
            .begin_frame(rect, Orientation::Horizontal, Margin::ZERO, 1, largest)
            .unwrap();
        assert_eq!(stack.next_slot().unwrap(), Rect::new(0, 0, 0, 10));
    }

    #[test]
    fn test_end_on_empty_is_error() {
        let mut stack = LayoutStack::new();
        assert_eq!(stack.end_frame().unwrap_err(), LayoutError::EmptyStack);
        assert_eq!(stack.next_slot().unwrap_err(), LayoutError::EmptyStack);
    }

    #[test]
    fn test_slots_exhausted() {
        let mut stack = LayoutStack::new();
        stack
            .begin_frame(Rect::new(0, 0, 10, 10), Orientation::Horizontal, Margin::ZERO, 0, 2)
            .unwrap();
        slots(&mut stack, 2);
        assert_eq!(
            stack.next_slot().unwrap_err(),
            LayoutError::SlotsExhausted { capacity: 2 }
        );
    }

    #[test]
    fn test_oversized_margin_and_gap_clamp_to_zero() {
        let mut stack = LayoutStack::new();
        stack
            .begin_frame(Rect::new(0, 0, 10, 10), Orientation::Horizontal, Margin::uniform(6), 0, 2)
            .unwrap();
        let slot = stack.next_slot().unwrap();
        assert_eq!(slot.width, 0);
        assert_eq!(slot.height, 0);
        stack.end_frame().unwrap();

        stack
            .begin_frame(Rect::new(0, 0, 10, 10), Orientation::Vertical, Margin::ZERO, 20, 3)
            .unwrap();
        for slot in slots(&mut stack, 3) {
            assert!(slot.height >= 0 && slot.width >= 0);
            assert_eq!(slot.height, 0);
        }
    }

    #[test]
    fn test_balance_check() {
        let mut stack = LayoutStack::new();
        let start = stack.depth();
        for depth in 1..=4 {
            stack
                .begin_frame(Rect::new(0, 0, 64, 64), Orientation::Vertical, Margin::ZERO, 0, depth)
                .unwrap();
        }
        assert_eq!(
            stack.check_balance(start),
            Err(LayoutError::Unbalanced { depth: 4, expected: 0 })
        );
        for _ in 0..4 {
            stack.end_frame().unwrap();
        }
        assert_eq!(stack.check_balance(start), Ok(()));
        assert!(stack.end_frame().is_err());
    }
}
