#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    First,
    Up,
    Down,
}

/// Tracks which ranked result is current. The position is clamped to
/// `[0, len - 1]`; with an empty result list the cursor reports no
/// position at all. `reset` is called whenever the result list is
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCursor {
    position: usize,
    len: usize,
}

impl SelectionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, len: usize) {
        self.position = 0;
        self.len = len;
    }

    pub fn apply(&mut self, direction: MoveDirection) {
        if self.len == 0 {
            return;
        }

        self.position = match direction {
            MoveDirection::First => 0,
            MoveDirection::Up => self.position.saturating_sub(1),
            // Clamp strictly to len - 1; one historical variant clamped to
            // len, which lets the cursor step past the last row.
            MoveDirection::Down => (self.position + 1).min(self.len - 1),
        };
    }

    pub fn position(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.position)
        }
    }
}
