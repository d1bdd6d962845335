use crate::model::{Placement, Rect};

/// A rectangular region of the canvas tree.
///
/// A free slot has no children and is free space of exactly `w x h` at
/// `(x, y)`. A used slot holds a placed block at its origin; the rest of its
/// area is covered by its `right` (same-row remainder) and `down` (below
/// remainder) children. Children are owned outright, nothing points upward.
#[derive(Debug, Clone)]
pub struct Slot {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    state: SlotState,
}

#[derive(Debug, Clone)]
enum SlotState {
    Free,
    Used { right: Box<Slot>, down: Box<Slot> },
}

impl Slot {
    pub(crate) fn free(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            state: SlotState::Free,
        }
    }

    /// A used slot at the canvas origin wrapping two existing subtrees.
    pub(crate) fn joined(w: f64, h: f64, right: Slot, down: Slot) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w,
            h,
            state: SlotState::Used {
                right: Box::new(right),
                down: Box::new(down),
            },
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn width(&self) -> f64 {
        self.w
    }

    pub fn height(&self) -> f64 {
        self.h
    }

    pub fn is_used(&self) -> bool {
        matches!(self.state, SlotState::Used { .. })
    }

    pub fn right(&self) -> Option<&Slot> {
        match &self.state {
            SlotState::Used { right, .. } => Some(right.as_ref()),
            SlotState::Free => None,
        }
    }

    pub fn down(&self) -> Option<&Slot> {
        match &self.state {
            SlotState::Used { down, .. } => Some(down.as_ref()),
            SlotState::Free => None,
        }
    }

    /// Depth-first search for a free slot of at least `w x h`.
    /// Used slots try `right` before `down`; the first match wins.
    pub fn find(&self, w: f64, h: f64) -> Option<&Slot> {
        match &self.state {
            SlotState::Used { right, down } => right.find(w, h).or_else(|| down.find(w, h)),
            SlotState::Free => (w <= self.w && h <= self.h).then_some(self),
        }
    }

    /// Finds a free slot for `w x h` and splits it, returning the placement.
    pub(crate) fn insert(&mut self, w: f64, h: f64) -> Option<Placement> {
        if let SlotState::Used { right, down } = &mut self.state {
            return right.insert(w, h).or_else(|| down.insert(w, h));
        }
        if w <= self.w && h <= self.h {
            Some(self.split(w, h))
        } else {
            None
        }
    }

    // Exact fits produce zero-area children; they never accept a positive size.
    fn split(&mut self, w: f64, h: f64) -> Placement {
        let down = Slot::free(self.x, self.y + h, self.w, self.h - h);
        let right = Slot::free(self.x + w, self.y, self.w - w, h);
        self.state = SlotState::Used {
            right: Box::new(right),
            down: Box::new(down),
        };
        Placement {
            x: self.x,
            y: self.y,
        }
    }

    /// Free leaves with non-zero area, in search order.
    pub fn free_rects(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.collect_free(&mut out);
        out
    }

    fn collect_free(&self, out: &mut Vec<Rect>) {
        match &self.state {
            SlotState::Used { right, down } => {
                right.collect_free(out);
                down.collect_free(out);
            }
            SlotState::Free => {
                if self.w > 0.0 && self.h > 0.0 {
                    out.push(self.bounds());
                }
            }
        }
    }

    /// Number of levels in the tree rooted here (a lone free slot has depth 1).
    pub fn depth(&self) -> usize {
        match &self.state {
            SlotState::Used { right, down } => 1 + right.depth().max(down.depth()),
            SlotState::Free => 1,
        }
    }
}
