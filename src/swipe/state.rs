#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Positive, // Dragged right, check indicator
    Negative, // Dragged left, cross indicator
}

impl Direction {
    pub fn of(offset: f32) -> Self {
        if offset > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resolution {
    Commit(Direction), // Card flies out, deck advances
    Cancel,            // Card snaps back, deck unchanged
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Resolving(Resolution),
    Ended,
}
