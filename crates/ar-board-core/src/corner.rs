use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical corner of the physical board delimited by four markers.
///
/// The discriminants follow the cyclic walk used for edge vectors:
/// top-left -> top-right -> bottom-right -> bottom-left -> top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardCorner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl BoardCorner {
    /// All corners in cyclic order.
    pub const ALL: [BoardCorner; 4] = [
        BoardCorner::TopLeft,
        BoardCorner::TopRight,
        BoardCorner::BottomRight,
        BoardCorner::BottomLeft,
    ];

    /// Position of this corner in [`BoardCorner::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next corner along the cyclic walk.
    #[inline]
    pub fn next(self) -> BoardCorner {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Previous corner along the cyclic walk.
    #[inline]
    pub fn prev(self) -> BoardCorner {
        Self::ALL[(self.index() + 3) % 4]
    }

    pub fn name(self) -> &'static str {
        match self {
            BoardCorner::TopLeft => "top_left",
            BoardCorner::TopRight => "top_right",
            BoardCorner::BottomRight => "bottom_right",
            BoardCorner::BottomLeft => "bottom_left",
        }
    }
}

impl fmt::Display for BoardCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_walk_visits_every_corner() {
        let mut c = BoardCorner::TopLeft;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(c);
            c = c.next();
        }
        assert_eq!(c, BoardCorner::TopLeft);
        assert_eq!(seen, BoardCorner::ALL.to_vec());
    }

    #[test]
    fn prev_inverts_next() {
        for c in BoardCorner::ALL {
            assert_eq!(c.next().prev(), c);
            assert_eq!(BoardCorner::ALL[c.index()], c);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&BoardCorner::BottomLeft).expect("serialize");
        assert_eq!(json, "\"bottom_left\"");
    }
}
