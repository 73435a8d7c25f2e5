//! Named cells of the 3x3 board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the nine cells, numbered 0-8 in row-major order.
///
/// Displays as a label such as `Top-left`; players type the 1-based cell
/// number or the label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum Position {
    /// Cell 0.
    #[strum(serialize = "Top-left")]
    TopLeft,
    /// Cell 1.
    #[strum(serialize = "Top-center")]
    TopCenter,
    /// Cell 2.
    #[strum(serialize = "Top-right")]
    TopRight,
    /// Cell 3.
    #[strum(serialize = "Middle-left")]
    MiddleLeft,
    /// Cell 4.
    #[strum(serialize = "Center")]
    Center,
    /// Cell 5.
    #[strum(serialize = "Middle-right")]
    MiddleRight,
    /// Cell 6.
    #[strum(serialize = "Bottom-left")]
    BottomLeft,
    /// Cell 7.
    #[strum(serialize = "Bottom-center")]
    BottomCenter,
    /// Cell 8.
    #[strum(serialize = "Bottom-right")]
    BottomRight,
}

impl Position {
    /// Display label, e.g. `Middle-right`.
    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Parse from a label or a 1-based cell number (1-9).
    ///
    /// Cell numbers match what [`Board::display`](crate::Board::display) prints in empty squares.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }
        if s.is_empty() {
            return None;
        }

        // Labels match case-insensitively, with or without the hyphen.
        let wanted = s.to_lowercase().replace([' ', '_'], "-");
        <Position as strum::IntoEnumIterator>::iter().find(|pos| pos.label().to_lowercase() == wanted)
    }

    /// Board index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Cell at a board index, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Every cell in scan order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];
}
