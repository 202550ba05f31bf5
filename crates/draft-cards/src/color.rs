use std::fmt::{Display, Formatter, Result};

/// Color identity bucket used for color-balancing the common slot.
/// `Multi` and `Colorless` cards never satisfy a WUBRG balance pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Multi,
    Colorless,
}

impl Color {
    /// The five single colors that color-balancing draws one of each from.
    pub const WUBRG: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn is_single(&self) -> bool {
        Self::WUBRG.contains(self)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Self::White => "W",
                Self::Blue => "U",
                Self::Black => "B",
                Self::Red => "R",
                Self::Green => "G",
                Self::Multi => "multi",
                Self::Colorless => "colorless",
            }
        )
    }
}
