use serde::{Deserialize, Serialize};

/// Lit/dark state of a single board cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Dark,
    Lit,
}

impl Cell {
    pub const fn is_lit(self) -> bool {
        matches!(self, Self::Lit)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Lit,
            Self::Lit => Self::Dark,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Dark
    }
}
