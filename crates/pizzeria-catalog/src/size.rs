//! Pizza sizes
//!
//! Provides [`PizzaSize`], serialized as a single letter so that cart JSON and
//! rule facts share one spelling.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Size of a pizza
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PizzaSize {
    /// 10'' pizza for one person
    #[serde(rename = "S")]
    Small,

    /// 12'' pizza for two persons
    #[serde(rename = "M")]
    Medium,

    /// 15'' pizza for four persons
    #[serde(rename = "L")]
    Large,
}

impl PizzaSize {
    /// All sizes, smallest first
    pub const ALL: [PizzaSize; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Wire code (`S`, `M`, `L`)
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }
}

impl Display for PizzaSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
