use serde::Serialize;

/// Content category of a catalog entry.
///
/// Variants are declared in precedence order: when several entries feed one
/// merge group, the smallest category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Games,
    Demos,
    BonusDiscs,
    Applications,
    Coverdiscs,
    /// Missing or unrecognized category label.
    Unknown,
}

impl Category {
    /// Parse a catalog category label. Unrecognized labels map to
    /// [`Category::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Games" => Self::Games,
            "Demos" => Self::Demos,
            "Bonus Discs" => Self::BonusDiscs,
            "Applications" => Self::Applications,
            "Coverdiscs" => Self::Coverdiscs,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Games => "Games",
            Self::Demos => "Demos",
            Self::BonusDiscs => "Bonus Discs",
            Self::Applications => "Applications",
            Self::Coverdiscs => "Coverdiscs",
            Self::Unknown => "unknown",
        }
    }

    /// Keep whichever of two categories takes precedence.
    pub fn most_significant(self, other: Self) -> Self {
        self.min(other)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
