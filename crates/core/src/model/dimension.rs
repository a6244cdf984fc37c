use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of talent dimensions measured by the assessment.
pub const DIMENSION_COUNT: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("unknown dimension code: {0}")]
    UnknownCode(char),
}

/// The ten talent dimensions, modeled after the theory of multiple
/// intelligences.
///
/// Declaration order is the canonical `A`..`J` order: it fixes the axis
/// order of the radar chart and breaks ties when scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Linguistic,
    LogicalMathematical,
    Spatial,
    Intrapersonal,
    Interpersonal,
    BodilyKinesthetic,
    Musical,
    Naturalist,
    Creative,
    Aesthetic,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::Linguistic,
        Dimension::LogicalMathematical,
        Dimension::Spatial,
        Dimension::Intrapersonal,
        Dimension::Interpersonal,
        Dimension::BodilyKinesthetic,
        Dimension::Musical,
        Dimension::Naturalist,
        Dimension::Creative,
        Dimension::Aesthetic,
    ];

    /// Single-letter code, `A`..`J`.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Dimension::Linguistic => 'A',
            Dimension::LogicalMathematical => 'B',
            Dimension::Spatial => 'C',
            Dimension::Intrapersonal => 'D',
            Dimension::Interpersonal => 'E',
            Dimension::BodilyKinesthetic => 'F',
            Dimension::Musical => 'G',
            Dimension::Naturalist => 'H',
            Dimension::Creative => 'I',
            Dimension::Aesthetic => 'J',
        }
    }

    /// Short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Dimension::Linguistic => "Linguistic",
            Dimension::LogicalMathematical => "Logical-mathematical",
            Dimension::Spatial => "Spatial",
            Dimension::Intrapersonal => "Intrapersonal",
            Dimension::Interpersonal => "Interpersonal",
            Dimension::BodilyKinesthetic => "Bodily-kinesthetic",
            Dimension::Musical => "Musical",
            Dimension::Naturalist => "Naturalist",
            Dimension::Creative => "Creative",
            Dimension::Aesthetic => "Aesthetic",
        }
    }

    /// Full name used in summary sentences.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Dimension::Linguistic => "Linguistic talent",
            Dimension::LogicalMathematical => "Logical-mathematical talent",
            Dimension::Spatial => "Spatial talent",
            Dimension::Intrapersonal => "Intrapersonal talent",
            Dimension::Interpersonal => "Interpersonal talent",
            Dimension::BodilyKinesthetic => "Bodily-kinesthetic talent",
            Dimension::Musical => "Musical talent",
            Dimension::Naturalist => "Naturalist talent",
            Dimension::Creative => "Creative talent",
            Dimension::Aesthetic => "Aesthetic talent",
        }
    }

    /// Position in canonical order, 0..DIMENSION_COUNT.
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Converts a code letter (`A`..`J`) back into a `Dimension`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionError::UnknownCode` for any other character.
    pub fn from_code(code: char) -> Result<Self, DimensionError> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.code() == code)
            .ok_or(DimensionError::UnknownCode(code))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => Err(DimensionError::UnknownCode(s.chars().next().unwrap_or('?'))),
        }
    }
}
