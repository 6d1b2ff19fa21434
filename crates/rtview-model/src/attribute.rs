//! Identifiers for the settable sides of the triangle.

use std::fmt;
use std::str::FromStr;

/// An independently settable quantity of the model.
///
/// The hypotenuse is derived and therefore has no `Attribute`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    Base,
    Height,
}

impl Attribute {
    /// Every attribute, in notification-registration order.
    pub const ALL: [Attribute; 2] = [Attribute::Base, Attribute::Height];

    /// Lowercase name, as used in scripts and log fields.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no [`Attribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAttributeError(pub String);

impl fmt::Display for ParseAttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown attribute '{}' (expected base or height)", self.0)
    }
}

impl std::error::Error for ParseAttributeError {}

impl FromStr for Attribute {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "height" => Ok(Self::Height),
            _ => Err(ParseAttributeError(s.to_owned())),
        }
    }
}
