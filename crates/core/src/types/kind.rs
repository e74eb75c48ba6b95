//! The closed set of concrete product kinds.
//!
//! The shop sells two kinds of product with distinct attribute sets.
//! Rather than resolving a kind tag through a runtime type registry, the
//! set is a closed union: adding a third kind is a compile-time change
//! that the exhaustive matches below surface.

use serde::{Deserialize, Serialize};

/// A concrete product kind, identified in URLs by its lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Notebook,
    Smartphone,
}

/// Error returned when a kind tag does not name a known product kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product kind: {0}")]
pub struct UnknownProductKind(pub String);

impl ProductKind {
    /// All kinds, in the order they appear on the home page.
    pub const ALL: [Self; 2] = [Self::Notebook, Self::Smartphone];

    /// The URL / storage tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Smartphone => "smartphone",
        }
    }

    /// The database table holding products of this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Notebook => "notebook",
            Self::Smartphone => "smartphone",
        }
    }

    /// Human-readable plural label, used by category pages and the sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Notebook => "Notebooks",
            Self::Smartphone => "Smartphones",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = UnknownProductKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notebook" => Ok(Self::Notebook),
            "smartphone" => Ok(Self::Smartphone),
            other => Err(UnknownProductKind(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_tags_round_trip() {
        for kind in ProductKind::ALL {
            assert_eq!(ProductKind::from_str(kind.as_str()), Ok(kind));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = ProductKind::from_str("toaster").unwrap_err();
        assert_eq!(err, UnknownProductKind("toaster".to_owned()));
        assert!(ProductKind::from_str("Notebook").is_err());
    }
}
