//! Catalog lookup types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::lifecycle::UnknownVariant;

/// Visibility of a lookup entity (category or country) in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    /// Shown in catalog filters.
    Active,
    /// Hidden from the storefront but kept for existing references.
    Inactive,
}

impl EntityStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(UnknownVariant {
                kind: "entity status",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_round_trips_through_storage_form() -> TestResult {
        for status in [EntityStatus::Active, EntityStatus::Inactive] {
            assert_eq!(status.as_str().parse::<EntityStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("Archived".parse::<EntityStatus>().is_err());
    }
}
