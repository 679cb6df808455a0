#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a contest.
///
/// Automatic transitions (`Scheduled -> Active -> Voting -> Completed`) are
/// driven exclusively by the lifecycle processor; `Cancelled` is only ever set
/// by an administrative action and is terminal.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ContestStatus {
    /// Created, submission window not yet open.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Scheduled"))]
    Scheduled,
    /// Submission window open.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Active"))]
    Active,
    /// Submission window closed, public voting open.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Voting"))]
    Voting,
    /// Voting window closed and results finalized.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Completed"))]
    Completed,
    /// Cancelled by an administrator. Terminal.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Cancelled"))]
    Cancelled,
}

impl ContestStatus {
    /// Returns true if no further automatic transition may occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// All possible status values.
    pub const ALL: &'static [ContestStatus] = &[
        Self::Scheduled,
        Self::Active,
        Self::Voting,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Voting => "Voting",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ContestStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid contest status '{0}'")]
pub struct ParseContestStatusError(String);

impl FromStr for ContestStatus {
    type Err = ParseContestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(Self::Scheduled),
            "Active" => Ok(Self::Active),
            "Voting" => Ok(Self::Voting),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseContestStatusError(s.to_string())),
        }
    }
}

/// Kind of contest, determines how it was created and scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ContestType {
    /// Auto-generated, one per calendar day.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Daily"))]
    Daily,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Weekly"))]
    Weekly,
    /// Manually created around a custom theme.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Themed"))]
    Themed,
}

/// How entries are ranked when a contest is finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ScoringMode {
    /// Ranked by like/dislike tallies.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Votes"))]
    Votes,
}

impl Default for ScoringMode {
    fn default() -> Self {
        Self::Votes
    }
}

/// Tolerance when checking that prize shares sum to 1.0.
const SHARE_SUM_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrizeDistributionError {
    #[error("prize distribution must not be empty")]
    Empty,
    #[error("prize share {0} is outside (0, 1]")]
    ShareOutOfRange(f64),
    #[error("prize shares sum to {0}, expected 1.0")]
    BadSum(f64),
}

/// Validate that prize distribution shares are each in (0, 1] and sum to 1.0.
pub fn validate_prize_distribution(shares: &[f64]) -> Result<(), PrizeDistributionError> {
    if shares.is_empty() {
        return Err(PrizeDistributionError::Empty);
    }
    for &share in shares {
        if !(share > 0.0 && share <= 1.0) {
            return Err(PrizeDistributionError::ShareOutOfRange(share));
        }
    }
    let sum: f64 = shares.iter().sum();
    if (sum - 1.0).abs() > SHARE_SUM_EPSILON {
        return Err(PrizeDistributionError::BadSum(sum));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_roundtrip() {
        for status in ContestStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            let parsed: ContestStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "Voting".parse::<ContestStatus>().unwrap(),
            ContestStatus::Voting
        );
        assert!("voting".parse::<ContestStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ContestStatus::Completed.is_terminal());
        assert!(ContestStatus::Cancelled.is_terminal());
        assert!(!ContestStatus::Scheduled.is_terminal());
        assert!(!ContestStatus::Active.is_terminal());
        assert!(!ContestStatus::Voting.is_terminal());
    }

    #[test]
    fn test_valid_prize_distribution() {
        assert!(validate_prize_distribution(&[0.6, 0.3, 0.1]).is_ok());
        assert!(validate_prize_distribution(&[1.0]).is_ok());
    }

    #[test]
    fn test_prize_distribution_rejects_bad_sum() {
        assert_eq!(
            validate_prize_distribution(&[0.5, 0.3]),
            Err(PrizeDistributionError::BadSum(0.8))
        );
    }

    #[test]
    fn test_prize_distribution_rejects_empty_and_out_of_range() {
        assert_eq!(
            validate_prize_distribution(&[]),
            Err(PrizeDistributionError::Empty)
        );
        assert!(matches!(
            validate_prize_distribution(&[1.5, -0.5]),
            Err(PrizeDistributionError::ShareOutOfRange(_))
        ));
        assert!(matches!(
            validate_prize_distribution(&[0.0, 1.0]),
            Err(PrizeDistributionError::ShareOutOfRange(_))
        ));
    }

    #[test]
    fn test_prize_distribution_tolerates_float_noise() {
        // 0.1 + 0.2 + 0.7 != 1.0 exactly in binary floating point.
        assert!(validate_prize_distribution(&[0.1, 0.2, 0.7]).is_ok());
    }
}
