#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the public voting round for a single entry.
///
/// Transitions exactly once from `Pending` to a terminal value; the voting
/// resolution engine is the only writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum VotingVerdict {
    /// Voting window still open or not yet tallied.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pending"))]
    Pending,
    /// Met quorum and the approval ratio. Returned to human review, not published.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "VotingApproved"))]
    VotingApproved,
    /// Missed quorum or the approval ratio.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Rejected"))]
    Rejected,
}

impl VotingVerdict {
    /// Returns true once the verdict can no longer change.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::VotingApproved => "VotingApproved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for VotingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for VotingVerdict {
    fn default() -> Self {
        Self::Pending
    }
}

/// Human-review gate for an entry, distinct from the automatic voting verdict.
///
/// The voting engine moves entries out of `Voting`; only a human moderator
/// moves an entry to `Approved` (and only that step may publish it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum ModerationStatus {
    /// Waiting in the human moderation queue.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pending"))]
    Pending,
    /// Open for public vote.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Voting"))]
    Voting,
    /// Signed off by a human moderator.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Approved"))]
    Approved,
    /// Rejected, either by vote or by a moderator.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Rejected"))]
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Voting => "Voting",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_finality() {
        assert!(!VotingVerdict::Pending.is_final());
        assert!(VotingVerdict::VotingApproved.is_final());
        assert!(VotingVerdict::Rejected.is_final());
    }

    #[test]
    fn test_serde_uses_pascal_case() {
        assert_eq!(
            serde_json::to_string(&VotingVerdict::VotingApproved).unwrap(),
            "\"VotingApproved\""
        );
        assert_eq!(
            serde_json::to_string(&ModerationStatus::Voting).unwrap(),
            "\"Voting\""
        );
    }
}
