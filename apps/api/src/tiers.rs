use serde::{Deserialize, Serialize};

/// Membership tier. Declaration order is the access order: every tier can
/// see its own events and everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Silver,
    Gold,
    Platinum,
}

pub const ALL_TIERS: [Tier; 4] = [Tier::Free, Tier::Silver, Tier::Gold, Tier::Platinum];

impl Tier {
    /// Integer rank used for every tier comparison. Never compare tiers
    /// lexically; "gold" < "silver" as strings.
    pub fn rank(self) -> i32 {
        match self {
            Tier::Free => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The access policy: a user sees an event iff their tier ranks at or above
/// the event's required tier. Every gating call site delegates here — SQL
/// filtering binds `user_tier.rank()` against the same rank mapping.
pub fn has_access(user_tier: Tier, event_tier: Tier) -> bool {
    user_tier.rank() >= event_tier.rank()
}

/// Tiers a user can move up to: strictly above the current rank.
/// A platinum user has nowhere left to go.
pub fn upgrade_options(current: Tier) -> Vec<Tier> {
    ALL_TIERS
        .into_iter()
        .filter(|t| t.rank() > current.rank())
        .collect()
}
