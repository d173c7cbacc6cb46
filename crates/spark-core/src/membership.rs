//! Membership tiers and the upgrade catalog.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Subscription level of an account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MembershipTier {
    #[default]
    Free,
    #[strum(to_string = "Spark Plus")]
    SparkPlus,
    #[strum(to_string = "Spark Gold")]
    SparkGold,
}

/// A purchasable tier as shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierOffer {
    pub tier: MembershipTier,
    /// Monthly price, already formatted (e.g. `$9.99`).
    pub price: String,
    pub features: Vec<String>,
}

impl TierOffer {
    fn new(tier: MembershipTier, price: &str, features: &[&str]) -> Self {
        Self {
            tier,
            price: price.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The paid tiers offered for upgrade.
    pub fn catalog() -> Vec<TierOffer> {
        vec![
            Self::new(
                MembershipTier::SparkPlus,
                "$9.99",
                &["Unlimited Likes", "AI Coach Basic"],
            ),
            Self::new(
                MembershipTier::SparkGold,
                "$24.99",
                &["Unlimited Mock Dates", "Priority Matches"],
            ),
        ]
    }

    /// Looks up a catalog offer by tier.
    pub fn for_tier(tier: MembershipTier) -> Option<TierOffer> {
        Self::catalog().into_iter().find(|offer| offer.tier == tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(MembershipTier::Free.to_string(), "Free");
        assert_eq!(MembershipTier::SparkPlus.to_string(), "Spark Plus");
        assert_eq!(MembershipTier::SparkGold.to_string(), "Spark Gold");
    }

    #[test]
    fn test_catalog_prices() {
        let plus = TierOffer::for_tier(MembershipTier::SparkPlus).unwrap();
        assert_eq!(plus.price, "$9.99");
        let gold = TierOffer::for_tier(MembershipTier::SparkGold).unwrap();
        assert_eq!(gold.price, "$24.99");
        assert!(TierOffer::for_tier(MembershipTier::Free).is_none());
    }
}
