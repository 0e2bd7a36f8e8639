use serde::{Deserialize, Serialize};

/// Benefit duration bracket awarded for the qualifying months in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationTier {
    None,
    Basic,
    Standard,
    Extended,
}

impl DurationTier {
    pub fn benefit_days(&self) -> u16 {
        match self {
            DurationTier::Extended => 300,
            DurationTier::Standard => 200,
            DurationTier::Basic => 100,
            DurationTier::None => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationTier::Extended => "Up to 300 benefit days",
            DurationTier::Standard => "Up to 200 benefit days",
            DurationTier::Basic => "Up to 100 benefit days",
            DurationTier::None => "No benefit days",
        }
    }
}

/// Ordered `(minimum qualifying months, tier)` table; the first satisfied row wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationPolicy {
    tiers: Vec<(usize, DurationTier)>,
}

impl DurationPolicy {
    /// 11 months for 300 days, 8 for 200, 4 for 100.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                (11, DurationTier::Extended),
                (8, DurationTier::Standard),
                (4, DurationTier::Basic),
            ],
        }
    }

    pub fn tier_for(&self, qualifying_months: usize) -> DurationTier {
        self.tiers
            .iter()
            .find(|(minimum, _)| qualifying_months >= *minimum)
            .map(|(_, tier)| *tier)
            .unwrap_or(DurationTier::None)
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Duration bracket under the standard table.
pub fn overall_duration_tier(qualifying_months: usize) -> DurationTier {
    DurationPolicy::standard().tier_for(qualifying_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_award_days() {
        let cases = [
            (0, 0),
            (3, 0),
            (4, 100),
            (7, 100),
            (8, 200),
            (10, 200),
            (11, 300),
            (24, 300),
        ];

        for (months, days) in cases {
            assert_eq!(
                overall_duration_tier(months).benefit_days(),
                days,
                "{months} qualifying months"
            );
        }
    }

    #[test]
    fn tiers_are_monotonic_in_qualifying_months() {
        let policy = DurationPolicy::standard();
        let tiers: Vec<_> = (0..=24).map(|months| policy.tier_for(months)).collect();
        assert!(tiers.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
