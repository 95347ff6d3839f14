use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketing channel a tenant came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AttributionCategory {
    ListingPlatforms,
    PaidSocialAdvertising,
    WordOfMouth,
    WalkIn,
    Other,
}

impl AttributionCategory {
    pub const ALL: [AttributionCategory; 5] = [
        AttributionCategory::ListingPlatforms,
        AttributionCategory::PaidSocialAdvertising,
        AttributionCategory::WordOfMouth,
        AttributionCategory::WalkIn,
        AttributionCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AttributionCategory::ListingPlatforms => "Listing Platforms",
            AttributionCategory::PaidSocialAdvertising => "Paid Social Advertising",
            AttributionCategory::WordOfMouth => "Word of Mouth",
            AttributionCategory::WalkIn => "Walk in",
            AttributionCategory::Other => "Other",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            AttributionCategory::ListingPlatforms => &["bayut", "aqar", "listing"],
            AttributionCategory::PaidSocialAdvertising => {
                &["social", "facebook", "instagram", "tiktok"]
            }
            AttributionCategory::WordOfMouth => &["word of mouth"],
            AttributionCategory::WalkIn => &["walk in", "building board"],
            AttributionCategory::Other => &[],
        }
    }
}

impl fmt::Display for AttributionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets a free-text "how did you hear about us" answer.
/// Categories are tried in declaration order; the first keyword hit wins.
pub fn classify(source: &str) -> AttributionCategory {
    let lowered = source.to_lowercase();
    AttributionCategory::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| lowered.contains(*k)))
        .unwrap_or(AttributionCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_platforms() {
        assert_eq!(classify("Bayut"), AttributionCategory::ListingPlatforms);
        assert_eq!(classify("AQAR app"), AttributionCategory::ListingPlatforms);
        assert_eq!(classify("Online listing"), AttributionCategory::ListingPlatforms);
    }

    #[test]
    fn test_paid_social() {
        assert_eq!(classify("Facebook Ad"), AttributionCategory::PaidSocialAdvertising);
        assert_eq!(
            classify("Social Media Campaign"),
            AttributionCategory::PaidSocialAdvertising
        );
        assert_eq!(classify("TikTok"), AttributionCategory::PaidSocialAdvertising);
        assert_eq!(classify("instagram story"), AttributionCategory::PaidSocialAdvertising);
    }

    #[test]
    fn test_first_rule_wins() {
        // Mentions both a listing site and social media
        assert_eq!(
            classify("Bayut listing shared on Instagram"),
            AttributionCategory::ListingPlatforms
        );
        assert_eq!(
            classify("Paid Social Advertising"),
            AttributionCategory::PaidSocialAdvertising
        );
    }

    #[test]
    fn test_word_of_mouth_and_walk_in() {
        assert_eq!(classify("Word of Mouth"), AttributionCategory::WordOfMouth);
        assert_eq!(classify("walk in"), AttributionCategory::WalkIn);
        assert_eq!(classify("Saw the Building Board"), AttributionCategory::WalkIn);
        // Hyphenated spelling is not a walk-in keyword
        assert_eq!(classify("Walk-in"), AttributionCategory::Other);
    }

    #[test]
    fn test_other_is_total_fallback() {
        assert_eq!(classify("Google Maps"), AttributionCategory::Other);
        assert_eq!(classify("Wasalt"), AttributionCategory::Other);
        assert_eq!(classify(""), AttributionCategory::Other);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(AttributionCategory::WalkIn.to_string(), "Walk in");
        assert_eq!(
            AttributionCategory::PaidSocialAdvertising.label(),
            "Paid Social Advertising"
        );
    }
}
