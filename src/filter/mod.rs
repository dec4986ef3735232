use chrono::{Local, NaiveDate};

mod matcher;
mod range;
mod sort;
mod suggest;

pub use matcher::matches;
pub use range::in_range;
pub use sort::sort_tier;
pub use suggest::suggest_tags;

use crate::models::{MediaItem, Tier, TierBuckets};

/// Time window an item's date must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    #[default]
    All,
    Ytd,
    LastMonth,
    Last3Months,
    Last6Months,
    Last12Months,
    Custom,
}

/// Combination rule for multi-tag filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagLogic {
    And,
    #[default]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Manual order index, then title for ties; items without an index last.
    #[default]
    Default,
    DateNewest,
    DateOldest,
    TitleAz,
}

/// Which item fields a free-text query is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchScopes {
    pub title: bool,
    pub tags: bool,
    pub description: bool,
}

impl Default for SearchScopes {
    fn default() -> Self {
        Self {
            title: true,
            tags: true,
            description: true,
        }
    }
}

/// Everything the engine needs to decide whether an item survives a pass.
/// Owned by the caller and rebuilt on every filter-control interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub scopes: SearchScopes,
    pub selected_tags: Vec<String>,
    pub tag_logic: TagLogic,
    pub period: TimePeriod,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    pub selected_tiers: Vec<Tier>,
    pub sort: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            scopes: SearchScopes::default(),
            selected_tags: Vec::new(),
            tag_logic: TagLogic::default(),
            period: TimePeriod::default(),
            custom_start: None,
            custom_end: None,
            selected_tiers: Tier::ALL.to_vec(),
            sort: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub buckets: TierBuckets,
    pub suggested_tags: Vec<String>,
}

/// Groups items back into the six fixed tiers, in input order.
pub fn partition<I: IntoIterator<Item = MediaItem>>(items: I) -> TierBuckets {
    items.into_iter().collect()
}

/// One full filter pass: predicate-filter, partition, sort each tier,
/// recompute suggested tags. Pure and synchronous; called on every
/// keystroke/toggle by the owning view.
pub fn apply_filters(
    items: Vec<MediaItem>,
    criteria: &FilterCriteria,
    all_known_tags: &[String],
) -> FilterOutcome {
    apply_filters_at(items, criteria, all_known_tags, Local::now().date_naive())
}

/// Same as [`apply_filters`] with an explicit "today" so relative time
/// periods stay deterministic under test.
pub fn apply_filters_at(
    items: Vec<MediaItem>,
    criteria: &FilterCriteria,
    all_known_tags: &[String],
    today: NaiveDate,
) -> FilterOutcome {
    let mut buckets = partition(
        items
            .into_iter()
            .filter(|item| matcher::matches(item, criteria, today)),
    );
    for tier in Tier::ALL {
        sort::sort_tier(buckets.get_mut(tier), criteria.sort);
    }
    let suggested_tags = suggest::suggest_tags(&buckets, all_known_tags, criteria.tag_logic);
    FilterOutcome {
        buckets,
        suggested_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, tier: Tier) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: id.to_string(),
            media_type: "anime".to_string(),
            tier,
            to_do: false,
            year: None,
            description: None,
            tags: Vec::new(),
            order_index: None,
        }
    }

    #[test]
    fn partition_always_yields_six_buckets() {
        let buckets = partition(vec![item("a", Tier::B), item("b", Tier::B)]);
        assert_eq!(buckets.iter().count(), 6);
        assert_eq!(buckets.get(Tier::B).len(), 2);
        assert!(buckets.get(Tier::S).is_empty());
    }

    #[test]
    fn apply_filters_is_idempotent() {
        let criteria = FilterCriteria::default();
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let items = vec![item("a", Tier::S), item("b", Tier::A), item("c", Tier::F)];
        let tags = vec!["x".to_string()];

        let once = apply_filters_at(items, &criteria, &tags, today);
        let twice = apply_filters_at(once.buckets.clone().into_items(), &criteria, &tags, today);
        assert_eq!(once, twice);
    }

    #[test]
    fn tiers_outside_allow_list_are_dropped() {
        let criteria = FilterCriteria {
            selected_tiers: vec![Tier::S],
            ..FilterCriteria::default()
        };
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let outcome = apply_filters_at(
            vec![item("keep", Tier::S), item("drop", Tier::A)],
            &criteria,
            &[],
            today,
        );
        assert_eq!(outcome.buckets.get(Tier::S).len(), 1);
        assert!(outcome.buckets.get(Tier::A).is_empty());
    }
}
