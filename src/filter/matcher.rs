use chrono::NaiveDate;

use super::{range, FilterCriteria, TagLogic};
use crate::models::MediaItem;

/// Decides whether a single item passes every active filter.
pub fn matches(item: &MediaItem, criteria: &FilterCriteria, today: NaiveDate) -> bool {
    matches_query(item, criteria)
        && matches_tags(item, criteria)
        && range::in_range(
            item.year.as_deref(),
            criteria.period,
            criteria.custom_start,
            criteria.custom_end,
            today,
        )
        && criteria.selected_tiers.contains(&item.tier)
}

fn matches_query(item: &MediaItem, criteria: &FilterCriteria) -> bool {
    let query = criteria.query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    if criteria.scopes.title && item.title.to_lowercase().contains(&query) {
        return true;
    }
    if criteria.scopes.description {
        if let Some(description) = &item.description {
            if description.to_lowercase().contains(&query) {
                return true;
            }
        }
    }
    if criteria.scopes.tags
        && item.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    {
        return true;
    }
    false
}

fn matches_tags(item: &MediaItem, criteria: &FilterCriteria) -> bool {
    if criteria.selected_tags.is_empty() {
        return true;
    }
    if item.tags.is_empty() {
        return false;
    }
    let has = |wanted: &String| item.tags.iter().any(|tag| tag == wanted);
    match criteria.tag_logic {
        TagLogic::And => criteria.selected_tags.iter().all(has),
        TagLogic::Or => criteria.selected_tags.iter().any(has),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{SearchScopes, TimePeriod};
    use crate::models::Tier;

    fn item() -> MediaItem {
        MediaItem {
            id: "1".to_string(),
            title: "Cowboy Bebop".to_string(),
            media_type: "anime".to_string(),
            tier: Tier::S,
            to_do: false,
            year: Some("1998-04-03".to_string()),
            description: Some("Space bounty hunters".to_string()),
            tags: vec!["sci-fi".to_string(), "classic".to_string()],
            order_index: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    #[test]
    fn query_matches_case_insensitively_per_scope() {
        let mut criteria = FilterCriteria {
            query: "BEBOP".to_string(),
            ..FilterCriteria::default()
        };
        assert!(matches(&item(), &criteria, today()));

        criteria.query = "bounty".to_string();
        criteria.scopes = SearchScopes {
            title: false,
            tags: false,
            description: true,
        };
        assert!(matches(&item(), &criteria, today()));

        criteria.query = "sci".to_string();
        criteria.scopes = SearchScopes {
            title: false,
            tags: true,
            description: false,
        };
        assert!(matches(&item(), &criteria, today()));
    }

    #[test]
    fn query_with_no_enabled_scope_rejects() {
        let criteria = FilterCriteria {
            query: "bebop".to_string(),
            scopes: SearchScopes {
                title: false,
                tags: false,
                description: false,
            },
            ..FilterCriteria::default()
        };
        assert!(!matches(&item(), &criteria, today()));
    }

    #[test]
    fn missing_description_is_skipped_not_matched() {
        let mut it = item();
        it.description = None;
        let criteria = FilterCriteria {
            query: "bounty".to_string(),
            scopes: SearchScopes {
                title: false,
                tags: false,
                description: true,
            },
            ..FilterCriteria::default()
        };
        assert!(!matches(&it, &criteria, today()));
    }

    #[test]
    fn and_logic_requires_every_selected_tag() {
        let mut criteria = FilterCriteria {
            selected_tags: vec!["sci-fi".to_string(), "classic".to_string()],
            tag_logic: TagLogic::And,
            ..FilterCriteria::default()
        };
        assert!(matches(&item(), &criteria, today()));

        criteria.selected_tags.push("romance".to_string());
        assert!(!matches(&item(), &criteria, today()));
    }

    #[test]
    fn or_logic_requires_any_selected_tag() {
        let criteria = FilterCriteria {
            selected_tags: vec!["romance".to_string(), "classic".to_string()],
            tag_logic: TagLogic::Or,
            ..FilterCriteria::default()
        };
        assert!(matches(&item(), &criteria, today()));
    }

    #[test]
    fn untagged_item_fails_any_tag_selection() {
        let mut it = item();
        it.tags.clear();
        let criteria = FilterCriteria {
            selected_tags: vec!["sci-fi".to_string()],
            tag_logic: TagLogic::Or,
            ..FilterCriteria::default()
        };
        assert!(!matches(&it, &criteria, today()));
    }

    #[test]
    fn date_gate_applies_to_the_item_year() {
        let criteria = FilterCriteria {
            period: TimePeriod::Ytd,
            ..FilterCriteria::default()
        };
        assert!(!matches(&item(), &criteria, today()));
    }
}
