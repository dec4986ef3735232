use super::TagLogic;
use crate::models::TierBuckets;

/// Recomputes the tag list offered for further narrowing.
///
/// Under `Or` every known tag is still a valid refinement, so the list is
/// returned unchanged. Under `And` only tags actually present in the
/// filtered result can narrow it further: the buckets are scanned in tier
/// order, item order, then tag order, keeping the first occurrence of each
/// tag that is also known. Tag sets are small, so the linear dedupe keeps
/// first-seen order without extra bookkeeping.
pub fn suggest_tags(
    buckets: &TierBuckets,
    all_known_tags: &[String],
    logic: TagLogic,
) -> Vec<String> {
    if logic == TagLogic::Or {
        return all_known_tags.to_vec();
    }
    let mut suggested: Vec<String> = Vec::new();
    for item in buckets.items() {
        for tag in &item.tags {
            if all_known_tags.contains(tag) && !suggested.contains(tag) {
                suggested.push(tag.clone());
            }
        }
    }
    suggested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaItem, Tier};

    fn item(tier: Tier, tags: &[&str]) -> MediaItem {
        MediaItem {
            id: tags.join("-"),
            title: "t".to_string(),
            media_type: "tv".to_string(),
            tier,
            to_do: false,
            year: None,
            description: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            order_index: None,
        }
    }

    fn known() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn or_logic_returns_all_known_tags_unchanged() {
        let buckets: TierBuckets = vec![item(Tier::S, &["a"]), item(Tier::B, &["c"])]
            .into_iter()
            .collect();
        assert_eq!(suggest_tags(&buckets, &known(), TagLogic::Or), known());
    }

    #[test]
    fn and_logic_narrows_to_tags_present_in_the_result() {
        let buckets: TierBuckets = vec![item(Tier::S, &["a"]), item(Tier::B, &["c"])]
            .into_iter()
            .collect();
        assert_eq!(
            suggest_tags(&buckets, &known(), TagLogic::And),
            vec!["a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn and_logic_keeps_first_seen_order_and_dedupes() {
        // "c" appears first via the S bucket even though "a" sorts earlier.
        let buckets: TierBuckets = vec![
            item(Tier::S, &["c", "a"]),
            item(Tier::A, &["a", "c"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            suggest_tags(&buckets, &known(), TagLogic::And),
            vec!["c".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn and_logic_ignores_tags_the_backend_never_reported() {
        let buckets: TierBuckets = vec![item(Tier::S, &["a", "stray"])].into_iter().collect();
        assert_eq!(
            suggest_tags(&buckets, &known(), TagLogic::And),
            vec!["a".to_string()]
        );
    }
}
