use chrono::NaiveDate;
use std::cmp::Ordering;

use super::{range, SortOrder};
use crate::models::MediaItem;

/// Orders the items of one tier bucket. All orders are stable, so equal keys
/// keep their input order.
pub fn sort_tier(items: &mut [MediaItem], order: SortOrder) {
    match order {
        SortOrder::DateNewest => items.sort_by(|a, b| date_key(b).cmp(&date_key(a))),
        SortOrder::DateOldest => items.sort_by(|a, b| date_key(a).cmp(&date_key(b))),
        SortOrder::TitleAz => items.sort_by(|a, b| title_key(a).cmp(&title_key(b))),
        SortOrder::Default => items.sort_by(manual_order),
    }
}

/// Absent or unparseable dates get a fixed minimum key, so they always sort
/// as "oldest" under either date order.
fn date_key(item: &MediaItem) -> NaiveDate {
    item.year
        .as_deref()
        .and_then(range::parse_date)
        .unwrap_or(NaiveDate::MIN)
}

fn title_key(item: &MediaItem) -> String {
    item.title.to_lowercase()
}

fn manual_order(a: &MediaItem, b: &MediaItem) -> Ordering {
    match (a.order_index, b.order_index) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| title_key(a).cmp(&title_key(b))),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => title_key(a).cmp(&title_key(b)),
    }
}
