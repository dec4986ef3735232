use crate::models::TierBuckets;

const HEADER: &str = "Tier,Title,Type,List,Date,Tags,Description";

/// Renders the currently filtered buckets as RFC-4180 CSV text, in tier
/// order then bucket order. Purely local; the caller decides what to do
/// with the bytes.
pub fn csv_export(buckets: &TierBuckets) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\r\n");
    for (tier, items) in buckets.iter() {
        for item in items {
            let list = if item.to_do { "To-Do" } else { "Collection" };
            let tags = item.tags.join("; ");
            let fields = [
                tier.as_str(),
                item.title.as_str(),
                item.media_type.as_str(),
                list,
                item.year.as_deref().unwrap_or(""),
                tags.as_str(),
                item.description.as_deref().unwrap_or(""),
            ];
            let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
            out.push_str(&row.join(","));
            out.push_str("\r\n");
        }
    }
    out
}

/// Quotes a field when it contains a comma, quote or line break; internal
/// quotes are doubled.
fn csv_field(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaItem, Tier};

    fn item(title: &str, tier: Tier) -> MediaItem {
        MediaItem {
            id: title.to_string(),
            title: title.to_string(),
            media_type: "movies".to_string(),
            tier,
            to_do: false,
            year: Some("2020-01-01".to_string()),
            description: None,
            tags: vec!["x".to_string(), "y".to_string()],
            order_index: None,
        }
    }

    #[test]
    fn exports_header_and_rows_in_tier_order() {
        let buckets: TierBuckets = vec![item("Beta", Tier::A), item("Alpha", Tier::S)]
            .into_iter()
            .collect();
        let csv = csv_export(&buckets);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "S,Alpha,movies,Collection,2020-01-01,x; y,");
        assert_eq!(lines[2], "A,Beta,movies,Collection,2020-01-01,x; y,");
    }

    #[test]
    fn quotes_fields_with_commas_and_doubles_internal_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn to_do_items_render_their_list_label() {
        let mut it = item("Later", Tier::F);
        it.to_do = true;
        let buckets: TierBuckets = vec![it].into_iter().collect();
        assert!(csv_export(&buckets).contains("F,Later,movies,To-Do"));
    }
}
