use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six fixed quality buckets an item is placed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    S = 0,
    A,
    B,
    C,
    D,
    F,
}

impl Tier {
    /// Canonical display order, best to worst.
    pub const ALL: [Tier; 6] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D, Tier::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::F => "F",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Tier::S),
            "A" => Ok(Tier::A),
            "B" => Ok(Tier::B),
            "C" => Ok(Tier::C),
            "D" => Ok(Tier::D),
            "F" => Ok(Tier::F),
            other => Err(anyhow!("Unknown tier '{}'", other)),
        }
    }
}

/// The two mutually exclusive lists an item can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Collection,
    ToDo,
}

impl ListKind {
    /// Path segment used by the backend API.
    pub fn as_path(&self) -> &'static str {
        match self {
            ListKind::Collection => "collection",
            ListKind::ToDo => "to-do",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Collection => "Collection",
            ListKind::ToDo => "To-Do",
        }
    }
}

impl FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collection" => Ok(ListKind::Collection),
            "to-do" | "todo" => Ok(ListKind::ToDo),
            other => Err(anyhow!("Unknown list '{}'", other)),
        }
    }
}

/// One catalog entry.
///
/// `year` keeps the raw date string from the backend; it is parsed leniently
/// wherever a comparison is needed, so a malformed value degrades to
/// "unknown" instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub media_type: String,
    pub tier: Tier,
    #[serde(default)]
    pub to_do: bool,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub order_index: Option<i64>,
}

/// Items grouped per tier. Every tier is always present as a key, even when
/// its bucket is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierBuckets {
    buckets: [Vec<MediaItem>; 6],
}

impl TierBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tier: Tier) -> &[MediaItem] {
        &self.buckets[tier.index()]
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut Vec<MediaItem> {
        &mut self.buckets[tier.index()]
    }

    /// Appends an item to the bucket matching its `tier` field.
    pub fn push(&mut self, item: MediaItem) {
        self.buckets[item.tier.index()].push(item);
    }

    /// Buckets in canonical tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[MediaItem])> {
        Tier::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    /// All items in tier order, then bucket order.
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.buckets.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn into_items(self) -> Vec<MediaItem> {
        self.buckets.into_iter().flatten().collect()
    }
}

impl FromIterator<MediaItem> for TierBuckets {
    fn from_iter<I: IntoIterator<Item = MediaItem>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for item in iter {
            buckets.push(item);
        }
        buckets
    }
}
