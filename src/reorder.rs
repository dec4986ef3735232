use anyhow::{anyhow, Result};
use tracing::{debug, error};

use crate::api::TierListApi;
use crate::models::{MediaItem, Tier, TierBuckets};

/// A drag-and-drop result: drop item `id` into `to_tier` at `position`
/// (`None` appends; out-of-range positions clamp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub id: String,
    pub to_tier: Tier,
    pub position: Option<usize>,
}

/// Snapshot taken by [`apply_move`], sufficient to restore both touched
/// buckets exactly.
#[derive(Debug)]
pub struct AppliedMove {
    from_tier: Tier,
    to_tier: Tier,
    saved_from: Vec<MediaItem>,
    saved_to: Option<Vec<MediaItem>>,
}

impl AppliedMove {
    pub fn from_tier(&self) -> Tier {
        self.from_tier
    }

    pub fn to_tier(&self) -> Tier {
        self.to_tier
    }

    pub fn tier_changed(&self) -> bool {
        self.from_tier != self.to_tier
    }
}

/// Applies a move to the in-memory buckets: removes the item from its
/// current bucket, retags it, inserts it at the requested position and
/// renumbers `order_index` across the touched buckets.
pub fn apply_move(buckets: &mut TierBuckets, req: &MoveRequest) -> Result<AppliedMove> {
    let mut located = None;
    for tier in Tier::ALL {
        if let Some(idx) = buckets.get(tier).iter().position(|i| i.id == req.id) {
            located = Some((tier, idx));
            break;
        }
    }
    let (from_tier, idx) = located.ok_or_else(|| anyhow!("No item with id '{}'", req.id))?;

    let saved_from = buckets.get(from_tier).to_vec();
    let saved_to = (from_tier != req.to_tier).then(|| buckets.get(req.to_tier).to_vec());

    let mut item = buckets.get_mut(from_tier).remove(idx);
    item.tier = req.to_tier;
    let dest = buckets.get_mut(req.to_tier);
    let position = req.position.unwrap_or(dest.len()).min(dest.len());
    dest.insert(position, item);

    renumber(buckets.get_mut(req.to_tier));
    if from_tier != req.to_tier {
        renumber(buckets.get_mut(from_tier));
    }

    debug!(
        "Moved '{}' from tier {} to tier {} at position {}",
        req.id, from_tier, req.to_tier, position
    );
    Ok(AppliedMove {
        from_tier,
        to_tier: req.to_tier,
        saved_from,
        saved_to,
    })
}

/// Restores the buckets touched by a move to their pre-move contents.
pub fn rollback(buckets: &mut TierBuckets, applied: AppliedMove) {
    *buckets.get_mut(applied.from_tier) = applied.saved_from;
    if let Some(saved) = applied.saved_to {
        *buckets.get_mut(applied.to_tier) = saved;
    }
}

/// Optimistic move: mutate the buckets first, then persist. If persistence
/// fails the local mutation is rolled back and the error propagated, so the
/// view never keeps state the backend refused.
pub async fn commit_move(
    api: &dyn TierListApi,
    buckets: &mut TierBuckets,
    media_type: &str,
    req: &MoveRequest,
) -> Result<()> {
    let applied = apply_move(buckets, req)?;
    match persist(api, buckets, media_type, &applied, req).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Persisting move of '{}' failed, rolling back: {:#}", req.id, e);
            rollback(buckets, applied);
            Err(e)
        }
    }
}

async fn persist(
    api: &dyn TierListApi,
    buckets: &TierBuckets,
    media_type: &str,
    applied: &AppliedMove,
    req: &MoveRequest,
) -> Result<()> {
    if applied.tier_changed() {
        api.set_tier(&req.id, applied.to_tier).await?;
    }
    api.reorder_tier(media_type, applied.to_tier, &bucket_ids(buckets, applied.to_tier))
        .await?;
    if applied.tier_changed() {
        api.reorder_tier(
            media_type,
            applied.from_tier,
            &bucket_ids(buckets, applied.from_tier),
        )
        .await?;
    }
    Ok(())
}

fn bucket_ids(buckets: &TierBuckets, tier: Tier) -> Vec<String> {
    buckets.get(tier).iter().map(|i| i.id.clone()).collect()
}

fn renumber(items: &mut [MediaItem]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.order_index = Some(i as i64);
    }
}
