use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use tracing::warn;

use crate::models::{ListKind, MediaItem, Tier};

/// One list load: the items plus every tag known for this media type.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPayload {
    pub media: Vec<MediaItem>,
    pub unique_tags: Vec<String>,
}

/// Which of the two lists a public share link exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    pub collection: bool,
    pub todo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareState {
    pub token: String,
    pub share_config: ShareConfig,
}

/// Consumed contract of the external backend. The engine itself never
/// performs I/O; this seam is what the surrounding glue talks to, and what
/// tests replace with fakes.
#[async_trait]
pub trait TierListApi: Send + Sync {
    async fn fetch_media(&self, media_type: &str, list: ListKind) -> Result<MediaPayload>;
    async fn set_tier(&self, id: &str, tier: Tier) -> Result<()>;
    async fn set_order_index(&self, id: &str, order_index: i64) -> Result<()>;
    async fn reorder_tier(
        &self,
        media_type: &str,
        tier: Tier,
        ordered_ids: &[String],
    ) -> Result<()>;
    async fn share_status(&self, media_type: &str) -> Result<Option<ShareState>>;
    async fn create_share(&self, media_type: &str, config: ShareConfig) -> Result<ShareState>;
    async fn revoke_share(&self, media_type: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("TIERTRACK_API_URL").context("TIERTRACK_API_URL not set")?;
        let token = env::var("TIERTRACK_API_TOKEN").ok().filter(|t| !t.is_empty());
        Ok(Self::new(&base_url, token))
    }

    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn media_url(&self, media_type: &str, rest: &str) -> String {
        format!(
            "{}/media/{}{}",
            self.base_url,
            urlencoding::encode(media_type),
            rest
        )
    }

    fn share_url(&self, media_type: &str) -> String {
        format!("{}/share/{}", self.base_url, urlencoding::encode(media_type))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, String)> {
        let res = self.authed(builder).send().await.context("request failed")?;
        let status = res.status();
        let text = res.text().await.context("reading body failed")?;
        Ok((status, text))
    }

    async fn send_json<T: for<'de> Deserialize<'de>>(&self, builder: RequestBuilder) -> Result<T> {
        let (status, text) = self.send(builder).await?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", status, text));
        }
        serde_json::from_str(&text).context("JSON parse failed")
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        let (status, text) = self.send(builder).await?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", status, text));
        }
        Ok(())
    }
}

#[async_trait]
impl TierListApi for BackendClient {
    async fn fetch_media(&self, media_type: &str, list: ListKind) -> Result<MediaPayload> {
        let url = self.media_url(media_type, &format!("/{}", list.as_path()));
        let (status, text) = self.send(self.client.get(&url)).await?;
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", status, text));
        }
        parse_media_payload(&text, media_type, list)
    }

    async fn set_tier(&self, id: &str, tier: Tier) -> Result<()> {
        let url = format!("{}/media/{}/tier", self.base_url, urlencoding::encode(id));
        self.send_unit(self.client.put(&url).json(&json!({ "tier": tier })))
            .await
    }

    async fn set_order_index(&self, id: &str, order_index: i64) -> Result<()> {
        let url = format!("{}/media/{}/order", self.base_url, urlencoding::encode(id));
        self.send_unit(
            self.client
                .put(&url)
                .json(&json!({ "orderIndex": order_index })),
        )
        .await
    }

    async fn reorder_tier(
        &self,
        media_type: &str,
        tier: Tier,
        ordered_ids: &[String],
    ) -> Result<()> {
        let url = self.media_url(media_type, &format!("/tiers/{}/order", tier));
        self.send_unit(
            self.client
                .put(&url)
                .json(&json!({ "orderedIds": ordered_ids })),
        )
        .await
    }

    async fn share_status(&self, media_type: &str) -> Result<Option<ShareState>> {
        let url = self.share_url(media_type);
        let (status, text) = self.send(self.client.get(&url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(anyhow!("{} -> {}", status, text));
        }
        let state: ShareState = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(Some(state))
    }

    async fn create_share(&self, media_type: &str, config: ShareConfig) -> Result<ShareState> {
        let url = self.share_url(media_type);
        self.send_json(
            self.client
                .post(&url)
                .json(&json!({ "shareConfig": config })),
        )
        .await
    }

    async fn revoke_share(&self, media_type: &str) -> Result<()> {
        let url = self.share_url(media_type);
        self.send_unit(self.client.delete(&url)).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaResponse {
    media: Vec<MediaRow>,
    #[serde(default)]
    unique_tags: Vec<String>,
}

/// Wire row, looser than [`MediaItem`]: ids may be numbers and tiers are
/// arbitrary strings until validated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaRow {
    id: serde_json::Value,
    title: String,
    #[serde(default)]
    media_type: Option<String>,
    tier: String,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    order_index: Option<i64>,
}

/// Rows with a non-canonical tier or an unusable id are dropped with a
/// warning rather than failing the load.
fn parse_media_payload(body: &str, media_type: &str, list: ListKind) -> Result<MediaPayload> {
    let response: MediaResponse = serde_json::from_str(body).context("JSON parse failed")?;
    let media = response
        .media
        .into_iter()
        .filter_map(|row| row_to_item(row, media_type, list))
        .collect();
    Ok(MediaPayload {
        media,
        unique_tags: response.unique_tags,
    })
}

fn row_to_item(row: MediaRow, media_type: &str, list: ListKind) -> Option<MediaItem> {
    let tier = match row.tier.parse::<Tier>() {
        Ok(tier) => tier,
        Err(_) => {
            warn!("Dropping '{}': non-canonical tier '{}'", row.title, row.tier);
            return None;
        }
    };
    let id = match &row.id {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            warn!("Dropping '{}': unusable id {}", row.title, other);
            return None;
        }
    };
    Some(MediaItem {
        id,
        title: row.title,
        media_type: row.media_type.unwrap_or_else(|| media_type.to_string()),
        tier,
        to_do: list == ListKind::ToDo,
        year: row.year,
        description: row.description,
        tags: row.tags,
        order_index: row.order_index,
    })
}
