use serde::{Deserialize, Serialize};

/// One normalized trending topic, the unit handed to downstream filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendItem {
    pub title: String,
    pub url: String,
    #[serde(rename = "mobileUrl")]
    pub mobile_url: String,
}

/// `{"items": [...]}`. Only ever built non-empty; "no data" is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendFeed {
    pub items: Vec<TrendItem>,
}

impl TrendFeed {
    pub fn from_items(items: Vec<TrendItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub title: String,
    pub url: String,
    pub mobile_url: String,
    pub engagement: f64,
}

impl ScoredCandidate {
    pub fn into_item(self) -> TrendItem {
        TrendItem {
            title: self.title,
            url: self.url,
            mobile_url: self.mobile_url,
        }
    }
}

// 搜尋 API 回應結構

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<RawPost>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub public_metrics: PublicMetrics,
    #[serde(default)]
    pub entities: Option<Entities>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub reply_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hashtag {
    #[serde(default)]
    pub tag: String,
}

impl RawPost {
    pub fn hashtags(&self) -> &[Hashtag] {
        self.entities
            .as_ref()
            .map(|e| e.hashtags.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_item_serializes_mobile_url_in_camel_case() {
        let feed = TrendFeed::from_items(vec![TrendItem {
            title: "#AI".to_string(),
            url: "https://nitter.net/hashtag/ai".to_string(),
            mobile_url: "https://nitter.net/hashtag/ai".to_string(),
        }])
        .unwrap();
        assert_eq!(feed.len(), 1);
        assert!(!feed.is_empty());

        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["items"][0]["mobileUrl"], "https://nitter.net/hashtag/ai");
        assert!(json["items"][0].get("mobile_url").is_none());
    }

    #[test]
    fn test_empty_feed_is_no_data() {
        assert!(TrendFeed::from_items(vec![]).is_none());
    }

    #[test]
    fn test_raw_post_tolerates_missing_fields() {
        let post: RawPost = serde_json::from_value(serde_json::json!({
            "id": "1",
            "text": "hello"
        }))
        .unwrap();

        assert_eq!(post.public_metrics.like_count, 0);
        assert!(post.hashtags().is_empty());
    }
}
