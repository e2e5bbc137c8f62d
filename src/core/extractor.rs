use crate::domain::model::{RawPost, ScoredCandidate};

const STATUS_URL: &str = "https://twitter.com/i/web/status";
const MOBILE_STATUS_URL: &str = "https://mobile.twitter.com/i/web/status";
const TITLE_CHARS: usize = 80;
const MAX_TAGS: usize = 3;

/// `likes + 2*reposts + 1.5*replies`
pub fn engagement(post: &RawPost) -> f64 {
    let m = &post.public_metrics;
    m.like_count as f64 + m.retweet_count as f64 * 2.0 + m.reply_count as f64 * 1.5
}

/// Hashtags first, otherwise the leading text of the post.
pub fn derive_title(post: &RawPost) -> String {
    let tags = post.hashtags();
    if !tags.is_empty() {
        return tags
            .iter()
            .take(MAX_TAGS)
            .map(|h| format!("#{}", h.tag))
            .collect::<Vec<_>>()
            .join(" ");
    }

    let head: String = post.text.chars().take(TITLE_CHARS).collect();
    let mut title = head.replace(['\n', '\r'], " ").trim().to_string();
    if post.text.chars().count() > TITLE_CHARS {
        title.push_str("...");
    }
    title
}

/// Turn one search result into a scored candidate, or drop it.
pub fn extract_candidate(post: &RawPost, threshold: f64) -> Option<ScoredCandidate> {
    let engagement = engagement(post);
    if engagement <= threshold {
        return None;
    }

    let id = post.id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;

    let title = derive_title(post);
    if title.trim().chars().count() <= 3 {
        return None;
    }

    Some(ScoredCandidate {
        title,
        url: format!("{}/{}", STATUS_URL, id),
        mobile_url: format!("{}/{}", MOBILE_STATUS_URL, id),
        engagement,
    })
}
