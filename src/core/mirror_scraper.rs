//! HTML mirror scraping.
//!
//! The mirror's trending page has no stable structure, so extraction is a
//! heuristic with an ordered fallback. [`extract_items`] is kept free of any
//! network code so it can be exercised against fixture HTML.

use crate::config::settings::{MirrorSettings, MAX_SCANNED_ELEMENTS};
use crate::domain::model::TrendItem;
use crate::utils::error::{Result, TrendError};
use crate::utils::validation::Validate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const TREND_CLASS_MARKER: &str = "trend";
const HASHTAG_PATH: &str = "/hashtag/";

pub struct MirrorScraper {
    client: Client,
    settings: MirrorSettings,
}

impl MirrorScraper {
    pub fn new(settings: MirrorSettings) -> Result<Self> {
        settings.validate()?;
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &MirrorSettings {
        &self.settings
    }

    /// Fetch `<instance>/trending` and extract items. Any failure is an
    /// [`TrendError::InstanceFailure`] for the caller to skip past.
    pub async fn scrape(&self, instance: &str) -> Result<Vec<TrendItem>> {
        let base = instance.trim_end_matches('/');
        let page_url = format!("{}{}", base, self.settings.trending_path);

        tracing::debug!("Fetching mirror page: {}", page_url);

        let failure = |message: String| TrendError::InstanceFailure {
            instance: base.to_string(),
            message,
        };

        let response = self
            .client
            .get(&page_url)
            .send()
            .await
            .map_err(|e| failure(format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| failure(format!("HTTP error: {}", e)))?;

        let html = response
            .text()
            .await
            .map_err(|e| failure(format!("response read failed: {}", e)))?;

        tracing::debug!("Mirror response received ({} bytes)", html.len());

        extract_items(&html, base, self.settings.element_limit())
            .map_err(|e| failure(e.to_string()))
    }
}

/// Extract trend items from a mirror trending page.
///
/// Containers whose class mentions "trend" are preferred; without any, anchors
/// pointing at a hashtag path are used instead. Only the first `max_elements`
/// matches (never more than 20) are considered.
pub fn extract_items(html: &str, base_url: &str, max_elements: usize) -> Result<Vec<TrendItem>> {
    let document = Html::parse_document(html);
    let base = base_url.trim_end_matches('/');

    let container_sel = selector("div[class], span[class]")?;
    let hashtag_sel = selector("a[href]")?;
    let anchor_sel = selector("a")?;

    let mut matched: Vec<ElementRef> = document
        .select(&container_sel)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|c| c.to_lowercase().contains(TREND_CLASS_MARKER))
        })
        .collect();

    if matched.is_empty() {
        matched = document
            .select(&hashtag_sel)
            .filter(|el| el.value().attr("href").is_some_and(|h| h.contains(HASHTAG_PATH)))
            .collect();
    }

    let mut items = Vec::new();

    for element in matched.into_iter().take(max_elements.min(MAX_SCANNED_ELEMENTS)) {
        let text = visible_text(&element);
        if text.chars().count() < 2 {
            continue;
        }

        let href = if element.value().name() == "a" {
            element.value().attr("href").unwrap_or("")
        } else {
            element
                .select(&anchor_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or("")
        };

        let url = resolve_link(base, href, &text);
        let title = if text.starts_with('#') {
            text
        } else {
            format!("#{}", text)
        };

        items.push(TrendItem {
            title,
            mobile_url: url.clone(),
            url,
        });
    }

    tracing::debug!("Mirror page yielded {} items", items.len());
    Ok(items)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| TrendError::InstanceFailure {
        instance: String::new(),
        message: format!("invalid selector {}: {:?}", css, e),
    })
}

/// 每段文字節點各自 trim 後串接
fn visible_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Root-relative links are joined to the mirror, absolute http(s) links kept,
/// anything else replaced by the mirror's hashtag page for `text`.
pub fn resolve_link(base: &str, href: &str, text: &str) -> String {
    if href.starts_with('/') {
        return format!("{}{}", base, href);
    }

    if let Ok(url) = Url::parse(href) {
        if matches!(url.scheme(), "http" | "https") {
            return href.to_string();
        }
    }

    hashtag_link(base, text)
}

/// 標籤文字整段作為單一路徑片段，`#`、`?`、`/` 都會被編碼
fn hashtag_link(base: &str, text: &str) -> String {
    let tag = text.trim_start_matches('#');
    let Ok(mut url) = Url::parse(base) else {
        return format!("{}{}{}", base, HASHTAG_PATH, tag);
    };

    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.pop_if_empty().push("hashtag").push(tag);
        }
        Err(()) => return format!("{}{}{}", base, HASHTAG_PATH, tag),
    }
    url.into()
}
