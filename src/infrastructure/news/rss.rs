use crate::domain::entities::snapshot::NewsItem;
use crate::domain::ports::news_feed::NewsFeedProvider;
use async_trait::async_trait;
use quick_xml::events::Event;
use std::collections::HashSet;
use std::time::Duration;

/// Pulls headlines from a set of RSS feeds. Each feed contributes at most
/// `max_items / feeds + 1` items; titles are de-duplicated across feeds.
pub struct RssNewsFeed {
    feeds: Vec<String>,
    client: reqwest::Client,
}

impl RssNewsFeed {
    pub fn new(feeds: Vec<String>) -> Self {
        Self {
            feeds,
            client: reqwest::Client::builder()
                .user_agent("livebrief/0.1")
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn fetch_feed(&self, url: &str, limit: usize) -> Result<Vec<NewsItem>, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("feed returned {}", resp.status()));
        }

        let body = resp.text().await.map_err(|e| format!("body read: {e}"))?;
        let mut items = parse_rss_items(&body)?;
        items.truncate(limit);
        Ok(items)
    }
}

/// Extract `<item><title>`/`<pubDate>` pairs from an RSS document. The
/// channel-level `<title>` sits outside any `<item>` and is skipped.
fn parse_rss_items(xml: &str) -> Result<Vec<NewsItem>, String> {
    let mut reader = quick_xml::Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut items = Vec::new();
    let mut in_item = false;
    // Name of the element we are capturing text for, within the current item.
    let mut capture: Option<&'static str> = None;
    let mut title = String::new();
    let mut published = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"item" | b"entry" => {
                    in_item = true;
                    title.clear();
                    published.clear();
                }
                b"title" if in_item => capture = Some("title"),
                b"pubDate" if in_item => capture = Some("pubDate"),
                _ => capture = None,
            },
            Ok(Event::Text(t)) => {
                if let Some(field) = capture {
                    let text = t.unescape().unwrap_or_default();
                    match field {
                        "title" => title.push_str(&text),
                        _ => published.push_str(&text),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(field) = capture {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    match field {
                        "title" => title.push_str(&text),
                        _ => published.push_str(&text),
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"item" | b"entry" => {
                    in_item = false;
                    let t = title.trim();
                    if !t.is_empty() {
                        items.push(NewsItem {
                            title: t.to_string(),
                            published: published.trim().to_string(),
                        });
                    }
                }
                _ => capture = None,
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("malformed feed: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

#[async_trait]
impl NewsFeedProvider for RssNewsFeed {
    async fn headlines(&self, max_items: usize) -> Result<Vec<NewsItem>, String> {
        if self.feeds.is_empty() {
            return Ok(vec![]);
        }

        let per_feed = max_items / self.feeds.len() + 1;
        let mut all = Vec::new();
        for url in &self.feeds {
            match self.fetch_feed(url, per_feed).await {
                Ok(items) => all.extend(items),
                Err(e) => {
                    tracing::warn!("feed {url} failed: {e}");
                }
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut deduped = Vec::new();
        for item in all {
            if seen.insert(item.title.clone()) {
                deduped.push(item);
            }
            if deduped.len() >= max_items {
                break;
            }
        }
        Ok(deduped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Example Business News</title>
  <item>
    <title>Stocks rally as yields ease</title>
    <pubDate>Mon, 03 Aug 2026 12:00:00 GMT</pubDate>
  </item>
  <item>
    <title><![CDATA[Oil & gas majors report earnings]]></title>
    <pubDate>Mon, 03 Aug 2026 11:30:00 GMT</pubDate>
  </item>
  <item>
    <title>M&amp;A activity picks up</title>
  </item>
</channel></rss>"#;

    #[test]
    fn test_parse_items_skips_channel_title() {
        let items = parse_rss_items(FEED).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Stocks rally as yields ease");
        assert_eq!(items[0].published, "Mon, 03 Aug 2026 12:00:00 GMT");
        assert!(!items.iter().any(|i| i.title.contains("Example Business")));
        assert_eq!(items[1].title, "Oil & gas majors report earnings");
    }

    #[test]
    fn test_entities_unescaped() {
        let items = parse_rss_items(FEED).unwrap();
        assert_eq!(items[2].title, "M&A activity picks up");
        assert_eq!(items[2].published, "");
    }

    #[test]
    fn test_empty_feed_list() {
        let feed = RssNewsFeed::new(vec![]);
        let rt = tokio::runtime::Runtime::new().unwrap();
        let items = rt.block_on(feed.headlines(50)).unwrap();
        assert!(items.is_empty());
    }
}
