use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::Config;
use crate::errors::ImageLookupError;

/// Best-effort thumbnail lookup against the MediaWiki `pageimages` API.
pub struct ImageLookup {
    client: Client,
    api: String,
    thumb_size: u32,
}

#[derive(Deserialize)]
struct WikiResult {
    query: Option<WikiQuery>,
}

#[derive(Deserialize)]
struct WikiQuery {
    #[serde(default)]
    pages: BTreeMap<String, WikiPage>,
}

#[derive(Deserialize)]
struct WikiPage {
    thumbnail: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    source: String,
}

pub(crate) fn parse_thumbnail(body: &str) -> Result<Option<String>, ImageLookupError> {
    let parsed: WikiResult = serde_json::from_str(body)?;
    Ok(parsed
        .query
        .into_iter()
        .flat_map(|q| q.pages.into_values())
        .find_map(|p| p.thumbnail)
        .map(|t| t.source))
}

impl ImageLookup {
    pub fn new(cfg: &Config) -> Result<Self, ImageLookupError> {
        let mut builder = Client::builder().user_agent(concat!("rewild/", env!("CARGO_PKG_VERSION")));
        if let Some(t) = cfg.timeout() {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            api: cfg.wiki_api.clone(),
            thumb_size: cfg.thumbnail_size,
        })
    }

    /// Thumbnail URL for `plant_name`, or `None` on any failure.
    pub async fn thumbnail_url(&self, plant_name: &str) -> Option<String> {
        match self.lookup(plant_name).await {
            Ok(url) => url,
            Err(e) => {
                debug!(plant = plant_name, error = %e, "image lookup failed");
                None
            }
        }
    }

    async fn lookup(&self, plant_name: &str) -> Result<Option<String>, ImageLookupError> {
        let size = self.thumb_size.to_string();
        let resp = self
            .client
            .get(&self.api)
            .query(&[
                ("action", "query"),
                ("titles", plant_name),
                ("prop", "pageimages"),
                ("format", "json"),
                ("pithumbsize", size.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ImageLookupError::Status(status.as_u16()));
        }
        parse_thumbnail(&resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_thumbnail_source() {
        let body = r#"{"batchcomplete":"","query":{"pages":{"2447612":{"pageid":2447612,"title":"Banksia","thumbnail":{"source":"https://upload.wikimedia.org/b.jpg","width":500,"height":375}}}}}"#;
        assert_eq!(parse_thumbnail(body).unwrap().as_deref(), Some("https://upload.wikimedia.org/b.jpg"));
    }

    #[test]
    fn missing_page_has_no_image() {
        let body = r#"{"query":{"pages":{"-1":{"ns":0,"title":"Nonexistent plant","missing":""}}}}"#;
        assert_eq!(parse_thumbnail(body).unwrap(), None);
        assert_eq!(parse_thumbnail("{}").unwrap(), None);
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_thumbnail("not json").is_err());
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_none() {
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let cfg = Config {
            wiki_api: format!("http://127.0.0.1:{port}/w/api.php"),
            timeout_secs: Some(1),
            ..Config::default()
        };
        let lookup = ImageLookup::new(&cfg).unwrap();
        assert_eq!(lookup.thumbnail_url("Banksia").await, None);
    }
}
