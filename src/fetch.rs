//! Remote document access.
//!
//! `Source` is the seam between the pipeline and the network: the pipeline
//! only ever asks for category names, probes, and downloads. `GithubSource`
//! implements it over a blocking HTTP client against a GitHub-style
//! contents listing plus raw file host.
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::error::{Error, Result};

pub trait Source {
    /// Category folder names. Transport problems yield an empty list.
    fn list_categories(&self) -> Vec<String>;

    /// Whether `document` exists under `category`, without downloading it.
    fn probe(&self, category: &str, document: &str) -> bool;

    fn fetch(&self, category: &str, document: &str) -> Result<String>;
}

/// First category, in listing order, whose probe succeeds.
pub fn locate<S: Source + ?Sized>(source: &S, categories: &[String], document: &str) -> Option<String> {
    categories
        .iter()
        .find(|category| source.probe(category, document))
        .cloned()
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Keep visible directories from a contents listing.
fn categories_from_listing(entries: Vec<ListingEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|e| e.kind == "dir" && !e.name.starts_with('.'))
        .map(|e| e.name)
        .collect()
}

pub struct GithubSource {
    client: Client,
    config: RemoteConfig,
}

impl GithubSource {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| Error::Transport {
                url: config.listing_url.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    pub fn document_url(&self, category: &str, document: &str) -> String {
        let base = self.config.raw_base_url.trim_end_matches('/');
        format!("{base}/{category}/{document}")
    }

    fn try_list_categories(&self) -> Result<Vec<String>> {
        let url = &self.config.listing_url;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|source| Error::Transport { url: url.clone(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url: url.clone(), status: status.as_u16() });
        }
        let entries = response
            .json::<Vec<ListingEntry>>()
            .map_err(|source| Error::Transport { url: url.clone(), source })?;
        Ok(categories_from_listing(entries))
    }
}

impl Source for GithubSource {
    fn list_categories(&self) -> Vec<String> {
        match self.try_list_categories() {
            Ok(categories) => {
                debug!(count = categories.len(), "listed categories");
                categories
            }
            Err(error) => {
                warn!(%error, "failed to fetch categories");
                Vec::new()
            }
        }
    }

    fn probe(&self, category: &str, document: &str) -> bool {
        let url = self.document_url(category, document);
        match self.client.head(&url).send() {
            Ok(response) => {
                debug!(document, category, status = %response.status(), "probe");
                response.status() == StatusCode::OK
            }
            Err(error) => {
                warn!(document, category, %error, "probe failed");
                false
            }
        }
    }

    fn fetch(&self, category: &str, document: &str) -> Result<String> {
        let url = self.document_url(category, document);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| Error::Transport { url: url.clone(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { url, status: status.as_u16() });
        }
        response
            .text()
            .map_err(|source| Error::Transport { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    pub(crate) struct CountingSource {
        categories: Vec<String>,
        present: Vec<(&'static str, &'static str)>,
        pub probes: Cell<usize>,
    }

    impl Source for CountingSource {
        fn list_categories(&self) -> Vec<String> { self.categories.clone() }

        fn probe(&self, category: &str, document: &str) -> bool {
            self.probes.set(self.probes.get() + 1);
            self.present.iter().any(|(c, d)| *c == category && *d == document)
        }

        fn fetch(&self, _category: &str, _document: &str) -> Result<String> {
            panic!("locate never downloads");
        }
    }

    #[test]
    fn empty_category_list_finds_nothing() {
        let source = CountingSource { categories: vec![], present: vec![], probes: Cell::new(0) };
        let categories = source.list_categories();
        assert_eq!(locate(&source, &categories, "add.yaml"), None);
        assert_eq!(source.probes.get(), 0);
    }

    #[test]
    fn first_matching_category_wins_and_stops_probing() {
        let source = CountingSource {
            categories: vec!["B".into(), "I".into(), "M".into(), "Zbb".into()],
            present: vec![("I", "add.yaml"), ("Zbb", "add.yaml")],
            probes: Cell::new(0),
        };
        let categories = source.list_categories();
        assert_eq!(locate(&source, &categories, "add.yaml").as_deref(), Some("I"));
        assert_eq!(source.probes.get(), 2);
    }

    #[test]
    fn listing_keeps_visible_directories() {
        let entries: Vec<ListingEntry> = serde_json::from_str(
            r#"[
                {"name": "I", "type": "dir", "path": "spec/std/isa/inst/I"},
                {"name": ".hidden", "type": "dir"},
                {"name": "README.adoc", "type": "file"},
                {"name": "Zicsr", "type": "dir"}
            ]"#,
        )
        .unwrap();
        assert_eq!(categories_from_listing(entries), ["I", "Zicsr"]);
    }

    #[test]
    fn document_url_joins_without_double_slash() {
        let source = GithubSource::new(RemoteConfig {
            raw_base_url: "https://example.invalid/inst/".into(),
            ..RemoteConfig::default()
        })
        .unwrap();
        assert_eq!(
            source.document_url("I", "add.yaml"),
            "https://example.invalid/inst/I/add.yaml"
        );
    }
}
