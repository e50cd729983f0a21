//! Web search tool for the agent pipeline
//!
//! Wraps the Serper search API. Results are folded into a plain-text
//! context block the agents read; a failed search degrades to an empty
//! block so the pipeline keeps running.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::SearchConfig;

/// One organic search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Trait for the agents' web-search tool
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Organic results for a query, best first
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Serper search client
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: u32,
}

impl SerperClient {
    /// Create a new client
    pub fn new(config: &SearchConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("tripsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            max_results: config.max_results,
        })
    }
}

#[async_trait]
impl SearchTool for SerperClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let request = serper::SearchRequest {
            q: query,
            num: self.max_results,
        };

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Search request failed")?
            .error_for_status()
            .context("Search request rejected")?;

        let body: serper::SearchResponse = response
            .json()
            .await
            .context("Failed to parse search response")?;

        let results: Vec<SearchResult> = body
            .organic
            .unwrap_or_default()
            .into_iter()
            .filter_map(serper::OrganicResult::into_result)
            .take(self.max_results as usize)
            .collect();

        debug!(count = results.len(), "Search results received");
        Ok(results)
    }
}

/// Render results as the context block handed to an agent. Empty input
/// yields an empty block.
#[must_use]
pub fn format_context(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut block = format!("Web search results for \"{query}\":\n");
    for (index, result) in results.iter().enumerate() {
        block.push_str(&format!(
            "{}. {} ({})\n   {}\n",
            index + 1,
            result.title,
            result.link,
            result.snippet
        ));
    }
    block
}

/// Serper API wire structures
mod serper {
    use serde::{Deserialize, Serialize};

    use super::SearchResult;

    #[derive(Debug, Serialize)]
    pub struct SearchRequest<'a> {
        pub q: &'a str,
        pub num: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub organic: Option<Vec<OrganicResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OrganicResult {
        pub title: Option<String>,
        pub link: Option<String>,
        pub snippet: Option<String>,
    }

    impl OrganicResult {
        /// Hits without a title are dropped
        pub fn into_result(self) -> Option<SearchResult> {
            Some(SearchResult {
                title: self.title?,
                link: self.link.unwrap_or_default(),
                snippet: self.snippet.unwrap_or_default(),
            })
        }
    }
}
