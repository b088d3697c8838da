use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// NewsAPI top-headlines client. News is best-effort content: the dispatch
/// pipeline substitutes a sentinel block when this client fails.
pub struct NewsClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct Headline {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
}

#[derive(serde::Deserialize)]
struct HeadlinesResponse {
    articles: Vec<RawArticle>,
}

#[derive(serde::Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl NewsClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> NewsClient {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()
            .unwrap();

        NewsClient {
            http_client,
            base_url,
            api_key,
        }
    }

    /// Fetch up to `limit` headlines for a two-letter `region` code. Articles
    /// without both a title and a description are dropped.
    pub async fn top_headlines(
        &self,
        region: &str,
        limit: u16,
    ) -> Result<Vec<Headline>, reqwest::Error> {
        let url = format!("{}/v2/top-headlines", self.base_url);
        let query = [
            ("country", region.to_string()),
            ("pageSize", limit.to_string()),
            ("apiKey", self.api_key.expose_secret().clone()),
        ];

        let response: HeadlinesResponse = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let headlines = response
            .articles
            .into_iter()
            .filter_map(|article| match (article.title, article.description) {
                (Some(title), Some(description)) => Some(Headline {
                    title,
                    description,
                    url: article.url,
                }),
                _ => None,
            })
            .collect();

        Ok(headlines)
    }
}
