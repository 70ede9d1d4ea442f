use crate::domain::model::{CodeResponse, Movie};
use crate::domain::ports::{ConfigProvider, MoopRepository};
use crate::utils::error::{MoopError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// 搜尋 API 可能直接回傳陣列，也可能包在 `list` 裡
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MovieListBody {
    Plain(Vec<Movie>),
    Wrapped { list: Vec<Movie> },
}

impl From<MovieListBody> for Vec<Movie> {
    fn from(body: MovieListBody) -> Self {
        match body {
            MovieListBody::Plain(movies) | MovieListBody::Wrapped { list: movies } => movies,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpMoopRepository {
    base_url: String,
    client: Client,
}

impl HttpMoopRepository {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        crate::utils::validation::validate_url("api.endpoint", config.api_endpoint())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            base_url: config.api_endpoint().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(MoopError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MoopRepository for HttpMoopRepository {
    async fn search_movie(&self, query: &str) -> Result<Vec<Movie>> {
        let url = self.url("search");
        let request = self.client.get(&url).query(&[("query", query)]);
        let body: MovieListBody = self.fetch_json(request, &url).await?;
        let movies: Vec<Movie> = body.into();
        tracing::debug!("Search '{}' returned {} movie(s)", query, movies.len());
        Ok(movies)
    }

    async fn get_code_list(&self) -> Result<CodeResponse> {
        let url = self.url("codes");
        let request = self.client.get(&url);
        let response: CodeResponse = self.fetch_json(request, &url).await?;
        tracing::debug!(
            "Fetched codes: {} area group(s)",
            response.iter_area_groups().count()
        );
        Ok(response)
    }
}
