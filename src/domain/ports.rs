use crate::domain::model::{CodeResponse, Movie};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Source of movie and theater data.
#[async_trait]
pub trait MoopRepository: Send + Sync {
    async fn search_movie(&self, query: &str) -> Result<Vec<Movie>>;
    async fn get_code_list(&self) -> Result<CodeResponse>;
}
