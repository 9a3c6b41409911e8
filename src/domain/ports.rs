use crate::core::Notice;
use crate::domain::model::{ProductId, ProductMetadata, StockRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Durable key/value medium holding opaque bytes.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write(&self, key: &str, data: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait StockApi: Send + Sync {
    async fn get_stock(&self, id: ProductId) -> Result<StockRecord>;
    async fn get_product(&self, id: ProductId) -> Result<ProductMetadata>;
}

/// Side channel for user-facing failure messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_dir(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
