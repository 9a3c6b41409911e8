use crate::domain::model::{ProductId, ProductMetadata, StockRecord};
use crate::domain::ports::{ConfigProvider, StockApi};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stock/product lookups over HTTP. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpStockClient {
    client: Client,
    base_url: Url,
}

impl HttpStockClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &'static str, id: ProductId) -> Result<T> {
        let url = self
            .base_url
            .join(&format!("{}/{}", resource, id))
            .map_err(|e| CartError::Config {
                message: format!("Cannot build {} URL: {}", resource, e),
            })?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("{} responded with {}", url, status);

        if status == StatusCode::NOT_FOUND {
            return Err(CartError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(CartError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    let with_slash = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&with_slash).map_err(|e| CartError::InvalidConfigValue {
        field: "api.base_url".to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

#[async_trait]
impl StockApi for HttpStockClient {
    async fn get_stock(&self, id: ProductId) -> Result<StockRecord> {
        self.fetch("stock", id).await
    }

    async fn get_product(&self, id: ProductId) -> Result<ProductMetadata> {
        self.fetch("products", id).await
    }
}
