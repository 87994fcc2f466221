//! 产品资源的 HTTP 客户端

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::config::ApiConfig;
use crate::app::product::{Product, ProductApi, ProductEnvelope};
use crate::core::error::{CatalogError, Result};

/// 写操作可能返回裸产品，也可能包在 `data` 里
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(data) => data,
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| CatalogError::Decode(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct HttpProductApi {
    http: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(base_url.to_string()));
        }
        if let Ok(mut segments) = base_url.path_segments_mut() {
            segments.pop_if_empty();
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("product-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 在基础地址后追加路径段，段内容会被转义
    fn url_with(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 非 2xx 响应原样转为错误，尽量保留后端给出的 message
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|err| err.message)
            .unwrap_or(body);
        Err(CatalogError::from_status(status.as_u16(), message))
    }

    /// 读取响应体；传输失败是网络错误，内容不符合预期是解析错误
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        parse_body::<Payload<T>>(&body).map(Payload::into_inner)
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn get_products(&self) -> Result<ProductEnvelope> {
        debug!(url = %self.base_url, "GET products");
        let response = self.http.get(self.base_url.clone()).send().await?;
        let body = Self::check(response).await?.bytes().await?;
        parse_body(&body)
    }

    async fn add_product(&self, product: &Product) -> Result<Product> {
        debug!(id = %product.id, "POST product");
        let response = self
            .http
            .post(self.base_url.clone())
            .json(product)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn update_product(&self, id: &str, product: &Product) -> Result<Product> {
        let url = self.url_with(&[id])?;
        debug!(%url, "PUT product");
        let response = self.http.put(url).json(product).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let url = self.url_with(&[id])?;
        debug!(%url, "DELETE product");
        let response = self.http.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn verify_product_id(&self, id: &str) -> Result<bool> {
        let url = self.url_with(&["verification", id])?;
        debug!(%url, "GET verification");
        let response = self.http.get(url).send().await?;
        Self::decode(Self::check(response).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpProductApi {
        HttpProductApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn item_urls_append_segments() {
        let api = client("http://localhost:3002/bp/products");
        assert_eq!(
            api.url_with(&["abc"]).unwrap().as_str(),
            "http://localhost:3002/bp/products/abc"
        );
        assert_eq!(
            api.url_with(&["verification", "abc"]).unwrap().as_str(),
            "http://localhost:3002/bp/products/verification/abc"
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let api = client("http://localhost:3002/bp/products/");
        assert_eq!(api.base_url().as_str(), "http://localhost:3002/bp/products");
        assert_eq!(
            api.url_with(&["abc"]).unwrap().as_str(),
            "http://localhost:3002/bp/products/abc"
        );
    }

    #[test]
    fn ids_are_escaped() {
        let api = client("http://localhost:3002/bp/products");
        assert_eq!(
            api.url_with(&["a/b c"]).unwrap().as_str(),
            "http://localhost:3002/bp/products/a%2Fb%20c"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpProductApi::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
        let err = HttpProductApi::new("mailto:someone@example.com", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUrl(_)));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_body::<ProductEnvelope>(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert_eq!(err.category(), crate::core::error::ErrorCategory::Unexpected);

        let envelope = parse_body::<ProductEnvelope>(br#"{"data": []}"#).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn payload_accepts_both_shapes() {
        let wrapped: Payload<bool> = serde_json::from_str(r#"{"data": true}"#).unwrap();
        assert!(wrapped.into_inner());
        let bare: Payload<bool> = serde_json::from_str("false").unwrap();
        assert!(!bare.into_inner());
    }
}
