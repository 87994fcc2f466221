//! 产品资源服务接口
//!
//! 视图模型只依赖这个 trait，HTTP 实现位于 `infrastructure::http`，
//! 测试中可以换成内存替身。

use async_trait::async_trait;

use super::model::{Product, ProductEnvelope};
use crate::core::error::Result;

/// 产品 REST 资源的五个操作，每个操作对应一次网络请求，不重试
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn get_products(&self) -> Result<ProductEnvelope>;

    async fn add_product(&self, product: &Product) -> Result<Product>;

    async fn update_product(&self, id: &str, product: &Product) -> Result<Product>;

    async fn delete_product(&self, id: &str) -> Result<()>;

    /// 查询 ID 是否已被占用
    async fn verify_product_id(&self, id: &str) -> Result<bool>;
}
