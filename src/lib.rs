//! # 产品目录管理
//!
//! 通过后端 REST 资源管理产品：
//! - 列表视图：加载、按名称搜索、按每页数量截断、选中后编辑或删除
//! - 新增/编辑表单：字段校验，修订日期由发布日期推导
//! - 展示辅助：Logo 地址回退、悬停提示
//! - 内存后端：实现同一资源，供本地开发与测试使用

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::app::navigation::{HistoryNavigator, Navigator, Notifier, Route};
pub use crate::app::product::{Product, ProductApi, ProductEnvelope};
pub use crate::core::error::{CatalogError, ErrorCategory, Result};
pub use crate::infrastructure::http::HttpProductApi;
