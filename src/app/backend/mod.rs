//! 内存后端，实现产品 REST 资源供本地开发与端到端测试使用

pub mod handler;
pub mod service;

pub use handler::{router, AppState};
pub use service::ProductStore;
