//! 基础设施层：配置、日志与 HTTP 客户端

pub mod config;
pub mod http;
pub mod logger;
