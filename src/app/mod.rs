//! 应用层

pub mod backend;
pub mod display;
pub mod navigation;
pub mod product;
