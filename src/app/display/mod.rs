//! 展示辅助：图片地址回退与悬停提示

pub mod image;
pub mod tooltip;

pub use image::{default_image, DefaultImage, DEFAULT_IMAGE_URL};
pub use tooltip::{
    BoundingRect, LabelHandle, Overlay, ScrollOffset, Tooltip, TooltipLabel, TooltipSurface,
};
