//! 产品 Logo 地址回退

use std::sync::OnceLock;

use regex::Regex;

pub const DEFAULT_IMAGE_URL: &str = "/defaultImage.jpg";

// 可选协议 + 域名 / IPv4 / localhost + 可选路径与查询，不区分大小写
const URL_PATTERN: &str = concat!(
    r"(?i)^(https?://)?",
    r"((([A-Z0-9](?:[A-Z0-9-]*[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.))",
    r"|(([0-9]{1,3}\.){3}[0-9]{1,3})",
    r"|localhost|([A-Z0-9-]+\.[A-Z]{2,})",
    r"|([A-Z0-9-]+\.[A-Z0-9-]+))",
    r"(/[A-Z0-9()@?^=%&:/~+#-]*[A-Z0-9()@?^=%&/~+#-])?",
);

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern must compile"))
}

pub fn is_valid_url(value: &str) -> bool {
    url_pattern().is_match(value)
}

/// 有效地址原样返回，否则返回默认图片
pub fn default_image(value: Option<&str>) -> &str {
    match value {
        Some(url) if !url.is_empty() && is_valid_url(url) => url,
        _ => DEFAULT_IMAGE_URL,
    }
}

/// 可配置默认图片的回退规则
#[derive(Debug, Clone)]
pub struct DefaultImage {
    default_url: String,
}

impl DefaultImage {
    pub fn new(default_url: impl Into<String>) -> Self {
        Self {
            default_url: default_url.into(),
        }
    }

    pub fn transform<'a>(&'a self, value: Option<&'a str>) -> &'a str {
        match value {
            Some(url) if !url.is_empty() && is_valid_url(url) => url,
            _ => &self.default_url,
        }
    }
}

impl Default for DefaultImage {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_URL)
    }
}
