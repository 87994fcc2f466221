//! 产品数据模型

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::dates;

/// 接受 `YYYY-MM-DD` 或 RFC3339 时间戳，只保留日历日期
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    dates::parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// 产品记录，字段名与后端 JSON 保持一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 3, max = 10, message = "ID 长度必须在 3 到 10 个字符之间"))]
    pub id: String,
    #[validate(length(min = 5, max = 100, message = "名称长度必须在 5 到 100 个字符之间"))]
    pub name: String,
    #[validate(length(min = 10, max = 200, message = "描述长度必须在 10 到 200 个字符之间"))]
    pub description: String,
    #[validate(length(min = 1, message = "Logo 不能为空"))]
    pub logo: String,
    #[serde(deserialize_with = "calendar_date")]
    pub date_release: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub date_revision: NaiveDate,
}

/// 列表接口返回的包装结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductEnvelope {
    #[serde(default)]
    pub data: Vec<Product>,
}
