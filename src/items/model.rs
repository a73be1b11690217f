use crate::auth::model::UserId;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ItemId = i64;

/// 상품 상태
///
/// 서버가 숫자 코드(0..=3)로 내려주는 경우도 허용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Unlisted,
    Available,
    Reserved,
    Sold,
}

impl ItemStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ItemStatus::Unlisted),
            1 => Some(ItemStatus::Available),
            2 => Some(ItemStatus::Reserved),
            3 => Some(ItemStatus::Sold),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Unlisted => "unlisted",
            ItemStatus::Available => "available",
            ItemStatus::Reserved => "reserved",
            ItemStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unlisted" => Ok(ItemStatus::Unlisted),
            "available" => Ok(ItemStatus::Available),
            "reserved" => Ok(ItemStatus::Reserved),
            "sold" => Ok(ItemStatus::Sold),
            other => other
                .parse::<i64>()
                .ok()
                .and_then(ItemStatus::from_code)
                .ok_or_else(|| format!("알 수 없는 상품 상태: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => ItemStatus::from_code(code)
                .ok_or_else(|| D::Error::custom(format!("알 수 없는 상품 상태 코드: {}", code))),
            Raw::Name(name) => name.parse().map_err(D::Error::custom),
        }
    }
}

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub status: ItemStatus,
    pub stock: i64,
    pub seller_id: UserId,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Item {
    /// 구매 가능 여부 (판매중 + 재고 있음)
    pub fn is_purchasable(&self) -> bool {
        self.status == ItemStatus::Available && self.stock > 0
    }
}

/// 상품 목록 조회 조건
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 20,
            keyword: None,
            status: None,
        }
    }
}

// 페이지 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_accepts_names_and_codes() {
        let by_name: ItemStatus = serde_json::from_value(json!("available")).unwrap();
        let by_code: ItemStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(by_name, ItemStatus::Available);
        assert_eq!(by_code, ItemStatus::Sold);
        assert!(serde_json::from_value::<ItemStatus>(json!(9)).is_err());
    }

    #[test]
    fn item_decodes_mock_shape() {
        let item: Item = serde_json::from_value(json!({
            "id": 7,
            "name": "자전거",
            "price": 120000.0,
            "status": "reserved",
            "stock": 1,
            "sellerId": 2
        }))
        .unwrap();
        assert_eq!(item.status, ItemStatus::Reserved);
        assert!(item.images.is_empty());
        assert!(!item.is_purchasable());
    }
}
