use crate::auth::model::UserId;
use crate::items::model::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OrderId = i64;

/// 주문 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
    Completed,
}

// 주문 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub item_id: ItemId,
    pub buyer_id: UserId,
    pub quantity: i64,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// 주문 생성 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub item_id: ItemId,
    pub quantity: i64,
}
