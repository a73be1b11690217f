use crate::auth::model::UserId;
use crate::items::model::{Item, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type FavoriteId = i64;

// 찜 모델 (사용자-상품 연결, 상품 id와 별개의 id를 가진다)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub item_id: ItemId,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 찜 추가 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub item_id: ItemId,
}

/// 찜 여부 조회 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheck {
    pub favorited: bool,
    #[serde(default)]
    pub favorite_id: Option<FavoriteId>,
}
