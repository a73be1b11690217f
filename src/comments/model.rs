use crate::auth::model::UserId;
use crate::items::model::ItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type CommentId = i64;

// 댓글 모델 (한 단계까지만 스레드를 가진다)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub item_id: ItemId,
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    #[serde(default)]
    pub reply_user_id: Option<UserId>,
    #[serde(default)]
    pub reply_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// 댓글 작성 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub item_id: ItemId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_user_id: Option<UserId>,
}

/// 최상위 댓글과 그 답글 묶음
#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}
