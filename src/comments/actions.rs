/// 댓글 관련 액션
/// 1. 댓글 목록 조회
/// 2. 댓글 작성
/// 3. 답글 작성
// region:    --- Imports
use super::model::{Comment, NewComment};
use crate::actions::{reject, require_login, run};
use crate::app::AppContext;
use crate::error::ClientError;
use crate::items::model::ItemId;
use crate::store::{Payload, RequestKey};
use tokio_util::sync::CancellationToken;
use tracing::info;

// endregion: --- Imports

/// 댓글 최대 길이
pub const MAX_COMMENT_LEN: usize = 500;

// region:    --- Actions
/// 1. 댓글 목록 조회
pub async fn fetch_comments(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<Vec<Comment>, ClientError> {
    info!("{:<12} --> 댓글 목록 조회 item: {}", "Comments", item_id);
    run(
        ctx,
        RequestKey::Comments(item_id),
        cancel,
        ctx.api.list_comments(item_id),
        move |comments| Payload::Comments {
            item_id,
            comments: comments.clone(),
        },
    )
    .await
}

/// 2. 댓글 작성
pub async fn post_comment(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
    content: &str,
) -> Result<Comment, ClientError> {
    let req = NewComment {
        item_id,
        content: content.trim().to_string(),
        parent_id: None,
        reply_user_id: None,
    };
    submit(ctx, cancel, req).await
}

/// 3. 답글 작성
///
/// 답글의 답글도 최상위 댓글에 붙이고, 답한 대상의 작성자를 기록한다.
pub async fn post_reply(
    ctx: &AppContext,
    cancel: &CancellationToken,
    target: &Comment,
    content: &str,
) -> Result<Comment, ClientError> {
    let req = NewComment {
        item_id: target.item_id,
        content: content.trim().to_string(),
        parent_id: Some(target.parent_id.unwrap_or(target.id)),
        reply_user_id: Some(target.user_id),
    };
    submit(ctx, cancel, req).await
}

// endregion: --- Actions

async fn submit(
    ctx: &AppContext,
    cancel: &CancellationToken,
    req: NewComment,
) -> Result<Comment, ClientError> {
    let key = RequestKey::PostComment(req.item_id);
    require_login(ctx, key)?;

    if req.content.is_empty() {
        return reject(ctx, key, ClientError::validation("내용을 입력해 주세요."));
    }
    if req.content.chars().count() > MAX_COMMENT_LEN {
        return reject(
            ctx,
            key,
            ClientError::validation(format!("댓글은 {}자까지 입력할 수 있습니다.", MAX_COMMENT_LEN)),
        );
    }
    info!(
        "{:<12} --> 댓글 작성 item: {}, parent: {:?}",
        "Comments", req.item_id, req.parent_id
    );

    run(ctx, key, cancel, ctx.api.create_comment(&req), |comment| {
        Payload::CommentPosted(comment.clone())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::auth::actions::login;
    use std::sync::Arc;

    async fn logged_in() -> (Arc<StubApi>, AppContext) {
        let api = Arc::new(StubApi::seeded());
        let ctx = AppContext::new(api.clone());
        login(&ctx, &CancellationToken::new(), "bob", "password123")
            .await
            .unwrap();
        (api, ctx)
    }

    #[tokio::test]
    async fn posted_comment_is_appended() {
        let (_, ctx) = logged_in().await;
        let cancel = CancellationToken::new();
        let before = fetch_comments(&ctx, &cancel, 1).await.unwrap().len();

        let comment = post_comment(&ctx, &cancel, 1, "  아직 판매중인가요?  ").await.unwrap();

        let state = ctx.store.snapshot();
        assert_eq!(comment.content, "아직 판매중인가요?");
        assert_eq!(state.comments.list.len(), before + 1);
        assert_eq!(state.comments.list.last().map(|c| c.id), Some(comment.id));
    }

    #[tokio::test]
    async fn reply_to_reply_attaches_to_root() {
        let (_, ctx) = logged_in().await;
        let cancel = CancellationToken::new();
        let comments = fetch_comments(&ctx, &cancel, 1).await.unwrap();
        let root = comments.iter().find(|c| c.parent_id.is_none()).unwrap().clone();

        let first = post_reply(&ctx, &cancel, &root, "네 가능합니다").await.unwrap();
        let second = post_reply(&ctx, &cancel, &first, "감사합니다").await.unwrap();

        assert_eq!(second.parent_id, Some(root.id));
        assert_eq!(second.reply_user_id, Some(first.user_id));
        assert_eq!(second.reply_username.as_deref(), Some(first.username.as_str()));
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_locally() {
        let (api, ctx) = logged_in().await;
        let calls = api.calls();

        let result = post_comment(&ctx, &CancellationToken::new(), 1, "   ").await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert_eq!(api.calls(), calls);
    }
}
