/// 상품 상세 화면
/// 상품, 찜 여부, 댓글을 불러오고 사용자 동작을 액션으로 바꾼다.
// region:    --- Imports
use crate::app::AppContext;
use crate::comments::actions as comment_actions;
use crate::comments::model::Comment;
use crate::error::ClientError;
use crate::favorites::actions as favorite_actions;
use crate::items::actions as item_actions;
use crate::items::model::ItemId;
use crate::orders::actions as order_actions;
use crate::orders::model::Order;
use crate::tasks::ViewScope;
use tracing::info;

// endregion: --- Imports

// region:    --- Item Detail View
pub struct ItemDetailView {
    ctx: AppContext,
    item_id: ItemId,
    scope: ViewScope,
    draft: String,
    reply_target: Option<Comment>,
}

impl ItemDetailView {
    /// 화면 진입. 부모 범위가 취소되면 이 화면의 요청도 함께 취소된다.
    pub fn mount(ctx: AppContext, parent: &ViewScope, item_id: ItemId) -> Self {
        info!("{:<12} --> 상품 화면 진입 id: {}", "ItemView", item_id);
        let scope = parent.child();

        {
            let ctx = ctx.clone();
            let token = scope.token().clone();
            scope.spawn(async move {
                let _ = item_actions::fetch_item(&ctx, &token, item_id).await;
            });
        }
        {
            let ctx = ctx.clone();
            let token = scope.token().clone();
            scope.spawn(async move {
                let _ = comment_actions::fetch_comments(&ctx, &token, item_id).await;
            });
        }
        if ctx.store.select(|s| s.auth.is_logged_in()) {
            let ctx = ctx.clone();
            let token = scope.token().clone();
            scope.spawn(async move {
                let _ = favorite_actions::check_favorite(&ctx, &token, item_id).await;
            });
        }

        Self {
            ctx,
            item_id,
            scope,
            draft: String::new(),
            reply_target: None,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn reply_target(&self) -> Option<&Comment> {
        self.reply_target.as_ref()
    }

    /// 화면이 시작한 요청이 끝날 때까지 대기
    pub async fn idle(&self) {
        self.scope.idle().await;
    }

    // region:    --- Intents

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// 답글 대상 선택
    pub fn start_reply(&mut self, comment: Comment) {
        self.reply_target = Some(comment);
    }

    pub fn cancel_reply(&mut self) {
        self.reply_target = None;
    }

    /// 댓글(또는 답글) 등록. 성공하면 입력창을 비운다.
    pub async fn submit_comment(&mut self) -> Result<Comment, ClientError> {
        let token = self.scope.token().clone();
        let result = match &self.reply_target {
            Some(target) => {
                comment_actions::post_reply(&self.ctx, &token, target, &self.draft).await
            }
            None => {
                comment_actions::post_comment(&self.ctx, &token, self.item_id, &self.draft).await
            }
        };

        if result.is_ok() {
            self.draft.clear();
            self.reply_target = None;
        }
        result
    }

    /// 특정 댓글에 답글 등록
    pub async fn submit_reply(
        &mut self,
        target: Comment,
        content: impl Into<String>,
    ) -> Result<Comment, ClientError> {
        self.start_reply(target);
        self.set_draft(content);
        self.submit_comment().await
    }

    /// 찜 토글
    pub async fn toggle_favorite(&self) -> Result<bool, ClientError> {
        favorite_actions::toggle_favorite(&self.ctx, self.scope.token(), self.item_id).await
    }

    /// 주문하기. 화면에 불러온 상품 정보로 먼저 검증한다.
    pub async fn place_order(&self, quantity: i64) -> Result<Order, ClientError> {
        let item = self
            .ctx
            .store
            .select(|s| s.items.current_for(self.item_id).cloned())
            .ok_or_else(|| ClientError::validation("상품 정보를 불러오는 중입니다."))?;
        order_actions::place_order(&self.ctx, self.scope.token(), &item, quantity).await
    }

    // endregion: --- Intents
}

// endregion: --- Item Detail View
