// region:    --- Imports
use super::model::{Item, ItemId, ItemQuery, Page};
use crate::actions::{reject, run};
use crate::app::AppContext;
use crate::error::ClientError;
use crate::store::{Payload, RequestKey};
use tokio_util::sync::CancellationToken;
use tracing::info;

// endregion: --- Imports

// region:    --- Actions
/// 상품 목록 조회
pub async fn fetch_items(
    ctx: &AppContext,
    cancel: &CancellationToken,
    query: ItemQuery,
) -> Result<Page<Item>, ClientError> {
    let key = RequestKey::ItemList;
    if query.page == 0 || query.size == 0 {
        return reject(ctx, key, ClientError::validation("잘못된 페이지 요청입니다."));
    }
    info!("{:<12} --> 상품 목록 조회: {:?}", "Items", query);

    let request = query.clone();
    run(ctx, key, cancel, ctx.api.list_items(&request), move |page| {
        Payload::ItemPage {
            query,
            page: page.clone(),
        }
    })
    .await
}

/// 상품 상세 조회
pub async fn fetch_item(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<Item, ClientError> {
    info!("{:<12} --> 상품 상세 조회 id: {}", "Items", item_id);
    run(
        ctx,
        RequestKey::ItemDetail(item_id),
        cancel,
        ctx.api.get_item(item_id),
        |item| Payload::ItemDetail(item.clone()),
    )
    .await
}

// endregion: --- Actions
