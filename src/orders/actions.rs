/// 주문 관련 액션
/// 주문 생성 후 상품을 다시 조회한다. 두 요청은 서로 독립적이며 실패해도 되돌리지 않는다.
// region:    --- Imports
use super::model::{NewOrder, Order};
use crate::actions::{reject, require_login, run};
use crate::app::AppContext;
use crate::error::ClientError;
use crate::items::actions::fetch_item;
use crate::items::model::{Item, ItemStatus};
use crate::store::{Payload, RequestKey};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Actions
/// 주문하기
pub async fn place_order(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item: &Item,
    quantity: i64,
) -> Result<Order, ClientError> {
    let key = RequestKey::PlaceOrder(item.id);
    require_login(ctx, key)?;

    let buyer_id = ctx.store.select(|s| s.auth.user_id());
    if let Err(e) = validate_order(item, quantity, buyer_id) {
        return reject(ctx, key, e);
    }
    info!(
        "{:<12} --> 주문 요청 item: {}, quantity: {}",
        "Orders", item.id, quantity
    );

    let req = NewOrder {
        item_id: item.id,
        quantity,
    };
    let order = run(ctx, key, cancel, ctx.api.create_order(&req), |order| {
        Payload::OrderPlaced(order.clone())
    })
    .await?;
    info!("{:<12} --> 주문 성공 order: {}", "Orders", order.id);

    // 재고/상태 갱신을 위해 다시 조회 (실패해도 주문은 유지)
    if let Err(e) = fetch_item(ctx, cancel, item.id).await {
        warn!("{:<12} --> 주문 후 상품 재조회 실패: {}", "Orders", e);
    }
    Ok(order)
}

// endregion: --- Actions

/// 주문 가능 여부 검증 (네트워크 호출 전)
pub fn validate_order(item: &Item, quantity: i64, buyer_id: Option<i64>) -> Result<(), ClientError> {
    if item.stock <= 0 {
        return Err(ClientError::validation("재고가 없는 상품입니다."));
    }
    if item.status != ItemStatus::Available {
        return Err(ClientError::validation(format!(
            "주문할 수 없는 상품 상태입니다: {}",
            item.status
        )));
    }
    if quantity <= 0 {
        return Err(ClientError::validation("주문 수량은 1개 이상이어야 합니다."));
    }
    if quantity > item.stock {
        return Err(ClientError::validation("주문 수량이 재고보다 많습니다."));
    }
    if buyer_id == Some(item.seller_id) {
        return Err(ClientError::validation("본인이 등록한 상품은 주문할 수 없습니다."));
    }
    Ok(())
}
