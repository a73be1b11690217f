/// 찜 관련 액션
/// 1. 찜 목록 조회
/// 2. 찜 여부 조회
/// 3. 찜 추가 / 삭제
/// 4. 찜 토글 (같은 상품의 토글은 순서대로 처리)
// region:    --- Imports
use super::model::{Favorite, FavoriteCheck, FavoriteId};
use crate::actions::{reject, require_login, run};
use crate::app::AppContext;
use crate::error::ClientError;
use crate::items::model::ItemId;
use crate::store::{Payload, RequestKey};
use tokio_util::sync::CancellationToken;
use tracing::info;

// endregion: --- Imports

// region:    --- Actions
/// 1. 찜 목록 조회
pub async fn fetch_favorites(
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Result<Vec<Favorite>, ClientError> {
    let key = RequestKey::FavoriteList;
    require_login(ctx, key)?;
    info!("{:<12} --> 찜 목록 조회", "Favorites");

    run(ctx, key, cancel, ctx.api.list_favorites(), |favorites| {
        Payload::Favorites(favorites.clone())
    })
    .await
}

/// 2. 찜 여부 조회
///
/// 토글과 같은 잠금을 잡으므로, 토글보다 늦게 도착한 조회 결과가 토글 결과를 덮어쓰지 않는다.
pub async fn check_favorite(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<FavoriteCheck, ClientError> {
    let key = RequestKey::FavoriteCheck(item_id);
    require_login(ctx, key)?;
    let _guard = acquire(ctx, cancel, RequestKey::FavoriteToggle(item_id)).await?;
    check_unlocked(ctx, cancel, item_id).await
}

/// 3-1. 찜 추가
pub async fn add_favorite(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<Favorite, ClientError> {
    let key = RequestKey::FavoriteToggle(item_id);
    require_login(ctx, key)?;
    let _guard = acquire(ctx, cancel, key).await?;
    add_unlocked(ctx, cancel, item_id).await
}

/// 3-2. 찜 삭제
pub async fn remove_favorite(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
    favorite_id: FavoriteId,
) -> Result<(), ClientError> {
    let key = RequestKey::FavoriteToggle(item_id);
    require_login(ctx, key)?;
    let _guard = acquire(ctx, cancel, key).await?;
    remove_unlocked(ctx, cancel, item_id, favorite_id).await
}

/// 4. 찜 토글. 토글 후 찜 상태를 돌려준다.
///
/// 같은 상품에 대한 토글은 잠금으로 직렬화되므로, 연속 두 번의 클릭은
/// 추가 후 삭제(또는 그 반대)로 처리되어 중복 기록이 생기지 않는다.
pub async fn toggle_favorite(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<bool, ClientError> {
    let key = RequestKey::FavoriteToggle(item_id);
    require_login(ctx, key)?;
    let _guard = acquire(ctx, cancel, key).await?;

    let pointer = match ctx.store.select(|s| s.favorites.pointer(item_id)) {
        Some(pointer) => pointer,
        None => {
            let check = check_unlocked(ctx, cancel, item_id).await?;
            check.favorite_id.filter(|_| check.favorited)
        }
    };

    match pointer {
        Some(favorite_id) => {
            remove_unlocked(ctx, cancel, item_id, favorite_id).await?;
            Ok(false)
        }
        None => {
            add_unlocked(ctx, cancel, item_id).await?;
            Ok(true)
        }
    }
}

// endregion: --- Actions

// region:    --- Helpers
/// 토글 잠금 획득 (대기 중 취소 가능)
async fn acquire(
    ctx: &AppContext,
    cancel: &CancellationToken,
    key: RequestKey,
) -> Result<tokio::sync::OwnedMutexGuard<()>, ClientError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        guard = ctx.locks.acquire(key) => Ok(guard),
    }
}

async fn check_unlocked(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<FavoriteCheck, ClientError> {
    let key = RequestKey::FavoriteCheck(item_id);
    run(ctx, key, cancel, ctx.api.check_favorite(item_id), move |check| {
        Payload::FavoriteStatus {
            item_id,
            favorite_id: check.favorite_id.filter(|_| check.favorited),
        }
    })
    .await
}

async fn add_unlocked(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
) -> Result<Favorite, ClientError> {
    info!("{:<12} --> 찜 추가 item: {}", "Favorites", item_id);
    run(
        ctx,
        RequestKey::FavoriteToggle(item_id),
        cancel,
        ctx.api.add_favorite(item_id),
        |favorite| Payload::FavoriteAdded(favorite.clone()),
    )
    .await
}

async fn remove_unlocked(
    ctx: &AppContext,
    cancel: &CancellationToken,
    item_id: ItemId,
    favorite_id: FavoriteId,
) -> Result<(), ClientError> {
    if favorite_id <= 0 {
        return reject(
            ctx,
            RequestKey::FavoriteToggle(item_id),
            ClientError::validation("잘못된 찜 정보입니다."),
        );
    }
    info!(
        "{:<12} --> 찜 삭제 item: {}, favorite: {}",
        "Favorites", item_id, favorite_id
    );
    run(
        ctx,
        RequestKey::FavoriteToggle(item_id),
        cancel,
        ctx.api.remove_favorite(favorite_id),
        move |_| Payload::FavoriteRemoved {
            item_id,
            favorite_id,
        },
    )
    .await
}

// endregion: --- Helpers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::auth::actions::login;
    use std::sync::Arc;
    use std::time::Duration;

    async fn logged_in() -> (Arc<StubApi>, AppContext) {
        login_with(StubApi::seeded()).await
    }

    async fn login_with(api: StubApi) -> (Arc<StubApi>, AppContext) {
        let api = Arc::new(api);
        let ctx = AppContext::new(api.clone());
        login(&ctx, &CancellationToken::new(), "alice", "password123")
            .await
            .unwrap();
        (api, ctx)
    }

    #[tokio::test]
    async fn toggle_flips_state() {
        let (_, ctx) = logged_in().await;
        let cancel = CancellationToken::new();

        assert!(toggle_favorite(&ctx, &cancel, 1).await.unwrap());
        assert_eq!(ctx.store.select(|s| s.favorites.is_favorited(1)), Some(true));

        assert!(!toggle_favorite(&ctx, &cancel, 1).await.unwrap());
        assert_eq!(ctx.store.select(|s| s.favorites.is_favorited(1)), Some(false));
    }

    #[tokio::test]
    async fn rapid_toggles_do_not_duplicate() {
        let (api, ctx) = logged_in().await;
        let cancel = CancellationToken::new();

        let (first, second) = tokio::join!(
            toggle_favorite(&ctx, &cancel, 1),
            toggle_favorite(&ctx, &cancel, 1)
        );

        assert!(first.unwrap());
        assert!(!second.unwrap());
        assert_eq!(api.favorite_count(1), 0);
        assert_eq!(ctx.store.select(|s| s.favorites.count_for(1)), 0);
    }

    #[tokio::test]
    async fn toggle_requires_login() {
        let api = Arc::new(StubApi::seeded());
        let ctx = AppContext::new(api.clone());

        let result = toggle_favorite(&ctx, &CancellationToken::new(), 1).await;

        assert_eq!(result, Err(ClientError::Unauthenticated));
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn list_rebuilds_pointers() {
        let (_, ctx) = logged_in().await;
        let cancel = CancellationToken::new();
        add_favorite(&ctx, &cancel, 2).await.unwrap();

        let favorites = fetch_favorites(&ctx, &cancel).await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(ctx.store.select(|s| s.favorites.is_favorited(2)), Some(true));
    }

    #[tokio::test]
    async fn late_check_does_not_override_toggle() {
        let (api, ctx) =
            login_with(StubApi::seeded().with_check_delay(Duration::from_millis(50))).await;
        let cancel = CancellationToken::new();

        let (check, toggled) = tokio::join!(
            check_favorite(&ctx, &cancel, 2),
            toggle_favorite(&ctx, &cancel, 2)
        );

        assert!(!check.unwrap().favorited);
        assert!(toggled.unwrap());
        assert_eq!(api.favorite_count(2), 1);
        assert_eq!(ctx.store.select(|s| s.favorites.is_favorited(2)), Some(true));

        assert!(!toggle_favorite(&ctx, &cancel, 2).await.unwrap());
        assert_eq!(api.favorite_count(2), 0);
    }

    #[tokio::test]
    async fn cancelled_toggle_releases_lock() {
        let (api, ctx) =
            login_with(StubApi::seeded().with_latency(Duration::from_millis(50))).await;
        let cancel = CancellationToken::new();

        let pending = {
            let ctx = ctx.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { toggle_favorite(&ctx, &cancel, 1).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();

        assert_eq!(pending.await.unwrap(), Err(ClientError::Cancelled));
        assert_eq!(api.favorite_count(1), 0);
        assert!(!ctx
            .store
            .select(|s| s.requests.is_loading(RequestKey::FavoriteToggle(1))));

        let toggled = toggle_favorite(&ctx, &CancellationToken::new(), 1).await;
        assert_eq!(toggled, Ok(true));
        assert_eq!(api.favorite_count(1), 1);
    }
}
