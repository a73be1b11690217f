// region:    --- Imports
use super::requests::{RequestStatus, SliceName};
use super::{Action, AppState, Payload};
use tracing::debug;

// endregion: --- Imports

// region:    --- Reducer
/// 액션을 상태에 반영한다. 상태가 바뀌었으면 true
///
/// 같은 요청 키의 최신 요청이 아닌 결과는 버린다.
pub fn reduce(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::Pending { key, id } => {
            state.requests.begin(key, id);
            true
        }
        Action::Fulfilled { key, id, payload } => {
            if !state.requests.settle(key, id, RequestStatus::Fulfilled) {
                debug!("{:<12} --> 오래된 응답 무시: {:?}#{}", "Reducer", key, id);
                return false;
            }
            set_error(state, key.slice(), None);
            apply(state, payload);
            true
        }
        Action::Rejected { key, id, message } => {
            if !state
                .requests
                .settle(key, id, RequestStatus::Rejected(message.clone()))
            {
                debug!("{:<12} --> 오래된 실패 무시: {:?}#{}", "Reducer", key, id);
                return false;
            }
            set_error(state, key.slice(), Some(message.clone()));
            state.notify(message);
            true
        }
        Action::Aborted { key, id } => state.requests.settle(key, id, RequestStatus::Idle),
        Action::LoggedOut => {
            state.auth.logged_out();
            state.favorites = Default::default();
            state.orders = Default::default();
            true
        }
        Action::DismissNotification(notification_id) => {
            let before = state.notifications.len();
            state.notifications.retain(|n| n.id != notification_id);
            before != state.notifications.len()
        }
        Action::ClearItemView(item_id) => {
            state.items.clear_current(item_id);
            state.comments.clear(item_id);
            state.requests.forget_item(item_id);
            true
        }
    }
}

/// 성공 결과를 슬라이스에 반영
fn apply(state: &mut AppState, payload: Payload) {
    match payload {
        Payload::LoggedIn(session) => state.auth.logged_in(session),
        Payload::Registered(user) => state.auth.registered(user),
        Payload::CurrentUser(user) => state.auth.current_user(user),
        Payload::ItemPage { query, page } => state.items.page_loaded(query, page),
        Payload::ItemDetail(item) => state.items.item_loaded(item),
        Payload::Favorites(favorites) => state.favorites.list_loaded(favorites),
        Payload::FavoriteStatus {
            item_id,
            favorite_id,
        } => state.favorites.status_loaded(item_id, favorite_id),
        Payload::FavoriteAdded(favorite) => state.favorites.added(favorite),
        Payload::FavoriteRemoved {
            item_id,
            favorite_id,
        } => state.favorites.removed(item_id, favorite_id),
        Payload::Comments { item_id, comments } => state.comments.list_loaded(item_id, comments),
        Payload::CommentPosted(comment) => state.comments.posted(comment),
        Payload::OrderPlaced(order) => state.orders.placed(order),
    }
}

fn set_error(state: &mut AppState, slice: SliceName, error: Option<String>) {
    let slot = match slice {
        SliceName::Auth => &mut state.auth.error,
        SliceName::Items => &mut state.items.error,
        SliceName::Favorites => &mut state.favorites.error,
        SliceName::Comments => &mut state.comments.error,
        SliceName::Orders => &mut state.orders.error,
    };
    *slot = error;
}

// endregion: --- Reducer
