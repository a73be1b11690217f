/// 클라이언트 스토어
/// 1. 슬라이스(auth, items, favorites, comments, orders)로 나뉜 단일 상태
/// 2. 비동기 액션의 pending / fulfilled / rejected 수명주기를 리듀서로 반영
/// 3. 변경될 때마다 리비전을 올려 화면이 다시 그려지도록 알림
// region:    --- Imports
use crate::auth::model::{Session, User};
use crate::auth::slice::AuthState;
use crate::comments::model::Comment;
use crate::comments::slice::CommentsState;
use crate::favorites::model::{Favorite, FavoriteId};
use crate::favorites::slice::FavoritesState;
use crate::items::model::{Item, ItemId, ItemQuery, Page};
use crate::items::slice::ItemsState;
use crate::orders::model::Order;
use crate::orders::slice::OrdersState;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::debug;

// endregion: --- Imports

// region:    --- Modules
pub mod reducer;
pub mod requests;

pub use requests::{RequestId, RequestKey, RequestStatus, RequestTable, SliceName};

// endregion: --- Modules

// region:    --- Actions
/// 요청 성공 결과
#[derive(Debug, Clone)]
pub enum Payload {
    LoggedIn(Session),
    Registered(User),
    CurrentUser(User),
    ItemPage {
        query: ItemQuery,
        page: Page<Item>,
    },
    ItemDetail(Item),
    Favorites(Vec<Favorite>),
    FavoriteStatus {
        item_id: ItemId,
        favorite_id: Option<FavoriteId>,
    },
    FavoriteAdded(Favorite),
    FavoriteRemoved {
        item_id: ItemId,
        favorite_id: FavoriteId,
    },
    Comments {
        item_id: ItemId,
        comments: Vec<Comment>,
    },
    CommentPosted(Comment),
    OrderPlaced(Order),
}

/// 스토어 액션
#[derive(Debug, Clone)]
pub enum Action {
    Pending {
        key: RequestKey,
        id: RequestId,
    },
    Fulfilled {
        key: RequestKey,
        id: RequestId,
        payload: Payload,
    },
    Rejected {
        key: RequestKey,
        id: RequestId,
        message: String,
    },
    /// 취소된 요청. 오류 없이 pending 상태만 정리한다.
    Aborted {
        key: RequestKey,
        id: RequestId,
    },
    LoggedOut,
    DismissNotification(u64),
    /// 상품 화면을 떠날 때 해당 상품의 상세/댓글/요청 기록 정리
    ClearItemView(ItemId),
}

// endregion: --- Actions

// region:    --- State
/// 동시에 쌓아 두는 알림 수. 넘치면 오래된 것부터 버린다.
pub const MAX_NOTIFICATIONS: usize = 3;

/// 일시적인 사용자 알림
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
}

/// 전체 상태
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub items: ItemsState,
    pub favorites: FavoritesState,
    pub comments: CommentsState,
    pub orders: OrdersState,
    pub requests: RequestTable,
    pub notifications: Vec<Notification>,
    next_notification: u64,
}

impl AppState {
    pub(crate) fn notify(&mut self, message: String) {
        self.next_notification += 1;
        self.notifications.push(Notification {
            id: self.next_notification,
            message,
        });
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let overflow = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..overflow);
        }
    }

    /// 슬라이스 오류 메시지
    pub fn error(&self, slice: SliceName) -> Option<&str> {
        match slice {
            SliceName::Auth => self.auth.error.as_deref(),
            SliceName::Items => self.items.error.as_deref(),
            SliceName::Favorites => self.favorites.error.as_deref(),
            SliceName::Comments => self.comments.error.as_deref(),
            SliceName::Orders => self.orders.error.as_deref(),
        }
    }
}

// endregion: --- State

// region:    --- Store
/// 스토어
///
/// 잠금은 리듀서를 실행하는 동안에만 잡으며 `.await`를 넘겨 유지하지 않는다.
pub struct Store {
    state: RwLock<AppState>,
    revision: watch::Sender<u64>,
    next_request: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(AppState::default()),
            revision,
            next_request: AtomicU64::new(0),
        }
    }

    /// 액션 반영. 상태가 바뀌었으면 true
    pub fn dispatch(&self, action: Action) -> bool {
        debug!("{:<12} --> dispatch: {:?}", "Store", ActionLabel(&action));
        let changed = {
            let mut state = self.state.write();
            reducer::reduce(&mut state, action)
        };

        if changed {
            self.revision.send_modify(|revision| *revision += 1);
        }
        changed
    }

    /// 상태 일부 읽기
    pub fn select<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.read())
    }

    /// 상태 전체 복사본
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// 변경 알림 구독
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// 요청 번호 발급
    pub fn next_request_id(&self) -> RequestId {
        self.next_request.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// 로그에 본문 전체를 찍지 않기 위한 요약
struct ActionLabel<'a>(&'a Action);

impl std::fmt::Debug for ActionLabel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::Pending { key, id } => write!(f, "Pending({:?}#{})", key, id),
            Action::Fulfilled { key, id, .. } => write!(f, "Fulfilled({:?}#{})", key, id),
            Action::Rejected { key, id, message } => {
                write!(f, "Rejected({:?}#{}: {})", key, id, message)
            }
            Action::Aborted { key, id } => write!(f, "Aborted({:?}#{})", key, id),
            other => write!(f, "{:?}", other),
        }
    }
}

// endregion: --- Store
