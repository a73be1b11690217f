/// 화면 그리기
/// 스토어 상태와 경로, 화면 크기로 화면 구성 요소(landmark) 목록을 만든다.
// region:    --- Imports
use super::item_detail::ItemDetailView;
use super::router::{Route, Viewport};
use crate::items::model::ItemId;
use crate::orders::actions::validate_order;
use crate::store::{AppState, RequestKey, SliceName};

// endregion: --- Imports

// region:    --- Landmark
/// 화면 구성 요소
#[derive(Debug, Clone, PartialEq)]
pub enum Landmark {
    Header,
    /// 데스크톱 상단 메뉴
    Navigation,
    /// 모바일 햄버거 메뉴
    MenuButton,
    SearchBar,
    Banner,
    ItemGrid {
        columns: u8,
        items: usize,
    },
    LoginForm {
        error: Option<String>,
    },
    ProfileCard {
        username: String,
    },
    FavoritesList {
        count: usize,
    },
    ItemDetail {
        item_id: ItemId,
        name: String,
    },
    FavoriteButton {
        favorited: bool,
        busy: bool,
    },
    OrderPanel {
        enabled: bool,
        reason: Option<String>,
    },
    CommentThread {
        threads: usize,
        comments: usize,
    },
    CommentInput {
        draft: String,
        replying_to: Option<String>,
    },
    Loading,
    ErrorMessage(String),
    Notifications {
        count: usize,
    },
    NotFound,
    Footer,
}

/// 그려진 화면
#[derive(Debug, Clone)]
pub struct Screen {
    pub route: Route,
    pub landmarks: Vec<Landmark>,
}

impl Screen {
    pub fn find(&self, predicate: impl Fn(&Landmark) -> bool) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| predicate(l))
    }

    pub fn has(&self, predicate: impl Fn(&Landmark) -> bool) -> bool {
        self.find(predicate).is_some()
    }
}

// endregion: --- Landmark

// region:    --- Render
/// 화면 그리기
pub fn render(
    route: &Route,
    viewport: Viewport,
    state: &AppState,
    detail: Option<&ItemDetailView>,
) -> Screen {
    let mut landmarks = vec![Landmark::Header];
    landmarks.push(if viewport.is_mobile() {
        Landmark::MenuButton
    } else {
        Landmark::Navigation
    });
    if !state.notifications.is_empty() {
        landmarks.push(Landmark::Notifications {
            count: state.notifications.len(),
        });
    }

    match route {
        Route::Home => {
            landmarks.push(Landmark::SearchBar);
            // 모바일에서는 배너를 숨긴다
            if !viewport.is_mobile() {
                landmarks.push(Landmark::Banner);
            }
            item_grid(&mut landmarks, viewport, state);
        }
        Route::Items => {
            landmarks.push(Landmark::SearchBar);
            item_grid(&mut landmarks, viewport, state);
        }
        Route::Login { .. } => landmarks.push(Landmark::LoginForm {
            error: state.auth.error.clone(),
        }),
        Route::Profile => match &state.auth.user {
            Some(user) => {
                if state.requests.any_loading(SliceName::Auth)
                    || state.requests.any_loading(SliceName::Favorites)
                {
                    landmarks.push(Landmark::Loading);
                }
                landmarks.push(Landmark::ProfileCard {
                    username: user.display_name().to_string(),
                });
                landmarks.push(Landmark::FavoritesList {
                    count: state.favorites.list.len(),
                });
            }
            None => landmarks.push(Landmark::LoginForm { error: None }),
        },
        Route::Favorites => {
            if state.requests.any_loading(SliceName::Favorites) {
                landmarks.push(Landmark::Loading);
            }
            landmarks.push(Landmark::FavoritesList {
                count: state.favorites.list.len(),
            });
        }
        Route::ItemDetail(item_id) => item_detail(&mut landmarks, *item_id, state, detail),
        Route::NotFound(_) => landmarks.push(Landmark::NotFound),
    }

    landmarks.push(Landmark::Footer);
    Screen {
        route: route.clone(),
        landmarks,
    }
}

fn item_grid(landmarks: &mut Vec<Landmark>, viewport: Viewport, state: &AppState) {
    if state.requests.is_loading(RequestKey::ItemList) {
        landmarks.push(Landmark::Loading);
    }
    if let Some(error) = state.error(SliceName::Items) {
        landmarks.push(Landmark::ErrorMessage(error.to_string()));
    }
    landmarks.push(Landmark::ItemGrid {
        columns: viewport.grid_columns(),
        items: state.items.list.len(),
    });
}

fn item_detail(
    landmarks: &mut Vec<Landmark>,
    item_id: ItemId,
    state: &AppState,
    detail: Option<&ItemDetailView>,
) {
    let Some(item) = state.items.current_for(item_id) else {
        match state.error(SliceName::Items) {
            Some(error) if !state.requests.is_loading(RequestKey::ItemDetail(item_id)) => {
                landmarks.push(Landmark::ErrorMessage(error.to_string()))
            }
            _ => landmarks.push(Landmark::Loading),
        }
        return;
    };

    landmarks.push(Landmark::ItemDetail {
        item_id,
        name: item.name.clone(),
    });
    landmarks.push(Landmark::FavoriteButton {
        favorited: state.favorites.is_favorited(item_id).unwrap_or(false),
        busy: state.requests.is_loading(RequestKey::FavoriteToggle(item_id)),
    });

    let reason = validate_order(item, 1, state.auth.user_id())
        .err()
        .map(|e| e.user_message());
    landmarks.push(Landmark::OrderPanel {
        enabled: reason.is_none() && !state.requests.is_loading(RequestKey::PlaceOrder(item_id)),
        reason,
    });

    let comments = if state.comments.item_id == Some(item_id) {
        state.comments.list.len()
    } else {
        0
    };
    landmarks.push(Landmark::CommentThread {
        threads: state.comments.threads().len(),
        comments,
    });
    if let Some(detail) = detail {
        landmarks.push(Landmark::CommentInput {
            draft: detail.draft().to_string(),
            replying_to: detail.reply_target().map(|c| c.username.clone()),
        });
    }
}

// endregion: --- Render
