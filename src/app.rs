/// 애플리케이션
/// 전역 상태 대신 AppContext를 화면에 명시적으로 넘긴다.
// region:    --- Imports
use crate::api::{HttpApi, MarketApi};
use crate::auth::actions as auth_actions;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::favorites::actions as favorite_actions;
use crate::items::actions as item_actions;
use crate::items::model::ItemQuery;
use crate::store::{Action, Store};
use crate::tasks::{KeyedLocks, ViewScope};
use crate::views::item_detail::ItemDetailView;
use crate::views::login::LoginView;
use crate::views::pages::{self, Screen};
use crate::views::router::{Route, Viewport};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- App Context
/// 화면들이 공유하는 실행 문맥
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn MarketApi>,
    pub store: Arc<Store>,
    pub locks: Arc<KeyedLocks>,
}

impl AppContext {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        Self {
            api,
            store: Arc::new(Store::new()),
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// 설정으로 HTTP 클라이언트를 만들어 문맥 생성
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let api = HttpApi::new(config)?;
        Ok(Self::new(Arc::new(api)))
    }
}

// endregion: --- App Context

// region:    --- App
/// 현재 화면과 화면 범위를 관리한다.
pub struct App {
    ctx: AppContext,
    route: Route,
    scope: ViewScope,
    query: ItemQuery,
    detail: Option<ItemDetailView>,
    login: LoginView,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            route: Route::Home,
            scope: ViewScope::new(),
            query: ItemQuery::default(),
            detail: None,
            login: LoginView::default(),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// 경로 문자열로 이동
    pub fn visit(&mut self, path: &str) {
        self.navigate(Route::parse(path));
    }

    /// 화면 이동
    ///
    /// 이전 화면이 시작한 요청은 모두 취소되어 늦은 응답이 새 화면에 반영되지 않는다.
    pub fn navigate(&mut self, route: Route) {
        let route = self.guard(route);
        info!("{:<12} --> 화면 이동: {} -> {}", "Router", self.route, route);

        if let Some(detail) = self.detail.take() {
            let item_id = detail.item_id();
            drop(detail);
            self.ctx.store.dispatch(Action::ClearItemView(item_id));
        }
        self.scope.cancel();
        self.scope = ViewScope::new();

        if let Route::Login { redirect } = &route {
            self.login = LoginView::new(redirect.as_deref().map(Route::parse));
        }
        self.route = route;
        self.mount();
    }

    /// 로그인이 필요한 화면은 로그인 화면으로 보낸다.
    fn guard(&self, route: Route) -> Route {
        let logged_in = self.ctx.store.select(|s| s.auth.is_logged_in());
        if route.requires_login() && !logged_in {
            Route::Login {
                redirect: Some(route.path()),
            }
        } else {
            route
        }
    }

    /// 화면에 필요한 데이터 요청 시작
    fn mount(&mut self) {
        let ctx = self.ctx.clone();
        let token = self.scope.token().clone();

        match &self.route {
            Route::Home => {
                let query = ItemQuery::default();
                self.scope.spawn(async move {
                    let _ = item_actions::fetch_items(&ctx, &token, query).await;
                });
            }
            Route::Items => {
                let query = self.query.clone();
                self.scope.spawn(async move {
                    let _ = item_actions::fetch_items(&ctx, &token, query).await;
                });
            }
            Route::ItemDetail(item_id) => {
                self.detail = Some(ItemDetailView::mount(ctx, &self.scope, *item_id));
            }
            Route::Profile => {
                self.scope.spawn(async move {
                    if auth_actions::fetch_current_user(&ctx, &token).await.is_ok() {
                        let _ = favorite_actions::fetch_favorites(&ctx, &token).await;
                    }
                });
            }
            Route::Favorites => {
                self.scope.spawn(async move {
                    let _ = favorite_actions::fetch_favorites(&ctx, &token).await;
                });
            }
            Route::Login { .. } | Route::NotFound(_) => {}
        }
    }

    /// 현재 화면이 시작한 요청이 모두 끝날 때까지 대기
    pub async fn settle(&self) {
        self.scope.idle().await;
        if let Some(detail) = &self.detail {
            detail.idle().await;
        }
    }

    /// 현재 화면 그리기
    pub fn render(&self, viewport: Viewport) -> Screen {
        let state = self.ctx.store.snapshot();
        pages::render(&self.route, viewport, &state, self.detail.as_ref())
    }

    /// 검색어로 상품 목록 이동
    pub fn search(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        self.query = ItemQuery {
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
            ..ItemQuery::default()
        };
        self.navigate(Route::Items);
    }

    pub fn login_form(&mut self) -> &mut LoginView {
        &mut self.login
    }

    /// 로그인 후 원래 가려던 화면으로 이동
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        self.login.username = username.to_string();
        self.login.password = password.to_string();
        let destination = self.login.submit(&self.ctx, self.scope.token()).await?;
        self.navigate(destination);
        Ok(())
    }

    pub async fn logout(&mut self) {
        auth_actions::logout(&self.ctx).await;
        self.navigate(Route::Home);
    }

    /// 알림 닫기
    pub fn dismiss_notification(&self, notification_id: u64) -> bool {
        self.ctx
            .store
            .dispatch(Action::DismissNotification(notification_id))
    }

    pub fn item_detail(&self) -> Option<&ItemDetailView> {
        self.detail.as_ref()
    }

    pub fn item_detail_mut(&mut self) -> Option<&mut ItemDetailView> {
        self.detail.as_mut()
    }
}

// endregion: --- App
