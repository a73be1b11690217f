/// 목 API 서버
/// 클라이언트 개발과 종단 테스트를 위한 임시 서버. 모든 데이터는 메모리에만 있다.
// region:    --- Imports
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Modules
pub mod handlers;
pub mod seed;
pub mod state;

pub use state::{MockDb, MockError, MockState};

// endregion: --- Modules

// region:    --- Router
/// `/api` 아래 라우터 구성
pub fn router(state: Arc<MockState>) -> Router {
    // 브라우저 클라이언트를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/auth/login", post(handlers::handle_login))
        .route("/auth/logout", post(handlers::handle_logout))
        .route("/auth/register", post(handlers::handle_register))
        .route("/auth/me", get(handlers::handle_current_user))
        .route("/items", get(handlers::handle_get_items))
        .route("/items/:id", get(handlers::handle_get_item))
        .route("/items/:id/comments", get(handlers::handle_get_item_comments))
        .route("/items/:id/favorite", get(handlers::handle_check_favorite))
        .route(
            "/favorites",
            get(handlers::handle_get_favorites).post(handlers::handle_add_favorite),
        )
        .route("/favorites/:id", delete(handlers::handle_remove_favorite))
        .route("/comments", post(handlers::handle_create_comment))
        .route("/orders", post(handlers::handle_create_order));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}

// endregion: --- Router

// region:    --- Server
/// 실행 중인 목 서버
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// 클라이언트가 사용할 API 기본 주소
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }

    /// 서버가 끝날 때까지 대기
    pub async fn wait(self) {
        if let Err(err) = self.handle.await {
            error!("{:<12} --> Server task failed: {}", "MockServer", err);
        }
    }
}

/// 시드 데이터로 목 서버 시작
pub async fn start(addr: SocketAddr, latency: Option<Duration>) -> std::io::Result<MockServer> {
    start_with(addr, seed::seed(), latency).await
}

/// 주어진 데이터로 목 서버 시작
pub async fn start_with(
    addr: SocketAddr,
    db: MockDb,
    latency: Option<Duration>,
) -> std::io::Result<MockServer> {
    let state = Arc::new(MockState::new(db, latency));
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    info!("{:<12} --> Mock API: Listening on {}", "MockServer", addr);

    let app = router(Arc::clone(&state));
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app.into_make_service()).await {
            error!("{:<12} --> Server error: {}", "MockServer", err);
        }
    });

    Ok(MockServer {
        addr,
        state,
        handle,
    })
}

// endregion: --- Server
