use market_client::app::{App, AppContext};
use market_client::config::ClientConfig;
use market_client::error::ClientError;
use market_client::items::model::ItemStatus;
use market_client::mock_server::{self, seed::SEED_PASSWORD, MockServer};
use market_client::store::{RequestKey, RequestStatus};
use market_client::views::{Landmark, Route, Viewport};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// 트레이싱 초기화 (여러 테스트에서 호출되어도 한 번만 설정)
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// 임의 포트로 목 서버를 띄우고 클라이언트 앱 생성
async fn setup() -> (MockServer, App) {
    setup_with_latency(None).await
}

async fn setup_with_latency(latency: Option<Duration>) -> (MockServer, App) {
    init_tracing();
    let server = mock_server::start("127.0.0.1:0".parse().unwrap(), latency)
        .await
        .expect("목 서버 시작 실패");
    let ctx = AppContext::from_config(&ClientConfig::new(server.base_url()))
        .expect("클라이언트 생성 실패");
    (server, App::new(ctx))
}

async fn login_as(app: &mut App, username: &str) {
    app.login(username, SEED_PASSWORD)
        .await
        .expect("로그인 실패");
    app.settle().await;
}

/// 주요 화면이 데스크톱/모바일에서 그려지는지 확인
#[tokio::test]
async fn test_pages_render_on_both_viewports() {
    let (server, mut app) = setup().await;

    app.visit("/");
    app.settle().await;

    let desktop = app.render(Viewport::desktop());
    assert!(desktop.has(|l| *l == Landmark::Navigation));
    assert!(desktop.has(|l| *l == Landmark::Banner));
    assert!(desktop.has(|l| matches!(l, Landmark::ItemGrid { columns: 4, items } if *items > 0)));
    assert!(desktop.has(|l| *l == Landmark::Footer));

    let mobile = app.render(Viewport::mobile());
    assert!(mobile.has(|l| *l == Landmark::MenuButton));
    assert!(!mobile.has(|l| *l == Landmark::Banner));
    assert!(mobile.has(|l| matches!(l, Landmark::ItemGrid { columns: 2, .. })));

    app.visit("/items/1");
    app.settle().await;
    for viewport in [Viewport::desktop(), Viewport::mobile()] {
        let screen = app.render(viewport);
        assert!(screen.has(|l| matches!(l, Landmark::ItemDetail { item_id: 1, .. })));
        assert!(screen.has(|l| matches!(l, Landmark::CommentThread { threads: 1, comments: 2 })));
        assert!(screen.has(|l| matches!(l, Landmark::OrderPanel { .. })));
    }

    app.visit("/nowhere");
    assert!(app.render(Viewport::desktop()).has(|l| *l == Landmark::NotFound));

    server.shutdown();
}

/// 검색어로 상품 목록 필터링
#[tokio::test]
async fn test_search_filters_items() {
    let (server, mut app) = setup().await;

    app.search("자전거");
    app.settle().await;

    let names = app
        .context()
        .store
        .select(|s| s.items.list.iter().map(|i| i.name.clone()).collect::<Vec<_>>());
    info!("검색 결과: {:?}", names);
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| n.contains("자전거")));
    assert_eq!(app.route(), &Route::Items);

    server.shutdown();
}

/// 로그인이 필요한 화면은 로그인 후 원래 화면으로 돌아온다
#[tokio::test]
async fn test_login_redirects_back() {
    let (server, mut app) = setup().await;

    app.visit("/favorites");
    assert_eq!(
        app.route(),
        &Route::Login {
            redirect: Some("/favorites".to_string())
        }
    );

    login_as(&mut app, "alice").await;
    assert_eq!(app.route(), &Route::Favorites);
    assert!(!app.route().is_login());
    assert!(app
        .render(Viewport::desktop())
        .has(|l| matches!(l, Landmark::FavoritesList { .. })));

    app.visit("/login");
    login_as(&mut app, "alice").await;
    assert_eq!(app.route(), &Route::Home);

    server.shutdown();
}

/// 잘못된 비밀번호는 로그인 화면에 오류로 표시된다
#[tokio::test]
async fn test_login_failure_shows_error() {
    let (server, mut app) = setup().await;

    app.visit("/login");
    let result = app.login("alice", "wrong-password").await;
    assert!(result.is_err());
    assert!(app.route().is_login());
    assert!(app.login_form().password.is_empty());

    let screen = app.render(Viewport::desktop());
    assert!(screen.has(|l| matches!(l, Landmark::LoginForm { error: Some(_) })));
    assert!(screen.has(|l| matches!(l, Landmark::Notifications { count: 1 })));

    // 알림 닫기
    let notification_id = app
        .context()
        .store
        .select(|s| s.notifications[0].id);
    assert!(app.dismiss_notification(notification_id));
    assert!(!app
        .render(Viewport::desktop())
        .has(|l| matches!(l, Landmark::Notifications { .. })));

    server.shutdown();
}

/// 찜 토글
#[tokio::test]
async fn test_favorite_toggle() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "alice").await;

    app.visit("/items/2");
    app.settle().await;
    let detail = app.item_detail().expect("상세 화면 없음");

    assert!(detail.toggle_favorite().await.unwrap());
    assert_eq!(server.state.db.read().favorite_count(2), 1);
    assert!(app
        .render(Viewport::desktop())
        .has(|l| matches!(l, Landmark::FavoriteButton { favorited: true, busy: false })));

    let detail = app.item_detail().expect("상세 화면 없음");
    assert!(!detail.toggle_favorite().await.unwrap());
    assert_eq!(server.state.db.read().favorite_count(2), 0);

    server.shutdown();
}

/// 연속 클릭해도 찜이 중복 생성되지 않는다
#[tokio::test]
async fn test_rapid_favorite_toggles_do_not_duplicate() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "alice").await;

    app.visit("/items/7");
    app.settle().await;
    let detail = app.item_detail().expect("상세 화면 없음");

    let (a, b, c) = tokio::join!(
        detail.toggle_favorite(),
        detail.toggle_favorite(),
        detail.toggle_favorite()
    );
    let results = [a.unwrap(), b.unwrap(), c.unwrap()];
    info!("토글 결과: {:?}", results);

    assert_eq!(results.iter().filter(|r| **r).count(), 2);
    assert_eq!(server.state.db.read().favorite_count(7), 1);
    assert_eq!(
        app.context().store.select(|s| s.favorites.is_favorited(7)),
        Some(true)
    );

    server.shutdown();
}

/// 댓글과 답글 등록
#[tokio::test]
async fn test_comment_and_reply() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "bob").await;

    app.visit("/items/1");
    app.settle().await;

    let detail = app.item_detail_mut().expect("상세 화면 없음");
    detail.set_draft("아직 판매 중인가요?");
    let comment = detail.submit_comment().await.unwrap();
    assert_eq!(comment.parent_id, None);
    assert!(detail.draft().is_empty());

    let target = app
        .context()
        .store
        .select(|s| s.comments.find(2).cloned())
        .expect("시드 답글 없음");
    let detail = app.item_detail_mut().expect("상세 화면 없음");
    let reply = detail.submit_reply(target, "감사합니다!").await.unwrap();
    assert_eq!(reply.parent_id, Some(1));
    assert!(detail.reply_target().is_none());

    let (count, threads) = app
        .context()
        .store
        .select(|s| (s.comments.list.len(), s.comments.threads()));
    assert_eq!(count, 4);
    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].replies.len(), 2);

    // 빈 댓글은 서버로 보내지 않는다
    let detail = app.item_detail_mut().expect("상세 화면 없음");
    detail.set_draft("   ");
    assert!(matches!(
        detail.submit_comment().await,
        Err(ClientError::Validation(_))
    ));
    assert_eq!(server.state.db.read().comments(1).unwrap().len(), 4);

    server.shutdown();
}

/// 재고가 없거나 판매 중이 아닌 상품은 서버에 주문을 보내지 않는다
#[tokio::test]
async fn test_order_rejected_client_side() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "bob").await;

    for item_id in [5, 3] {
        app.visit(&format!("/items/{}", item_id));
        app.settle().await;

        let screen = app.render(Viewport::desktop());
        assert!(screen.has(|l| matches!(l, Landmark::OrderPanel { enabled: false, reason: Some(_) })));

        let detail = app.item_detail().expect("상세 화면 없음");
        assert!(matches!(
            detail.place_order(1).await,
            Err(ClientError::Validation(_))
        ));
    }
    assert!(server.state.db.read().orders.is_empty());

    server.shutdown();
}

/// 주문 성공 후 상품 상태가 갱신된다
#[tokio::test]
async fn test_order_refreshes_item() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "bob").await;

    app.visit("/items/1");
    app.settle().await;
    let detail = app.item_detail().expect("상세 화면 없음");
    let order = detail.place_order(1).await.unwrap();
    assert_eq!(order.item_id, 1);

    let item = app
        .context()
        .store
        .select(|s| s.items.current_for(1).cloned())
        .unwrap();
    assert_eq!(item.stock, 0);
    assert_eq!(item.status, ItemStatus::Sold);
    assert_eq!(server.state.db.read().orders.len(), 1);

    server.shutdown();
}

/// 화면을 떠나면 이전 화면의 늦은 응답이 반영되지 않는다
#[tokio::test]
async fn test_navigation_drops_late_responses() {
    let (server, mut app) = setup_with_latency(Some(Duration::from_millis(80))).await;

    app.visit("/items/1");
    // 상품 1 요청이 서버에 도착해 응답을 기다리는 중에 이동
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(app
        .context()
        .store
        .select(|s| s.requests.is_loading(RequestKey::ItemDetail(1))));

    app.visit("/items/2");
    app.settle().await;
    // 상품 1의 서버 응답 시점이 지나도록 대기
    tokio::time::sleep(Duration::from_millis(120)).await;

    let (current, comments_for, comments, stale_status) = app.context().store.select(|s| {
        (
            s.items.current.as_ref().map(|i| i.id),
            s.comments.item_id,
            s.comments.list.len(),
            s.requests.status(RequestKey::ItemDetail(1)),
        )
    });
    assert_eq!(current, Some(2));
    assert_eq!(comments_for, Some(2));
    assert_eq!(comments, 0);
    assert_eq!(stale_status, RequestStatus::Idle);

    server.shutdown();
}

/// 로그아웃하면 서버 세션도 사라진다
#[tokio::test]
async fn test_logout_revokes_server_session() {
    let (server, mut app) = setup().await;
    login_as(&mut app, "alice").await;
    assert_eq!(server.state.db.read().tokens.len(), 1);

    app.logout().await;

    assert!(server.state.db.read().tokens.is_empty());
    assert!(app.context().api.token().is_none());
    assert_eq!(app.route(), &Route::Home);

    server.shutdown();
}

/// 응답 봉투 형식 확인
#[tokio::test]
async fn test_response_envelope() {
    let (server, _app) = setup().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/items", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 200);
    assert!(body["data"]["list"].is_array());

    let response = client
        .get(format!("{}/items/999", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 404);
    assert!(body["message"].is_string());

    let response = client
        .get(format!("{}/auth/me", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    server.shutdown();
}
