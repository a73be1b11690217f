// region:    --- Imports
use super::state::{MockError, MockState};
use crate::api::envelope::ApiResponse;
use crate::auth::model::{LoginRequest, RegisterRequest, Session, User};
use crate::comments::model::{Comment, NewComment};
use crate::favorites::model::{Favorite, FavoriteCheck, NewFavorite};
use crate::items::model::{Item, ItemQuery, ItemStatus, Page};
use crate::orders::model::{NewOrder, Order};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

pub type SharedState = Arc<MockState>;

type ApiResult<T> = Result<Json<ApiResponse<T>>, MockError>;

// region:    --- Error Response
impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!("{:<12} --> 오류 응답 {}: {}", "MockApi", status, self);
        let body = ApiResponse::<()>::error(self.code() as i64, self.to_string());
        (status, Json(body)).into_response()
    }
}

// endregion: --- Error Response

/// Authorization 헤더의 Bearer 토큰
fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

fn current_user(state: &MockState, headers: &HeaderMap) -> Result<User, MockError> {
    state.db.read().authenticate(bearer(headers))
}

// region:    --- Auth Handlers

/// 로그인
pub async fn handle_login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Session> {
    info!("{:<12} --> 로그인 요청: {}", "MockApi", req.username);
    state.delay().await;
    let session = state.db.write().login(&req)?;
    Ok(Json(ApiResponse::ok(session)))
}

/// 로그아웃
pub async fn handle_logout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<()> {
    state.delay().await;
    if let Some(token) = bearer(&headers) {
        let removed = state.db.write().logout(token);
        info!("{:<12} --> 로그아웃 요청 (토큰 폐기: {})", "MockApi", removed);
    }
    Ok(Json(ApiResponse::ok(())))
}

/// 회원가입
pub async fn handle_register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<User> {
    info!("{:<12} --> 회원가입 요청: {}", "MockApi", req.username);
    state.delay().await;
    let user = state.db.write().register(&req)?;
    Ok(Json(ApiResponse::ok(user)))
}

/// 현재 사용자 조회
pub async fn handle_current_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<User> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    Ok(Json(ApiResponse::ok(user)))
}

// endregion: --- Auth Handlers

// region:    --- Item Handlers

/// 상품 목록 조회 파라미터
#[derive(Debug, Deserialize)]
pub struct ItemsParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub keyword: Option<String>,
    pub status: Option<String>,
}

/// 상품 목록 조회
pub async fn handle_get_items(
    State(state): State<SharedState>,
    Query(params): Query<ItemsParams>,
) -> ApiResult<Page<Item>> {
    info!("{:<12} --> 상품 목록 조회: {:?}", "MockApi", params);
    state.delay().await;

    let status = match params.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<ItemStatus>().map_err(MockError::BadRequest)?),
        None => None,
    };
    let defaults = ItemQuery::default();
    let query = ItemQuery {
        page: params.page.unwrap_or(defaults.page),
        size: params.size.unwrap_or(defaults.size),
        keyword: params.keyword.filter(|k| !k.trim().is_empty()),
        status,
    };

    let page = state.db.read().list_items(&query);
    Ok(Json(ApiResponse::ok(page)))
}

/// 상품 상세 조회
pub async fn handle_get_item(
    State(state): State<SharedState>,
    Path(item_id): Path<i64>,
) -> ApiResult<Item> {
    info!("{:<12} --> 상품 조회 id: {}", "MockApi", item_id);
    state.delay().await;
    let item = state.db.read().item(item_id)?;
    Ok(Json(ApiResponse::ok(item)))
}

/// 상품 댓글 조회
pub async fn handle_get_item_comments(
    State(state): State<SharedState>,
    Path(item_id): Path<i64>,
) -> ApiResult<Vec<Comment>> {
    info!("{:<12} --> 댓글 조회 item: {}", "MockApi", item_id);
    state.delay().await;
    let comments = state.db.read().comments(item_id)?;
    Ok(Json(ApiResponse::ok(comments)))
}

/// 찜 여부 조회
pub async fn handle_check_favorite(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
) -> ApiResult<FavoriteCheck> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    let check = state.db.read().check_favorite(user.id, item_id);
    Ok(Json(ApiResponse::ok(check)))
}

// endregion: --- Item Handlers

// region:    --- Favorite Handlers

/// 찜 목록 조회
pub async fn handle_get_favorites(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Favorite>> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    info!("{:<12} --> 찜 목록 조회 user: {}", "MockApi", user.id);
    let favorites = state.db.read().favorites(user.id);
    Ok(Json(ApiResponse::ok(favorites)))
}

/// 찜 추가
pub async fn handle_add_favorite(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<NewFavorite>,
) -> ApiResult<Favorite> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    info!(
        "{:<12} --> 찜 추가 user: {}, item: {}",
        "MockApi", user.id, req.item_id
    );
    let favorite = state.db.write().add_favorite(user.id, req.item_id)?;
    Ok(Json(ApiResponse::ok(favorite)))
}

/// 찜 삭제
pub async fn handle_remove_favorite(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(favorite_id): Path<i64>,
) -> ApiResult<()> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    info!(
        "{:<12} --> 찜 삭제 user: {}, favorite: {}",
        "MockApi", user.id, favorite_id
    );
    state.db.write().remove_favorite(user.id, favorite_id)?;
    Ok(Json(ApiResponse::ok(())))
}

// endregion: --- Favorite Handlers

// region:    --- Comment / Order Handlers

/// 댓글 작성
pub async fn handle_create_comment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<NewComment>,
) -> ApiResult<Comment> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    info!(
        "{:<12} --> 댓글 작성 user: {}, item: {}",
        "MockApi", user.id, req.item_id
    );
    let comment = state.db.write().create_comment(&user, &req)?;
    Ok(Json(ApiResponse::ok(comment)))
}

/// 주문 생성
pub async fn handle_create_order(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<NewOrder>,
) -> ApiResult<Order> {
    state.delay().await;
    let user = current_user(&state, &headers)?;
    info!(
        "{:<12} --> 주문 생성 user: {}, item: {}, quantity: {}",
        "MockApi", user.id, req.item_id, req.quantity
    );
    let order = state.db.write().create_order(&user, &req)?;
    Ok(Json(ApiResponse::ok(order)))
}

// endregion: --- Comment / Order Handlers
