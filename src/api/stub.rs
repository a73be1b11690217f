//! 테스트용 인메모리 API. 목 서버와 같은 저장소를 HTTP 없이 사용한다.

use super::MarketApi;
use crate::auth::model::{LoginRequest, RegisterRequest, Session, User};
use crate::comments::model::{Comment, NewComment};
use crate::error::ClientError;
use crate::favorites::model::{Favorite, FavoriteCheck, FavoriteId};
use crate::items::model::{Item, ItemId, ItemQuery, Page};
use crate::mock_server::seed::seed;
use crate::mock_server::{MockDb, MockError};
use crate::orders::model::{NewOrder, Order};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct StubApi {
    db: Mutex<MockDb>,
    token: RwLock<Option<String>>,
    calls: AtomicUsize,
    latency: Option<Duration>,
    check_delay: Option<Duration>,
}

impl StubApi {
    pub fn seeded() -> Self {
        Self {
            db: Mutex::new(seed()),
            ..Self::default()
        }
    }

    /// 모든 호출 앞에 넣는 지연
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 찜 여부를 읽은 뒤 응답을 늦춘다
    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.check_delay = Some(delay);
        self
    }

    /// 지금까지 호출된 API 수
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 서버에 살아 있는 세션 수
    pub fn sessions(&self) -> usize {
        self.db.lock().tokens.len()
    }

    pub fn favorite_count(&self, item_id: ItemId) -> usize {
        self.db.lock().favorite_count(item_id)
    }

    /// 호출 기록 후 다른 작업에 양보해 실제 네트워크처럼 끼어들 틈을 만든다.
    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
    }

    fn user(&self) -> Result<User, ClientError> {
        let token = self.token.read().clone();
        self.db.lock().authenticate(token.as_deref()).map_err(to_client)
    }
}

fn to_client(e: MockError) -> ClientError {
    ClientError::Api {
        code: e.code() as i64,
        message: e.to_string(),
    }
}

#[async_trait]
impl MarketApi for StubApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError> {
        self.enter().await;
        self.db.lock().login(req).map_err(to_client)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.enter().await;
        if let Some(token) = self.token.read().clone() {
            self.db.lock().logout(&token);
        }
        Ok(())
    }

    async fn register(&self, req: &RegisterRequest) -> Result<User, ClientError> {
        self.enter().await;
        self.db.lock().register(req).map_err(to_client)
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.enter().await;
        self.user()
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Page<Item>, ClientError> {
        self.enter().await;
        Ok(self.db.lock().list_items(query))
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Item, ClientError> {
        self.enter().await;
        self.db.lock().item(item_id).map_err(to_client)
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>, ClientError> {
        self.enter().await;
        let user = self.user()?;
        Ok(self.db.lock().favorites(user.id))
    }

    async fn add_favorite(&self, item_id: ItemId) -> Result<Favorite, ClientError> {
        self.enter().await;
        let user = self.user()?;
        self.db.lock().add_favorite(user.id, item_id).map_err(to_client)
    }

    async fn remove_favorite(&self, favorite_id: FavoriteId) -> Result<(), ClientError> {
        self.enter().await;
        let user = self.user()?;
        self.db
            .lock()
            .remove_favorite(user.id, favorite_id)
            .map_err(to_client)
    }

    async fn check_favorite(&self, item_id: ItemId) -> Result<FavoriteCheck, ClientError> {
        self.enter().await;
        let user = self.user()?;
        let check = self.db.lock().check_favorite(user.id, item_id);
        if let Some(delay) = self.check_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(check)
    }

    async fn list_comments(&self, item_id: ItemId) -> Result<Vec<Comment>, ClientError> {
        self.enter().await;
        self.db.lock().comments(item_id).map_err(to_client)
    }

    async fn create_comment(&self, req: &NewComment) -> Result<Comment, ClientError> {
        self.enter().await;
        let user = self.user()?;
        self.db.lock().create_comment(&user, req).map_err(to_client)
    }

    async fn create_order(&self, req: &NewOrder) -> Result<Order, ClientError> {
        self.enter().await;
        let user = self.user()?;
        self.db.lock().create_order(&user, req).map_err(to_client)
    }
}
