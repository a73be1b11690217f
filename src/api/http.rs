// region:    --- Imports
use super::envelope::decode_body;
use super::{endpoints, MarketApi};
use crate::auth::model::{LoginRequest, RegisterRequest, Session, User};
use crate::comments::model::{Comment, NewComment};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::favorites::model::{Favorite, FavoriteCheck, FavoriteId, NewFavorite};
use crate::items::model::{Item, ItemId, ItemQuery, Page};
use crate::orders::model::{NewOrder, Order};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Http Api
/// reqwest 기반 API 클라이언트
/// 기본 URL과 인증 헤더를 모든 요청에 붙인다.
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// API 클라이언트 생성
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.token.read().as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 요청 전송 및 응답 봉투 해석
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        debug!("{:<12} --> {} {}", "Http", method, path);
        let response = builder.send().await.map_err(|e| {
            warn!("{:<12} --> 요청 전송 실패 {} {}: {}", "Http", method, path, e);
            ClientError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{:<12} --> {} {} 응답 상태: {}", "Http", method, path, status);

        decode_body(status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let builder = self.request(Method::GET, path);
        self.send(Method::GET, path, builder).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let builder = self.request(Method::DELETE, path);
        self.send(Method::DELETE, path, builder).await
    }
}

// endregion: --- Http Api

// region:    --- Market Api Impl
#[async_trait]
impl MarketApi for HttpApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError> {
        self.post(endpoints::LOGIN, req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<User, ClientError> {
        self.post(endpoints::REGISTER, req).await
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.post(endpoints::LOGOUT, &serde_json::json!({})).await
    }

    async fn current_user(&self) -> Result<User, ClientError> {
        self.get(endpoints::CURRENT_USER).await
    }

    async fn list_items(&self, query: &ItemQuery) -> Result<Page<Item>, ClientError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
        ];
        if let Some(keyword) = query.keyword.as_ref().filter(|k| !k.trim().is_empty()) {
            params.push(("keyword", keyword.trim().to_string()));
        }
        if let Some(status) = query.status {
            params.push(("status", status.to_string()));
        }

        let builder = self.request(Method::GET, endpoints::ITEMS).query(&params);
        self.send(Method::GET, endpoints::ITEMS, builder).await
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Item, ClientError> {
        self.get(&endpoints::item(item_id)).await
    }

    async fn list_favorites(&self) -> Result<Vec<Favorite>, ClientError> {
        self.get(endpoints::FAVORITES).await
    }

    async fn add_favorite(&self, item_id: ItemId) -> Result<Favorite, ClientError> {
        self.post(endpoints::FAVORITES, &NewFavorite { item_id }).await
    }

    async fn remove_favorite(&self, favorite_id: FavoriteId) -> Result<(), ClientError> {
        self.delete(&endpoints::favorite(favorite_id)).await
    }

    async fn check_favorite(&self, item_id: ItemId) -> Result<FavoriteCheck, ClientError> {
        self.get(&endpoints::favorite_check(item_id)).await
    }

    async fn list_comments(&self, item_id: ItemId) -> Result<Vec<Comment>, ClientError> {
        self.get(&endpoints::item_comments(item_id)).await
    }

    async fn create_comment(&self, req: &NewComment) -> Result<Comment, ClientError> {
        self.post(endpoints::COMMENTS, req).await
    }

    async fn create_order(&self, req: &NewOrder) -> Result<Order, ClientError> {
        self.post(endpoints::ORDERS, req).await
    }
}

// endregion: --- Market Api Impl
