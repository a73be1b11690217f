// region:    --- Imports
use crate::auth::model::{LoginRequest, RegisterRequest, Session, User};
use crate::comments::model::{Comment, NewComment};
use crate::error::ClientError;
use crate::favorites::model::{Favorite, FavoriteCheck, FavoriteId};
use crate::items::model::{Item, ItemId, ItemQuery, Page};
use crate::orders::model::{NewOrder, Order};
use async_trait::async_trait;

// endregion: --- Imports

// region:    --- Modules
pub mod endpoints;
pub mod envelope;
pub mod http;

#[cfg(test)]
pub mod stub;

pub use http::HttpApi;

// endregion: --- Modules

// region:    --- Market Api Trait
/// 원격 마켓 API
///
/// 비즈니스 규칙과 저장은 모두 서버가 담당한다. 액션 계층은 이 트레이트만 사용한다.
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// 이후 요청에 붙일 인증 토큰 설정
    fn set_token(&self, token: Option<String>);

    fn token(&self) -> Option<String>;

    async fn login(&self, req: &LoginRequest) -> Result<Session, ClientError>;

    async fn register(&self, req: &RegisterRequest) -> Result<User, ClientError>;

    /// 서버 세션 폐기
    async fn logout(&self) -> Result<(), ClientError>;

    async fn current_user(&self) -> Result<User, ClientError>;

    async fn list_items(&self, query: &ItemQuery) -> Result<Page<Item>, ClientError>;

    async fn get_item(&self, item_id: ItemId) -> Result<Item, ClientError>;

    async fn list_favorites(&self) -> Result<Vec<Favorite>, ClientError>;

    async fn add_favorite(&self, item_id: ItemId) -> Result<Favorite, ClientError>;

    async fn remove_favorite(&self, favorite_id: FavoriteId) -> Result<(), ClientError>;

    async fn check_favorite(&self, item_id: ItemId) -> Result<FavoriteCheck, ClientError>;

    async fn list_comments(&self, item_id: ItemId) -> Result<Vec<Comment>, ClientError>;

    async fn create_comment(&self, req: &NewComment) -> Result<Comment, ClientError>;

    async fn create_order(&self, req: &NewOrder) -> Result<Order, ClientError>;
}

// endregion: --- Market Api Trait
