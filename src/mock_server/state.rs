/// 목 서버 인메모리 저장소
/// 클라이언트를 시험하기 위한 최소한의 규칙만 가진다. 실제 백엔드가 아니다.
// region:    --- Imports
use crate::auth::model::{LoginRequest, RegisterRequest, Role, Session, User, UserId};
use crate::comments::model::{Comment, NewComment};
use crate::favorites::model::{Favorite, FavoriteCheck, FavoriteId};
use crate::items::model::{Item, ItemId, ItemQuery, ItemStatus, Page};
use crate::orders::model::{NewOrder, Order, OrderStatus};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Mock Error
/// 목 서버 오류
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MockError {
    #[error("{0}")]
    BadRequest(String),

    #[error("로그인이 필요합니다.")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),
}

impl MockError {
    /// 응답 봉투의 code 값 (HTTP 상태와 같다)
    pub fn code(&self) -> u16 {
        match self {
            MockError::BadRequest(_) => 400,
            MockError::Unauthorized => 401,
            MockError::Forbidden(_) => 403,
            MockError::NotFound(_) => 404,
        }
    }
}

// endregion: --- Mock Error

// region:    --- Mock Db
/// 비밀번호를 포함한 계정
#[derive(Debug, Clone)]
pub struct Account {
    pub user: User,
    pub password: String,
}

/// 인메모리 데이터
#[derive(Debug, Default)]
pub struct MockDb {
    pub accounts: Vec<Account>,
    pub tokens: HashMap<String, UserId>,
    pub items: Vec<Item>,
    pub favorites: Vec<Favorite>,
    pub comments: Vec<Comment>,
    pub orders: Vec<Order>,
    pub(super) next_id: i64,
}

impl MockDb {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// 로그인
    pub fn login(&mut self, req: &LoginRequest) -> Result<Session, MockError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.user.username == req.username && a.password == req.password)
            .ok_or_else(|| MockError::BadRequest("아이디 또는 비밀번호가 올바르지 않습니다.".into()))?;
        let user = account.user.clone();

        let token = format!("mock-{}", uuid::Uuid::new_v4());
        self.tokens.insert(token.clone(), user.id);
        Ok(Session { token, user })
    }

    /// 로그아웃 (토큰 폐기). 없는 토큰이면 false.
    pub fn logout(&mut self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }

    /// 회원가입
    pub fn register(&mut self, req: &RegisterRequest) -> Result<User, MockError> {
        let username = req.username.trim();
        if username.is_empty() || req.password.is_empty() {
            return Err(MockError::BadRequest("아이디와 비밀번호는 필수입니다.".into()));
        }
        if self.accounts.iter().any(|a| a.user.username == username) {
            return Err(MockError::BadRequest("이미 사용 중인 아이디입니다.".into()));
        }

        let user = User {
            id: self.next_id(),
            username: username.to_string(),
            nickname: req.nickname.clone(),
            avatar: None,
            role: Role::User,
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: req.password.clone(),
        });
        Ok(user)
    }

    /// 토큰으로 사용자 확인
    pub fn authenticate(&self, token: Option<&str>) -> Result<User, MockError> {
        let user_id = token
            .and_then(|t| self.tokens.get(t))
            .ok_or(MockError::Unauthorized)?;
        self.accounts
            .iter()
            .find(|a| a.user.id == *user_id)
            .map(|a| a.user.clone())
            .ok_or(MockError::Unauthorized)
    }

    /// 상품 목록 (상태 조건이 없으면 미등록 상품은 숨긴다)
    pub fn list_items(&self, query: &ItemQuery) -> Page<Item> {
        let keyword = query.keyword.as_deref().map(str::to_lowercase);
        let matched: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| match query.status {
                Some(status) => item.status == status,
                None => item.status != ItemStatus::Unlisted,
            })
            .filter(|item| match &keyword {
                Some(k) => {
                    item.name.to_lowercase().contains(k)
                        || item.description.to_lowercase().contains(k)
                }
                None => true,
            })
            .collect();

        let page = query.page.max(1);
        let size = query.size.max(1);
        let offset = (page as usize - 1).saturating_mul(size as usize);
        let list = matched
            .iter()
            .skip(offset)
            .take(size as usize)
            .map(|item| (*item).clone())
            .collect();

        Page {
            list,
            total: matched.len() as u64,
            page,
            size,
        }
    }

    pub fn item(&self, item_id: ItemId) -> Result<Item, MockError> {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| MockError::NotFound("상품을 찾을 수 없습니다.".into()))
    }

    pub fn comments(&self, item_id: ItemId) -> Result<Vec<Comment>, MockError> {
        self.item(item_id)?;
        Ok(self
            .comments
            .iter()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect())
    }

    /// 찜 목록 (상품 정보 포함)
    pub fn favorites(&self, user_id: UserId) -> Vec<Favorite> {
        self.favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .map(|f| Favorite {
                item: self.items.iter().find(|i| i.id == f.item_id).cloned(),
                ..f.clone()
            })
            .collect()
    }

    pub fn add_favorite(&mut self, user_id: UserId, item_id: ItemId) -> Result<Favorite, MockError> {
        let item = self.item(item_id)?;
        if self
            .favorites
            .iter()
            .any(|f| f.user_id == user_id && f.item_id == item_id)
        {
            return Err(MockError::BadRequest("이미 찜한 상품입니다.".into()));
        }

        let favorite = Favorite {
            id: self.next_id(),
            user_id,
            item_id,
            item: None,
            created_at: Some(Utc::now()),
        };
        self.favorites.push(favorite.clone());
        Ok(Favorite {
            item: Some(item),
            ..favorite
        })
    }

    pub fn remove_favorite(&mut self, user_id: UserId, favorite_id: FavoriteId) -> Result<(), MockError> {
        let before = self.favorites.len();
        self.favorites
            .retain(|f| !(f.id == favorite_id && f.user_id == user_id));
        if before == self.favorites.len() {
            return Err(MockError::NotFound("찜 정보를 찾을 수 없습니다.".into()));
        }
        Ok(())
    }

    pub fn check_favorite(&self, user_id: UserId, item_id: ItemId) -> FavoriteCheck {
        let favorite_id = self
            .favorites
            .iter()
            .find(|f| f.user_id == user_id && f.item_id == item_id)
            .map(|f| f.id);
        FavoriteCheck {
            favorited: favorite_id.is_some(),
            favorite_id,
        }
    }

    /// 같은 상품의 찜 기록 수
    pub fn favorite_count(&self, item_id: ItemId) -> usize {
        self.favorites.iter().filter(|f| f.item_id == item_id).count()
    }

    /// 댓글 작성. 답글이면 답한 사용자 이름을 채운다.
    pub fn create_comment(&mut self, author: &User, req: &NewComment) -> Result<Comment, MockError> {
        self.item(req.item_id)?;
        let content = req.content.trim();
        if content.is_empty() {
            return Err(MockError::BadRequest("내용을 입력해 주세요.".into()));
        }

        if let Some(parent_id) = req.parent_id {
            let parent_exists = self
                .comments
                .iter()
                .any(|c| c.id == parent_id && c.item_id == req.item_id);
            if !parent_exists {
                return Err(MockError::NotFound("원 댓글을 찾을 수 없습니다.".into()));
            }
        }
        let reply_username = req.reply_user_id.and_then(|id| {
            self.accounts
                .iter()
                .find(|a| a.user.id == id)
                .map(|a| a.user.username.clone())
        });

        let comment = Comment {
            id: self.next_id(),
            item_id: req.item_id,
            user_id: author.id,
            username: author.username.clone(),
            avatar: author.avatar.clone(),
            content: content.to_string(),
            parent_id: req.parent_id,
            reply_user_id: req.reply_user_id,
            reply_username,
            created_at: Utc::now(),
        };
        self.comments.push(comment.clone());
        Ok(comment)
    }

    /// 주문 생성. 재고를 줄이고 재고가 없으면 판매 완료로 바꾼다.
    pub fn create_order(&mut self, buyer: &User, req: &NewOrder) -> Result<Order, MockError> {
        let id = self.next_id();
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == req.item_id)
            .ok_or_else(|| MockError::NotFound("상품을 찾을 수 없습니다.".into()))?;

        if item.seller_id == buyer.id {
            return Err(MockError::Forbidden("본인 상품은 주문할 수 없습니다.".into()));
        }
        if item.status != ItemStatus::Available {
            return Err(MockError::BadRequest("판매중인 상품이 아닙니다.".into()));
        }
        if req.quantity <= 0 || req.quantity > item.stock {
            return Err(MockError::BadRequest("재고가 부족합니다.".into()));
        }

        item.stock -= req.quantity;
        if item.stock == 0 {
            item.status = ItemStatus::Sold;
        }

        let order = Order {
            id,
            item_id: item.id,
            buyer_id: buyer.id,
            quantity: req.quantity,
            total_price: item.price * req.quantity as f64,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        self.orders.push(order.clone());
        Ok(order)
    }
}

// endregion: --- Mock Db

// region:    --- Mock State
/// 목 서버 공유 상태
pub struct MockState {
    pub db: RwLock<MockDb>,
    latency: Option<Duration>,
}

impl MockState {
    pub fn new(db: MockDb, latency: Option<Duration>) -> Self {
        Self {
            db: RwLock::new(db),
            latency,
        }
    }

    /// 인위적인 응답 지연
    pub async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

// endregion: --- Mock State
