/// 요청 키별 상태 추적
/// 슬라이스 단위 로딩 플래그 대신, 논리적 요청(예: 7번 상품 찜 토글)마다 상태를 따로 관리한다.
// region:    --- Imports
use crate::items::model::ItemId;
use std::collections::HashMap;

// endregion: --- Imports

// region:    --- Request Key
/// 요청 번호 (스토어가 단조 증가로 발급)
pub type RequestId = u64;

/// 논리적 요청의 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Login,
    Register,
    CurrentUser,
    ItemList,
    ItemDetail(ItemId),
    FavoriteList,
    FavoriteCheck(ItemId),
    FavoriteToggle(ItemId),
    Comments(ItemId),
    PostComment(ItemId),
    PlaceOrder(ItemId),
}

/// 요청 키가 속한 슬라이스
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceName {
    Auth,
    Items,
    Favorites,
    Comments,
    Orders,
}

impl RequestKey {
    pub fn slice(&self) -> SliceName {
        match self {
            RequestKey::Login | RequestKey::Register | RequestKey::CurrentUser => SliceName::Auth,
            RequestKey::ItemList | RequestKey::ItemDetail(_) => SliceName::Items,
            RequestKey::FavoriteList
            | RequestKey::FavoriteCheck(_)
            | RequestKey::FavoriteToggle(_) => SliceName::Favorites,
            RequestKey::Comments(_) | RequestKey::PostComment(_) => SliceName::Comments,
            RequestKey::PlaceOrder(_) => SliceName::Orders,
        }
    }

    /// 상품 화면에 묶인 요청인지 (화면 이동 시 정리 대상)
    pub fn item_id(&self) -> Option<ItemId> {
        match self {
            RequestKey::ItemDetail(id)
            | RequestKey::FavoriteCheck(id)
            | RequestKey::FavoriteToggle(id)
            | RequestKey::Comments(id)
            | RequestKey::PostComment(id)
            | RequestKey::PlaceOrder(id) => Some(*id),
            _ => None,
        }
    }
}

// endregion: --- Request Key

// region:    --- Request Table
/// 요청 상태
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

#[derive(Debug, Clone, Default)]
struct Entry {
    latest: RequestId,
    status: RequestStatus,
}

/// 요청 키별 최신 요청 번호와 상태
#[derive(Debug, Clone, Default)]
pub struct RequestTable {
    entries: HashMap<RequestKey, Entry>,
}

impl RequestTable {
    /// 요청 시작. 같은 키의 이전 요청은 이 시점부터 오래된 요청이 된다.
    pub fn begin(&mut self, key: RequestKey, id: RequestId) {
        let entry = self.entries.entry(key).or_default();
        if id >= entry.latest {
            entry.latest = id;
            entry.status = RequestStatus::Pending;
        }
    }

    /// 요청 종료. 최신 요청일 때만 상태를 바꾸고 true를 돌려준다.
    pub fn settle(&mut self, key: RequestKey, id: RequestId, status: RequestStatus) -> bool {
        if !self.is_current(key, id) {
            return false;
        }
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// 최신 요청 여부
    pub fn is_current(&self, key: RequestKey, id: RequestId) -> bool {
        self.entries
            .get(&key)
            .map(|entry| entry.latest == id && entry.status == RequestStatus::Pending)
            .unwrap_or(false)
    }

    pub fn status(&self, key: RequestKey) -> RequestStatus {
        self.entries
            .get(&key)
            .map(|entry| entry.status.clone())
            .unwrap_or_default()
    }

    pub fn is_loading(&self, key: RequestKey) -> bool {
        self.status(key) == RequestStatus::Pending
    }

    /// 해당 슬라이스에 진행 중인 요청이 하나라도 있는지
    pub fn any_loading(&self, slice: SliceName) -> bool {
        self.entries
            .iter()
            .any(|(key, entry)| key.slice() == slice && entry.status == RequestStatus::Pending)
    }

    /// 상품 화면에 묶인 기록 제거
    pub fn forget_item(&mut self, item_id: ItemId) {
        self.entries.retain(|key, _| key.item_id() != Some(item_id));
    }
}

// endregion: --- Request Table
