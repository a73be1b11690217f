use super::model::{Favorite, FavoriteId};
use crate::items::model::ItemId;
use std::collections::HashMap;

/// 찜 슬라이스
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    pub list: Vec<Favorite>,
    /// 상품별 현재 찜 id. 토글 시 추가/삭제를 고르기 위한 캐시이며 서버가 기준이다.
    pointers: HashMap<ItemId, Option<FavoriteId>>,
    pub error: Option<String>,
}

impl FavoritesState {
    /// 알려진 찜 포인터. `None`이면 아직 확인하지 않은 상품이다.
    pub fn pointer(&self, item_id: ItemId) -> Option<Option<FavoriteId>> {
        self.pointers.get(&item_id).copied()
    }

    pub fn is_favorited(&self, item_id: ItemId) -> Option<bool> {
        self.pointer(item_id).map(|pointer| pointer.is_some())
    }

    /// 같은 상품에 대한 찜 기록 수 (중복 검사용)
    pub fn count_for(&self, item_id: ItemId) -> usize {
        self.list.iter().filter(|f| f.item_id == item_id).count()
    }

    pub(crate) fn list_loaded(&mut self, favorites: Vec<Favorite>) {
        for pointer in self.pointers.values_mut() {
            *pointer = None;
        }
        for favorite in &favorites {
            self.pointers.insert(favorite.item_id, Some(favorite.id));
        }
        self.list = favorites;
    }

    pub(crate) fn status_loaded(&mut self, item_id: ItemId, favorite_id: Option<FavoriteId>) {
        self.pointers.insert(item_id, favorite_id);
    }

    pub(crate) fn added(&mut self, favorite: Favorite) {
        self.pointers.insert(favorite.item_id, Some(favorite.id));
        if !self.list.iter().any(|f| f.id == favorite.id) {
            self.list.push(favorite);
        }
    }

    pub(crate) fn removed(&mut self, item_id: ItemId, favorite_id: FavoriteId) {
        self.pointers.insert(item_id, None);
        self.list.retain(|f| f.id != favorite_id);
    }
}
