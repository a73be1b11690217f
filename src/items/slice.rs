use super::model::{Item, ItemId, ItemQuery, Page};

/// 상품 슬라이스
///
/// 목록과 상세 모두 화면 단위로 다시 받아오며, 화면 간에 캐시하지 않는다.
#[derive(Debug, Clone, Default)]
pub struct ItemsState {
    pub list: Vec<Item>,
    pub total: u64,
    pub query: Option<ItemQuery>,
    pub current: Option<Item>,
    pub error: Option<String>,
}

impl ItemsState {
    pub fn current_for(&self, item_id: ItemId) -> Option<&Item> {
        self.current.as_ref().filter(|item| item.id == item_id)
    }

    pub(crate) fn page_loaded(&mut self, query: ItemQuery, page: Page<Item>) {
        self.total = page.total;
        self.list = page.list;
        self.query = Some(query);
    }

    pub(crate) fn item_loaded(&mut self, item: Item) {
        if let Some(listed) = self.list.iter_mut().find(|listed| listed.id == item.id) {
            *listed = item.clone();
        }
        self.current = Some(item);
    }

    pub(crate) fn clear_current(&mut self, item_id: ItemId) {
        if self.current.as_ref().map(|item| item.id) == Some(item_id) {
            self.current = None;
        }
    }
}
