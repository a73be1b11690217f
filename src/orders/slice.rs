use super::model::Order;

/// 주문 슬라이스
#[derive(Debug, Clone, Default)]
pub struct OrdersState {
    pub list: Vec<Order>,
    pub last: Option<Order>,
    pub error: Option<String>,
}

impl OrdersState {
    pub(crate) fn placed(&mut self, order: Order) {
        self.list.push(order.clone());
        self.last = Some(order);
    }
}
