/// 로그인
pub const LOGIN: &str = "/auth/login";

/// 로그아웃
pub const LOGOUT: &str = "/auth/logout";

/// 회원가입
pub const REGISTER: &str = "/auth/register";

/// 현재 사용자 조회
pub const CURRENT_USER: &str = "/auth/me";

/// 상품 목록 조회
pub const ITEMS: &str = "/items";

/// 찜 목록 조회 / 찜 추가
pub const FAVORITES: &str = "/favorites";

/// 댓글 작성
pub const COMMENTS: &str = "/comments";

/// 주문 생성
pub const ORDERS: &str = "/orders";

/// 상품 상세 조회
pub fn item(item_id: i64) -> String {
    format!("{}/{}", ITEMS, item_id)
}

/// 상품 댓글 목록 조회
pub fn item_comments(item_id: i64) -> String {
    format!("{}/{}/comments", ITEMS, item_id)
}

/// 찜 삭제
pub fn favorite(favorite_id: i64) -> String {
    format!("{}/{}", FAVORITES, favorite_id)
}

/// 찜 여부 조회
pub fn favorite_check(item_id: i64) -> String {
    format!("{}/{}/favorite", ITEMS, item_id)
}
