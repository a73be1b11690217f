// region:    --- Imports
use super::state::{Account, MockDb};
use crate::auth::model::{Role, User};
use crate::comments::model::Comment;
use crate::items::model::{Item, ItemStatus};
use chrono::{Duration, Utc};

// endregion: --- Imports

/// 시드 계정 공통 비밀번호
pub const SEED_PASSWORD: &str = "password123";

/// 시드 데이터로 채운 저장소
/// - 사용자: alice(1), bob(2)
/// - 상품: 모든 상태와 재고 없는 상품 포함
/// - 댓글: 1번 상품에 댓글과 답글
pub fn seed() -> MockDb {
    let now = Utc::now();
    let alice = user(1, "alice", "앨리스", Role::User);
    let bob = user(2, "bob", "밥", Role::User);

    let items = vec![
        item(1, "중고 자전거", "출퇴근용으로 1년 탔습니다.", 120000.0, ItemStatus::Available, 1, &alice, 10),
        item(2, "원목 책상", "흠집 조금 있어요.", 45000.0, ItemStatus::Available, 3, &bob, 9),
        item(3, "블루투스 스피커", "예약 중입니다.", 30000.0, ItemStatus::Reserved, 1, &alice, 8),
        item(4, "캠핑 의자", "판매 완료", 15000.0, ItemStatus::Sold, 0, &bob, 7),
        item(5, "게임 콘솔", "재고가 없습니다.", 250000.0, ItemStatus::Available, 0, &alice, 6),
        item(6, "겨울 패딩", "아직 올리지 않은 상품", 60000.0, ItemStatus::Unlisted, 1, &bob, 5),
        item(7, "전공 서적 세트", "컴퓨터공학 전공 서적 5권", 20000.0, ItemStatus::Available, 5, &alice, 4),
    ];

    let comments = vec![
        Comment {
            id: 1,
            item_id: 1,
            user_id: bob.id,
            username: bob.username.clone(),
            avatar: bob.avatar.clone(),
            content: "아직 판매 중인가요?".to_string(),
            parent_id: None,
            reply_user_id: None,
            reply_username: None,
            created_at: now - Duration::hours(3),
        },
        Comment {
            id: 2,
            item_id: 1,
            user_id: alice.id,
            username: alice.username.clone(),
            avatar: alice.avatar.clone(),
            content: "네, 판매 중입니다.".to_string(),
            parent_id: Some(1),
            reply_user_id: Some(bob.id),
            reply_username: Some(bob.username.clone()),
            created_at: now - Duration::hours(2),
        },
    ];

    MockDb {
        accounts: vec![
            Account {
                user: alice,
                password: SEED_PASSWORD.to_string(),
            },
            Account {
                user: bob,
                password: SEED_PASSWORD.to_string(),
            },
        ],
        items,
        comments,
        next_id: 100,
        ..MockDb::default()
    }
}

fn user(id: i64, username: &str, nickname: &str, role: Role) -> User {
    User {
        id,
        username: username.to_string(),
        nickname: Some(nickname.to_string()),
        avatar: Some(format!("/avatars/{}.png", username)),
        role,
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    name: &str,
    description: &str,
    price: f64,
    status: ItemStatus,
    stock: i64,
    seller: &User,
    days_ago: i64,
) -> Item {
    Item {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        status,
        stock,
        seller_id: seller.id,
        seller_name: Some(seller.username.clone()),
        images: vec![format!("/images/items/{}.jpg", id)],
        created_at: Some(Utc::now() - Duration::days(days_ago)),
    }
}
