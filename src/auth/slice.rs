use super::model::{Session, User};

/// 인증 슬라이스
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 마지막으로 가입한 사용자 (가입 완료 안내용)
    pub registered: Option<User>,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub(crate) fn logged_in(&mut self, session: Session) {
        self.token = Some(session.token);
        self.user = Some(session.user);
    }

    pub(crate) fn registered(&mut self, user: User) {
        self.registered = Some(user);
    }

    /// 서버 기준 사용자 정보로 통째로 교체
    pub(crate) fn current_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub(crate) fn logged_out(&mut self) {
        *self = AuthState::default();
    }
}
