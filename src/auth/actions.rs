/// 인증 관련 액션
/// 1. 로그인
/// 2. 회원가입
/// 3. 현재 사용자 조회
/// 4. 로그아웃
// region:    --- Imports
use super::model::{LoginRequest, RegisterForm, RegisterRequest, Session, User};
use crate::actions::{reject, run};
use crate::app::AppContext;
use crate::error::ClientError;
use crate::store::{Action, Payload, RequestKey};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// endregion: --- Imports

/// 최소 비밀번호 길이
pub const MIN_PASSWORD_LEN: usize = 6;

// region:    --- Actions
/// 1. 로그인
pub async fn login(
    ctx: &AppContext,
    cancel: &CancellationToken,
    username: &str,
    password: &str,
) -> Result<Session, ClientError> {
    let key = RequestKey::Login;
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return reject(
            ctx,
            key,
            ClientError::validation("아이디와 비밀번호를 입력해 주세요."),
        );
    }
    info!("{:<12} --> 로그인 요청: {}", "Auth", username);

    let req = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let session = run(ctx, key, cancel, ctx.api.login(&req), |session| {
        Payload::LoggedIn(session.clone())
    })
    .await?;

    ctx.api.set_token(Some(session.token.clone()));
    info!("{:<12} --> 로그인 성공: {}", "Auth", session.user.username);
    Ok(session)
}

/// 2. 회원가입
pub async fn register(
    ctx: &AppContext,
    cancel: &CancellationToken,
    form: &RegisterForm,
) -> Result<User, ClientError> {
    let key = RequestKey::Register;
    if let Err(e) = validate_register(form) {
        return reject(ctx, key, e);
    }

    let req = RegisterRequest {
        username: form.username.trim().to_string(),
        password: form.password.clone(),
        nickname: form
            .nickname
            .as_ref()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };
    run(ctx, key, cancel, ctx.api.register(&req), |user| {
        Payload::Registered(user.clone())
    })
    .await
}

/// 3. 현재 사용자 조회
///
/// 토큰이 만료되었으면 세션을 정리한다.
pub async fn fetch_current_user(
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Result<User, ClientError> {
    let key = RequestKey::CurrentUser;
    if ctx.api.token().is_none() {
        return reject(ctx, key, ClientError::Unauthenticated);
    }

    let result = run(ctx, key, cancel, ctx.api.current_user(), |user| {
        Payload::CurrentUser(user.clone())
    })
    .await;

    if let Err(e) = &result {
        if is_unauthorized(e) {
            info!("{:<12} --> 세션 만료, 로그아웃 처리", "Auth");
            clear_session(ctx);
        }
    }
    result
}

/// 4. 로그아웃
///
/// 서버 세션 폐기가 실패해도 클라이언트 세션은 정리한다.
pub async fn logout(ctx: &AppContext) {
    if ctx.api.token().is_some() {
        if let Err(e) = ctx.api.logout().await {
            warn!("{:<12} --> 서버 로그아웃 실패: {}", "Auth", e);
        }
    }
    clear_session(ctx);
}

/// 클라이언트 세션 정리 (토큰, 사용자, 찜, 주문)
pub fn clear_session(ctx: &AppContext) {
    info!("{:<12} --> 세션 정리", "Auth");
    ctx.api.set_token(None);
    ctx.store.dispatch(Action::LoggedOut);
}

// endregion: --- Actions

/// 회원가입 입력 검증
pub fn validate_register(form: &RegisterForm) -> Result<(), ClientError> {
    if form.username.trim().is_empty() {
        return Err(ClientError::validation("아이디를 입력해 주세요."));
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::validation(format!(
            "비밀번호는 {}자 이상이어야 합니다.",
            MIN_PASSWORD_LEN
        )));
    }
    if form.password != form.confirm_password {
        return Err(ClientError::validation("비밀번호가 일치하지 않습니다."));
    }
    Ok(())
}

fn is_unauthorized(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Api { code: 401, .. } | ClientError::Http { status: 401, .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn login_stores_session_and_token() {
        let api = Arc::new(StubApi::seeded());
        let ctx = AppContext::new(api.clone());

        let session = login(&ctx, &CancellationToken::new(), "alice", "password123")
            .await
            .unwrap();

        assert_eq!(ctx.api.token(), Some(session.token));
        assert!(ctx.store.select(|s| s.auth.is_logged_in()));
    }

    #[tokio::test]
    async fn wrong_password_keeps_logged_out() {
        let ctx = AppContext::new(Arc::new(StubApi::seeded()));

        let result = login(&ctx, &CancellationToken::new(), "alice", "nope").await;

        assert!(result.is_err());
        let state = ctx.store.snapshot();
        assert!(!state.auth.is_logged_in());
        assert!(state.auth.error.is_some());
    }

    #[tokio::test]
    async fn empty_credentials_skip_network() {
        let api = Arc::new(StubApi::seeded());
        let ctx = AppContext::new(api.clone());

        let result = login(&ctx, &CancellationToken::new(), "  ", "").await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert_eq!(api.calls(), 0);
    }

    #[test]
    fn register_form_rules() {
        let mut form = RegisterForm {
            username: "carol".into(),
            password: "12345".into(),
            confirm_password: "12345".into(),
            nickname: None,
        };
        assert!(validate_register(&form).is_err());

        form.password = "123456".into();
        assert!(validate_register(&form).is_err());

        form.confirm_password = "123456".into();
        assert!(validate_register(&form).is_ok());
    }

    #[tokio::test]
    async fn logout_clears_session() {
        let api = Arc::new(StubApi::seeded());
        let ctx = AppContext::new(api.clone());
        login(&ctx, &CancellationToken::new(), "bob", "password123")
            .await
            .unwrap();
        assert_eq!(api.sessions(), 1);

        logout(&ctx).await;

        assert!(ctx.api.token().is_none());
        assert!(ctx.store.select(|s| s.auth.user.is_none()));
        assert_eq!(api.sessions(), 0);
    }

    fn register_form(username: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            password: "secret12".into(),
            confirm_password: "secret12".into(),
            nickname: Some("  캐롤 ".into()),
        }
    }

    #[tokio::test]
    async fn register_creates_account() {
        let ctx = AppContext::new(Arc::new(StubApi::seeded()));
        let cancel = CancellationToken::new();

        let user = register(&ctx, &cancel, &register_form(" carol ")).await.unwrap();

        assert_eq!(user.username, "carol");
        assert_eq!(user.nickname.as_deref(), Some("캐롤"));
        assert!(ctx.store.select(|s| s.auth.registered.is_some()));
        assert!(login(&ctx, &cancel, "carol", "secret12").await.is_ok());
    }

    #[tokio::test]
    async fn register_duplicate_username_is_rejected() {
        let ctx = AppContext::new(Arc::new(StubApi::seeded()));

        let result = register(&ctx, &CancellationToken::new(), &register_form("alice")).await;

        assert!(matches!(result, Err(ClientError::Api { code: 400, .. })));
        let state = ctx.store.snapshot();
        assert!(state.auth.registered.is_none());
        assert!(state.auth.error.is_some());
    }
}
