use super::router::Route;
use crate::app::AppContext;
use crate::auth::actions;
use crate::error::ClientError;
use tokio_util::sync::CancellationToken;

/// 로그인 폼
#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    redirect: Option<Route>,
}

impl LoginView {
    pub fn new(redirect: Option<Route>) -> Self {
        Self {
            redirect,
            ..Self::default()
        }
    }

    /// 로그인 성공 후 이동할 화면. 로그인 화면으로 되돌아가지 않는다.
    pub fn destination(&self) -> Route {
        match &self.redirect {
            Some(route) if !route.is_login() => route.clone(),
            _ => Route::Home,
        }
    }

    /// 로그인 제출. 비밀번호 입력은 결과와 상관없이 비운다.
    pub async fn submit(
        &mut self,
        ctx: &AppContext,
        cancel: &CancellationToken,
    ) -> Result<Route, ClientError> {
        let password = std::mem::take(&mut self.password);
        actions::login(ctx, cancel, &self.username, &password).await?;
        Ok(self.destination())
    }
}
