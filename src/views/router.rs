// region:    --- Imports
use crate::items::model::ItemId;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

// endregion: --- Imports

// region:    --- Route
/// 화면 경로
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login { redirect: Option<String> },
    Items,
    ItemDetail(ItemId),
    Profile,
    Favorites,
    NotFound(String),
}

impl Route {
    /// 경로 문자열 해석 (쿼리 문자열은 무시, 로그인의 redirect만 사용)
    pub fn parse(path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login {
                redirect: query.and_then(redirect_param),
            },
            ["items"] => Route::Items,
            ["items", id] => match id.parse::<ItemId>() {
                Ok(id) if id > 0 => Route::ItemDetail(id),
                _ => Route::NotFound(path.to_string()),
            },
            ["profile"] | ["user"] => Route::Profile,
            ["favorites"] => Route::Favorites,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login { redirect: None } => "/login".to_string(),
            Route::Login {
                redirect: Some(redirect),
            } => format!(
                "/login?redirect={}",
                utf8_percent_encode(redirect, REDIRECT_ENCODE_SET)
            ),
            Route::Items => "/items".to_string(),
            Route::ItemDetail(id) => format!("/items/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// 로그인이 필요한 화면
    pub fn requires_login(&self) -> bool {
        matches!(self, Route::Profile | Route::Favorites)
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Route::Login { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// redirect 값 인코딩에서 그대로 두는 문자 (경로 구분자 포함)
const REDIRECT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 앱 내부 경로만 허용 (`//host` 형태의 외부 주소는 버린다)
fn redirect_param(query: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "redirect")
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
        .filter(|value| value.starts_with('/') && !value.starts_with("//"))
}

// endregion: --- Route

// region:    --- Viewport
/// 모바일 레이아웃으로 바뀌는 너비
pub const MOBILE_BREAKPOINT: u32 = 768;

/// 화면 크기
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn desktop() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }

    pub fn mobile() -> Self {
        Self {
            width: 375,
            height: 667,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT
    }

    /// 상품 그리드 열 수
    pub fn grid_columns(&self) -> u8 {
        match self.width {
            w if w < MOBILE_BREAKPOINT => 2,
            w if w < 1024 => 3,
            _ => 4,
        }
    }
}

// endregion: --- Viewport
