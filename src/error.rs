// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

/// 사용자에게 보여줄 메시지를 찾지 못했을 때의 기본 문구
pub const FALLBACK_MESSAGE: &str = "요청 처리 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

// region:    --- Client Error
/// 클라이언트 오류
///
/// 모든 실패는 비동기 액션의 rejected 상태로 변환되며, 애플리케이션을 중단시키지 않는다.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// 서버가 응답 봉투(`code`, `message`)로 실패를 알린 경우
    #[error("API 오류 ({code}): {message}")]
    Api { code: i64, message: String },

    /// 봉투로 해석할 수 없는 HTTP 오류 응답
    #[error("HTTP 오류 ({status}): {message}")]
    Http { status: u16, message: String },

    /// 네트워크 전송 오류
    #[error("네트워크 오류: {0}")]
    Transport(String),

    /// 응답 본문 해석 실패
    #[error("응답 해석 오류: {0}")]
    Decode(String),

    /// 네트워크 호출 전에 클라이언트에서 거부된 요청
    #[error("{0}")]
    Validation(String),

    /// 로그인이 필요한 요청
    #[error("로그인이 필요합니다.")]
    Unauthenticated,

    /// 화면 이동 등으로 취소된 요청
    #[error("요청이 취소되었습니다.")]
    Cancelled,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// 알림에 표시할 메시지
    ///
    /// 응답 본문의 메시지, 예외 메시지, 기본 문구 순으로 고른다.
    pub fn user_message(&self) -> String {
        let message = match self {
            ClientError::Api { message, .. } | ClientError::Http { message, .. } => {
                message.trim().to_string()
            }
            ClientError::Transport(message) | ClientError::Decode(message) => {
                message.trim().to_string()
            }
            other => other.to_string(),
        };

        if message.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

// endregion: --- Client Error

// region:    --- Config Error
/// 설정 오류
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("환경 변수 {name} 값이 올바르지 않습니다: {value}")]
    InvalidValue { name: &'static str, value: String },
}

// endregion: --- Config Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_preferred() {
        let err = ClientError::Api {
            code: 400,
            message: "이미 찜한 상품입니다.".to_string(),
        };
        assert_eq!(err.user_message(), "이미 찜한 상품입니다.");
    }

    #[test]
    fn blank_message_falls_back() {
        let err = ClientError::Http {
            status: 502,
            message: "  ".to_string(),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
