/// 응답 봉투 처리
/// 모든 API 응답은 `{ code, message, data }` 형태를 가진다.
// region:    --- Imports
use crate::error::{ClientError, FALLBACK_MESSAGE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// endregion: --- Imports

/// 성공 코드
pub const CODE_OK: i64 = 200;

// region:    --- Envelope
/// 응답 봉투
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// 성공 코드 여부 (일부 서버는 0을 성공으로 사용한다)
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK || self.code == 0
    }
}

impl ApiResponse<Value> {
    /// `data`를 원하는 타입으로 변환한다.
    /// `data`가 비어 있으면 null로 취급하므로 `()`나 `Option<T>`도 받을 수 있다.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        if !self.is_success() {
            return Err(ClientError::Api {
                code: self.code,
                message: self.message,
            });
        }
        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(ClientError::from)
    }
}

// endregion: --- Envelope

// region:    --- Body Decoding
/// 응답 본문을 해석한다.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    let is_success = (200..300).contains(&status);

    match serde_json::from_str::<ApiResponse<Value>>(body) {
        Ok(envelope) if is_success || !envelope.is_success() => envelope.into_result(),
        Ok(envelope) => Err(ClientError::Http {
            status,
            message: envelope.message,
        }),
        Err(e) if is_success => Err(ClientError::Decode(e.to_string())),
        Err(_) => Err(ClientError::Http {
            status,
            message: extract_message(body).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        }),
    }
}

/// 봉투가 아닌 오류 본문에서 메시지를 찾는다.
/// `message`, `error`, `msg` 필드 또는 평문 본문 순서로 사용한다.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error", "msg"]
            .iter()
            .filter_map(|key| map.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) if !body.starts_with('<') => Some(body.to_string()),
        Err(_) => None,
    }
}

// endregion: --- Body Decoding

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let body = json!({"code": 200, "message": "success", "data": {"favorited": true, "favoriteId": 4}});
        let check: crate::favorites::model::FavoriteCheck =
            decode_body(200, &body.to_string()).unwrap();
        assert!(check.favorited);
        assert_eq!(check.favorite_id, Some(4));
    }

    #[test]
    fn null_data_decodes_as_unit() {
        let body = json!({"code": 200, "message": "success", "data": null});
        let unit: Result<(), _> = decode_body(200, &body.to_string());
        assert!(unit.is_ok());
    }

    #[test]
    fn failure_code_inside_http_ok_is_api_error() {
        let body = json!({"code": 400, "message": "이미 찜한 상품입니다.", "data": null});
        let result: Result<(), _> = decode_body(200, &body.to_string());
        assert_eq!(
            result,
            Err(ClientError::Api {
                code: 400,
                message: "이미 찜한 상품입니다.".to_string()
            })
        );
    }

    #[test]
    fn non_envelope_error_body_uses_error_field() {
        let result: Result<(), _> = decode_body(500, r#"{"error":"db down"}"#);
        assert_eq!(
            result,
            Err(ClientError::Http {
                status: 500,
                message: "db down".to_string()
            })
        );
    }

    #[test]
    fn html_error_page_falls_back() {
        let result: Result<(), _> = decode_body(502, "<html>Bad Gateway</html>");
        match result {
            Err(e) => assert_eq!(e.user_message(), FALLBACK_MESSAGE),
            Ok(_) => panic!("502 응답은 실패해야 합니다"),
        }
    }
}
