// region:    --- Imports
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

// endregion: --- Imports

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MOCK_ADDR: &str = "0.0.0.0:3000";

// region:    --- Client Config
/// API 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// 환경 변수로부터 설정 생성
    /// - MARKET_API_URL
    /// - MARKET_API_TIMEOUT_MS
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("MARKET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let timeout_ms = read_u64("MARKET_API_TIMEOUT_MS")?.unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self::new(base_url).with_timeout(Duration::from_millis(timeout_ms)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

// endregion: --- Client Config

// region:    --- Server Config
/// 목 서버 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// 응답마다 넣는 인위적인 지연
    pub latency: Option<Duration>,
}

impl ServerConfig {
    /// 환경 변수로부터 설정 생성
    /// - MOCK_API_ADDR
    /// - MOCK_API_LATENCY_MS
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_addr = std::env::var("MOCK_API_ADDR").unwrap_or_else(|_| DEFAULT_MOCK_ADDR.into());
        let addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "MOCK_API_ADDR",
                value: raw_addr.clone(),
            })?;
        let latency = read_u64("MOCK_API_LATENCY_MS")?
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Ok(Self { addr, latency })
    }
}

// endregion: --- Server Config

fn read_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("http://localhost:3000/api/");
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }
}
