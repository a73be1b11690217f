// region:    --- Imports
use market_client::config::ServerConfig;
use market_client::mock_server;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 환경 변수 설정 읽기
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{:<12} --> 설정 읽기 실패: {}", "Main", e);
            return Err(e.into());
        }
    };
    if let Some(latency) = config.latency {
        info!("{:<12} --> 응답 지연: {:?}", "Main", latency);
    }

    // 시드 데이터로 목 서버 실행
    let server = mock_server::start(config.addr, config.latency).await?;
    info!("{:<12} --> API base url: {}", "Main", server.base_url());

    server.wait().await;
    Ok(())
}
// endregion: --- Main
