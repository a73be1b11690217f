/// 비동기 액션 실행기
/// 외부 호출 하나를 요청 키로 추적하며 수명주기를 스토어에 알린다.
// region:    --- Imports
use crate::app::AppContext;
use crate::error::ClientError;
use crate::store::{Action, Payload, RequestKey};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Runner
/// 외부 호출 실행
/// - 시작: pending
/// - 성공: fulfilled (결과 저장, 오류 초기화)
/// - 실패: rejected (사용자 메시지 저장)
/// - 취소: aborted (오류 없이 pending 해제)
pub async fn run<T, F, P>(
    ctx: &AppContext,
    key: RequestKey,
    cancel: &CancellationToken,
    call: F,
    payload: P,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
    P: FnOnce(&T) -> Payload,
{
    let id = ctx.store.next_request_id();
    ctx.store.dispatch(Action::Pending { key, id });

    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = call => result,
    };

    match result {
        Ok(value) => {
            ctx.store.dispatch(Action::Fulfilled {
                key,
                id,
                payload: payload(&value),
            });
            Ok(value)
        }
        Err(ClientError::Cancelled) => {
            info!("{:<12} --> 요청 취소: {:?}#{}", "Action", key, id);
            ctx.store.dispatch(Action::Aborted { key, id });
            Err(ClientError::Cancelled)
        }
        Err(e) => {
            warn!("{:<12} --> 요청 실패: {:?}#{}: {}", "Action", key, id, e);
            ctx.store.dispatch(Action::Rejected {
                key,
                id,
                message: e.user_message(),
            });
            Err(e)
        }
    }
}

/// 네트워크 호출 전에 클라이언트에서 거부
///
/// 화면에 오류가 보이도록 같은 수명주기를 거친다.
pub fn reject<T>(ctx: &AppContext, key: RequestKey, error: ClientError) -> Result<T, ClientError> {
    info!("{:<12} --> 요청 거부: {:?}: {}", "Action", key, error);
    let id = ctx.store.next_request_id();
    ctx.store.dispatch(Action::Pending { key, id });
    ctx.store.dispatch(Action::Rejected {
        key,
        id,
        message: error.user_message(),
    });
    Err(error)
}

/// 로그인 상태 확인
pub fn require_login(ctx: &AppContext, key: RequestKey) -> Result<(), ClientError> {
    if ctx.store.select(|s| s.auth.is_logged_in()) {
        Ok(())
    } else {
        reject(ctx, key, ClientError::Unauthenticated)
    }
}

// endregion: --- Runner
