/// 화면 단위 작업 관리
/// 1. ViewScope: 화면이 시작한 작업 묶음 + 취소 토큰
/// 2. KeyedLocks: 같은 키의 작업을 직렬화하는 비동기 잠금
// region:    --- Imports
use crate::store::RequestKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

// endregion: --- Imports

// region:    --- View Scope
/// 화면 범위
///
/// 화면을 떠나거나 스코프가 drop 되면 토큰이 취소된다. 작업은 토큰을 보고 스스로 정리한다.
pub struct ViewScope {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// 부모가 취소되면 함께 취소되는 하위 스코프
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            tracker: TaskTracker::new(),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// 작업 시작
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(task);
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// 지금까지 시작한 작업이 모두 끝날 때까지 대기
    pub async fn idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

// endregion: --- View Scope

// region:    --- Keyed Locks
/// 요청 키별 비동기 잠금
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<RequestKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 키의 이전 작업이 끝날 때까지 대기 후 잠금 획득
    pub async fn acquire(&self, key: RequestKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            // 아무도 쓰지 않는 잠금 정리
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }
}

// endregion: --- Keyed Locks
