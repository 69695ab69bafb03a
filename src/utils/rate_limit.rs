//! 速率限制工具：debounce 與 throttle。
//!
//! `Debouncer` 把短時間內的多次輸入合併成一次回呼，只使用最後一次的值。
//! `Throttle` 則是前緣觸發：第一次立即執行，`limit` 之內的後續呼叫全部丟棄。

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

pub struct Debouncer<T: Send + 'static> {
    window: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(window: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            window,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// 排程一次回呼，取代尚未觸發的那一次。必須在 tokio runtime 內呼叫。
    pub fn call(&self, value: T) {
        let mut pending = self.lock_pending();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let callback = Arc::clone(&self.callback);
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            (*callback)(value);
        }));
    }

    /// 等待目前排程中的回呼完成（若有）
    pub async fn flush(&self) {
        let handle = self.lock_pending().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!("Debounced callback failed: {}", e);
                }
            }
        }
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.lock_pending().take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_fired: None,
        }
    }

    pub fn try_fire(&mut self) -> bool {
        let now = Instant::now();
        match self.last_fired {
            Some(last) if now.duration_since(last) < self.limit => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    pub fn call<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        if self.try_fire() {
            Some(f())
        } else {
            None
        }
    }
}
