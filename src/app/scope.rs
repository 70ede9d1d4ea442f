use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Lifetime of the asynchronous work owned by a view model.
///
/// Tasks are launched on the Tokio runtime and tracked here. Once the scope
/// is cleared every tracked task is aborted, no new task is started, and
/// `publish` refuses to write. `publish` and `clear` take the same lock, so a
/// write is either fully done before `clear` returns or never happens.
#[derive(Debug, Clone, Default)]
pub struct ViewModelScope {
    state: Arc<Mutex<ScopeState>>,
}

#[derive(Debug)]
struct ScopeState {
    active: bool,
    tasks: Vec<AbortHandle>,
}

impl Default for ScopeState {
    fn default() -> Self {
        Self {
            active: true,
            tasks: Vec::new(),
        }
    }
}

impl ViewModelScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        // 狀態只有旗標與 handle，poison 後沿用即可
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Spawns `work` on the current Tokio runtime. Returns `false` and drops
    /// the work when the scope is cleared or no runtime is running.
    pub fn launch<F>(&self, work: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("No Tokio runtime to launch work on: {}", e);
                return false;
            }
        };

        let mut state = self.lock();
        if !state.active {
            tracing::debug!("Scope already cleared, dropping launched work");
            return false;
        }

        state.tasks.retain(|task| !task.is_finished());
        let handle = runtime.spawn(work);
        state.tasks.push(handle.abort_handle());
        true
    }

    /// Runs `write` only while the scope is active.
    pub fn publish<W>(&self, write: W) -> bool
    where
        W: FnOnce(),
    {
        let state = self.lock();
        if !state.active {
            return false;
        }
        write();
        true
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    pub fn in_flight(&self) -> usize {
        self.lock()
            .tasks
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        if !state.active {
            return;
        }
        state.active = false;
        let tasks = std::mem::take(&mut state.tasks);
        tracing::debug!("Clearing scope, aborting {} task(s)", tasks.len());
        for task in tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_publish_after_clear_is_refused() {
        let scope = ViewModelScope::new();
        let writes = AtomicUsize::new(0);

        assert!(scope.publish(|| {
            writes.fetch_add(1, Ordering::SeqCst);
        }));
        scope.clear();
        assert!(!scope.publish(|| {
            writes.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(writes.load(Ordering::SeqCst), 1);
        assert!(!scope.is_active());
    }

    #[tokio::test]
    async fn test_clear_aborts_running_tasks() {
        let scope = ViewModelScope::new();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        scope.launch(async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = done_tx.send(());
        });
        assert_eq!(scope.in_flight(), 1);

        scope.clear();

        // 被中止的任務會丟棄 sender
        assert!(done_rx.await.is_err());
        assert!(!scope.launch(async {}));
    }

    #[test]
    fn test_launch_without_runtime_is_refused() {
        let scope = ViewModelScope::new();

        assert!(!scope.launch(async {}));
        assert_eq!(scope.in_flight(), 0);
        assert!(scope.is_active());
    }
}
