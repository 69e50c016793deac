use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::info;

/// Bounded-concurrency executor shared by the UDP and TCP listeners.
///
/// `submit` never blocks the caller: the task is spawned immediately and waits
/// for one of `size` permits before it starts. When every worker is busy,
/// tasks queue up instead of being rejected.
#[derive(Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        info!(workers = size, "Initializing worker pool");

        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Workers not currently running a task.
    pub fn idle_workers(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn submit<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permits = self.permits.clone();
        tokio::spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            task.await;
        })
    }
}
