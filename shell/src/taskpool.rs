use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::Future;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Pool hosting the shell's long-lived background subscriptions.
///
/// Each task holds a semaphore permit for as long as it runs, so the pool
/// size bounds how many subscriptions are live at once. Tasks end when their
/// upstream completes or when the pool is shut down (dropping the pool shuts
/// it down).
pub struct TaskPool {
    semaphore: Arc<Semaphore>,
    cancel_token: CancellationToken,
    running: Arc<AtomicUsize>,
}

impl TaskPool {
    pub fn new(n_tasks: usize) -> TaskPool {
        let semaphore = Arc::new(Semaphore::new(n_tasks));
        let cancel_token = CancellationToken::new();

        TaskPool {
            semaphore,
            cancel_token,
            running: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Spawns `func` on the current runtime under the given task name.
    pub fn execute<F, T>(&self, name: &'static str, func: F)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send,
    {
        let semaphore = self.semaphore.clone();
        let token = self.cancel_token.clone();
        let running = self.running.clone();
        tokio::spawn(async move {
            let main = async {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                running.fetch_add(1, Ordering::SeqCst);
                log::debug!("Background task '{name}' started");
                func.await;
                running.fetch_sub(1, Ordering::SeqCst);
                log::debug!("Background task '{name}' finished");
            };

            tokio::select! {
                () = main => {},
                () = token.cancelled() => {
                    log::debug!("Background task '{name}' cancelled");
                }
            }
        });
    }

    /// Number of tasks currently holding a permit.
    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn shutdown(&self) {
        self.semaphore.close();
        self.cancel_token.cancel();
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_execute_runs_task_to_completion() {
        let pool = TaskPool::new(2);
        let (tx, rx) = oneshot::channel();

        pool.execute("completion", async move {
            let _ = tx.send(42);
        });

        let value = tokio::time::timeout(Duration::from_secs(1), rx)
            .await
            .expect("task should complete")
            .expect("sender should not be dropped");
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_tasks() {
        let pool = TaskPool::new(1);
        let (tx, rx) = oneshot::channel::<()>();

        pool.execute("never-finishes", async move {
            std::future::pending::<()>().await;
            let _ = tx.send(());
        });

        pool.shutdown();
        assert!(pool.is_shut_down());

        // Sender is dropped when the cancelled task is torn down.
        let result = tokio::time::timeout(Duration::from_secs(1), rx).await;
        assert!(matches!(result, Ok(Err(_))));
    }
}
