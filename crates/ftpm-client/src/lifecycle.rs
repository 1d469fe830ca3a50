//! Cancellation scoped to a page's lifetime.
//!
//! A [`Lifecycle`] is created when a page is entered and dropped (or
//! cancelled) when it is left. Work spawned with [`spawn_scoped`] races
//! against the lifecycle's [`CancellationToken`]: once the token fires the
//! in-flight future is dropped and its completion handler never runs.
//!
//! ```text
//!  enter page          leave page
//!      │                   │
//!      ▼                   ▼
//!  Lifecycle::new() ──► cancel() / drop
//!      │                   │
//!      └─ token ─► spawn_scoped(fetch, on_complete)
//!                          └─ on_complete skipped after cancel
//! ```

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner side of a cancellation scope. Dropping it cancels the scope.
#[derive(Debug)]
pub struct Lifecycle {
    tx: watch::Sender<bool>,
}

/// Observer side of a cancellation scope.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Hand out a token tied to this scope.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Signal every token of this scope. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the scope is cancelled (or its owner is gone).
    pub async fn cancelled(&mut self) {
        // Err means the Lifecycle was dropped, which also ends the scope.
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Run `future` inside the scope of `token`, then hand its output to
/// `on_complete` unless the scope was cancelled first.
///
/// The returned handle resolves to `true` when `on_complete` ran.
pub fn spawn_scoped<Fut, T, C>(
    mut token: CancellationToken,
    future: Fut,
    on_complete: C,
) -> JoinHandle<bool>
where
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
    C: FnOnce(T) + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("scoped task cancelled before completion");
                false
            }
            output = future => {
                if token.is_cancelled() {
                    return false;
                }
                on_complete(output);
                true
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completion_runs_while_scope_alive() {
        let lifecycle = Lifecycle::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let handle = spawn_scoped(lifecycle.token(), async { 42 }, move |value| {
            assert_eq!(value, 42);
            flag.store(true, Ordering::SeqCst);
        });

        assert!(handle.await.unwrap());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_skips_completion() {
        let lifecycle = Lifecycle::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let handle = spawn_scoped(
            lifecycle.token(),
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                "late"
            },
            move |_| flag.store(true, Ordering::SeqCst),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        lifecycle.cancel();

        assert!(!handle.await.unwrap());
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_scope() {
        let lifecycle = Lifecycle::new();
        let mut token = lifecycle.token();
        assert!(!token.is_cancelled());

        drop(lifecycle);

        tokio::time::timeout(Duration::from_secs(1), token.cancelled())
            .await
            .expect("token should resolve after the lifecycle is dropped");
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_already_cancelled_scope_never_runs() {
        let lifecycle = Lifecycle::new();
        let token = lifecycle.token();
        lifecycle.cancel();
        assert!(lifecycle.is_cancelled());

        let handle = spawn_scoped(token, async { 1 }, |_| panic!("must not run"));
        assert!(!handle.await.unwrap());
    }
}
