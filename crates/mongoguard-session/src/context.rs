//! Caller-supplied cancellation and deadline.
//!
//! One `QueryContext` covers both round trips of a guarded call (explain and
//! the delegated query). An already-cancelled or expired context fails the
//! stage before anything is sent.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use mongoguard_core::error::{GuardError, Result};

#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl QueryContext {
    /// No deadline, never cancelled unless a token is attached.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Keeps the earlier deadline if one is already set.
    pub fn with_deadline(self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(cur) if cur <= deadline => cur,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    pub fn with_cancellation(self, cancel: CancellationToken) -> Self {
        Self { cancel, ..self }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run one stage of a guarded call under this context.
    pub async fn run<F, T>(&self, stage: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(GuardError::Cancelled { stage });
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(GuardError::DeadlineExceeded { stage });
            }
        }

        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                    Ok(res) => res,
                    Err(_) => Err(GuardError::DeadlineExceeded { stage }),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(GuardError::Cancelled { stage }),
            res = bounded => res,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_context_fails_before_polling() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = QueryContext::background().with_cancellation(token);

        let err = ctx
            .run("explain", async {
                Err::<(), _>(GuardError::Config("stage must not run".into()))
            })
            .await
            .unwrap_err();
        assert_eq!(err.code().as_str(), "CANCELLED");
        assert_eq!(err.to_string(), "explain cancelled");
    }

    #[tokio::test]
    async fn deadline_interrupts_slow_stage() {
        let ctx = QueryContext::background().with_timeout(Duration::from_millis(50));
        let err = ctx
            .run("find", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.code().as_str(), "DEADLINE_EXCEEDED");
    }

    #[tokio::test]
    async fn cancellation_mid_flight() {
        let token = CancellationToken::new();
        let ctx = QueryContext::background().with_cancellation(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = ctx
            .run("explain", std::future::pending::<Result<()>>())
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Cancelled { stage: "explain" }));
        canceller.await.unwrap();
    }

    #[test]
    fn earlier_deadline_wins() {
        let now = Instant::now();
        let ctx = QueryContext::background()
            .with_deadline(now + Duration::from_secs(1))
            .with_deadline(now + Duration::from_secs(10));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
    }
}
