/// Cancellation and deadline scope for a single outbound call.
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::errors::AtlasError;

/// Carries a cancellation token and an optional deadline into a call.
///
/// Cloning shares the token: cancelling any clone cancels them all.
#[derive(Debug, Clone)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<(Instant, Duration)>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context whose deadline is `timeout` from now.
    ///
    /// A zero timeout is already expired. A timeout too large for the clock
    /// behaves like no deadline at all.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout).map(|at| (at, timeout)),
        }
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fail fast if the context is already done.
    ///
    /// # Errors
    ///
    /// `Cancelled` if cancelled, `TimedOut` if the deadline has passed.
    pub fn check(&self) -> Result<(), AtlasError> {
        if self.is_cancelled() {
            return Err(AtlasError::Cancelled);
        }
        match self.deadline {
            Some((at, timeout)) if Instant::now() >= at => Err(AtlasError::TimedOut { timeout }),
            _ => Ok(()),
        }
    }

    /// Drive `fut` until it completes, the context is cancelled, or the deadline passes.
    ///
    /// Whichever branch loses is dropped before returning, so an in-flight
    /// request is aborted and the deadline timer released.
    ///
    /// # Errors
    ///
    /// `Cancelled` or `TimedOut` if the context finished first.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, AtlasError>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some((at, timeout)) => {
                    tokio::time::sleep_until(at).await;
                    timeout
                }
                None => std::future::pending::<Duration>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(AtlasError::Cancelled),
            timeout = deadline => Err(AtlasError::TimedOut { timeout }),
            out = fut => Ok(out),
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}
