//! The unit-of-work abstraction.
//!
//! A [`Job`] is one generic callable parameterized over its payload type,
//! with `()` standing in for "no payload", so there is a single execution path
//! rather than parallel with-argument and without-argument variants. Any
//! `Fn(P) -> Future<Output = AppResult<()>>` closure is a `Job<P>` through
//! the blanket impl, so most callers never implement the trait by hand.

use std::future::Future;

use async_trait::async_trait;

use crate::error::AppResult;

/// A unit of work invoked by the scheduler, once per occurrence.
///
/// The payload is cloned and handed to the job on every fire. Returning
/// `Err` terminates the chain; see the crate-level failure policy.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use fire_later::{AppResult, Job};
///
/// struct Reindex;
///
/// #[async_trait]
/// impl Job<String> for Reindex {
///     async fn run(&self, index: String) -> AppResult<()> {
///         rebuild(&index).await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Job<P>: Send + Sync + 'static
where
    P: Send + 'static,
{
    /// Execute one occurrence with the given payload.
    async fn run(&self, payload: P) -> AppResult<()>;
}

/// Blanket implementation: any async closure over the payload is a job.
#[async_trait]
impl<P, F, Fut> Job<P> for F
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<()>> + Send + 'static,
{
    async fn run(&self, payload: P) -> AppResult<()> {
        (self)(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn closure_is_a_job() {
        let count = Arc::new(AtomicUsize::new(0));
        let captured = Arc::clone(&count);
        let job = move |n: usize| {
            let captured = Arc::clone(&captured);
            async move {
                captured.fetch_add(n, Ordering::SeqCst);
                anyhow::Ok(())
            }
        };
        job.run(3).await.unwrap();
        job.run(4).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn job_error_propagates() {
        let job = |(): ()| async { Err(anyhow::anyhow!("boom")) };
        let err = job.run(()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
