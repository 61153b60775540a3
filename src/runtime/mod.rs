//! Runtime adapters for spawning chain tasks.

use std::future::Future;

#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;

#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;

/// Abstraction over the async runtime's task spawner.
///
/// The scheduler spawns one task per chain through this trait, keeping the
/// core logic independent of any particular runtime.
pub trait Spawn {
    /// Spawn an async task.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
