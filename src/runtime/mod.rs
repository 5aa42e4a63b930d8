//! Host scheduler adapters.

pub mod tokio_spawner;

use std::future::Future;

pub use tokio_spawner::TokioSpawner;

/// Abstraction for handing detached work to the host scheduler.
pub trait Spawn {
    /// Spawn a future that runs to completion independently of the caller.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
