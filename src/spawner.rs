//! Execution of deferred controller results.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(all(any(test, feature = "testing"), feature = "no_std"))]
use alloc::vec::Vec;

use core::future::Future;
use core::pin::Pin;

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// A settle task handed to a [`Spawner`].
pub type SpawnedFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A spawner trait for executing futures on an async runtime.
///
/// This abstraction allows you to use whatever concurrency model you want (tokio, async-std,
/// embassy, etc.). The lifecycle bridge spawns one task per deferred controller result; the
/// task updates component state and releases the render host's pending-work counter when it
/// completes or is dropped unfinished.
///
/// Function pointers and closures automatically implement this trait via the blanket
/// implementation.
pub trait Spawner {
    /// Spawn a future on the async runtime.
    fn spawn(&self, future: SpawnedFuture);
}

/// Implement Spawner for any callable type that matches the signature.
///
/// This includes function pointers, closures, and function items.
impl<F> Spawner for F
where
    F: Fn(SpawnedFuture),
{
    fn spawn(&self, future: SpawnedFuture) {
        self(future)
    }
}

pub(crate) type SharedSpawner = Box<dyn Spawner + Send + Sync>;

#[cfg(any(test, feature = "testing"))]
/// Test spawner function that executes futures synchronously.
///
/// This blocks on the future immediately rather than spawning it on an async runtime.
/// Never use it with a result that is settled later on the same thread.
pub fn test_spawner_fn(future: SpawnedFuture) {
    futures::executor::block_on(future);
}

#[cfg(any(test, feature = "testing"))]
/// Creates a test spawner that settles deferred results synchronously.
///
/// Returns a function pointer that can be passed directly to
/// [`ComponentFactory::new`](crate::ComponentFactory::new).
pub fn create_test_spawner() -> fn(SpawnedFuture) {
    test_spawner_fn
}

#[cfg(any(test, feature = "testing"))]
/// Test spawner that holds spawned tasks until asked to run them.
///
/// Only available with the `testing` feature or during tests.
///
/// Use it to observe a component while its deferred controller result is
/// still outstanding, then drive settlement with
/// [`run_until_stalled`](Self::run_until_stalled).
///
/// ```rust
/// use oxide_component::{QueuedSpawner, Spawner};
///
/// let spawner = QueuedSpawner::new();
/// spawner.spawn(Box::pin(async {}));
/// assert_eq!(spawner.queued(), 1);
///
/// assert_eq!(spawner.run_until_stalled(), 1);
/// assert_eq!(spawner.queued(), 0);
/// ```
pub struct QueuedSpawner {
    queue: Arc<Mutex<Vec<SpawnedFuture>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for QueuedSpawner {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for QueuedSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl QueuedSpawner {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of tasks that have not completed yet.
    pub fn queued(&self) -> usize {
        self.queue.lock().len()
    }

    /// Poll queued tasks until none of them makes progress.
    ///
    /// Returns how many tasks completed.
    pub fn run_until_stalled(&self) -> usize {
        use core::task::{Context, Poll};

        let waker = futures::task::noop_waker();
        let mut context = Context::from_waker(&waker);
        let mut completed = 0;

        loop {
            let queued = core::mem::take(&mut *self.queue.lock());
            if queued.is_empty() {
                break;
            }

            let mut progressed = false;
            let mut outstanding = Vec::new();
            for mut task in queued {
                match task.as_mut().poll(&mut context) {
                    Poll::Ready(()) => {
                        completed += 1;
                        progressed = true;
                    }
                    Poll::Pending => outstanding.push(task),
                }
            }

            // Tasks spawned while polling are already queued; keep spawn order.
            let mut queue = self.queue.lock();
            outstanding.append(&mut queue);
            *queue = outstanding;

            if !progressed {
                break;
            }
        }

        completed
    }
}

#[cfg(any(test, feature = "testing"))]
impl Spawner for QueuedSpawner {
    fn spawn(&self, future: SpawnedFuture) {
        self.queue.lock().push(future);
    }
}
