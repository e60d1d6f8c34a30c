//! Render host abstraction for mounting components and scheduling redraws.

#[cfg(all(any(test, feature = "testing"), feature = "no_std"))]
use alloc::vec::Vec;

#[cfg(any(test, feature = "testing"))]
use portable_atomic_util::Arc;
#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

use crate::Component;

/// The virtual-DOM library a component is mounted into.
///
/// Implement this trait to integrate oxide-component with your rendering
/// system. The host owns the redraw schedule and the pending-work counter;
/// components only ever call the methods below.
///
/// # Example
///
/// ```rust
/// use oxide_component::{Component, PendingWork, RenderHost};
/// use spin::Mutex;
///
/// struct ConsoleHost {
///     pending: Mutex<PendingWork>,
/// }
///
/// impl RenderHost for ConsoleHost {
///     type Mounted = Component<Self>;
///
///     fn mount_component(&self, component: Component<Self>) -> Self::Mounted {
///         component
///     }
///
///     fn request_redraw(&self, force_sync: bool) {
///         if self.pending.lock().is_idle() {
///             println!("redraw (sync: {force_sync})");
///         }
///     }
///
///     fn begin_pending_work(&self) {
///         self.pending.lock().begin();
///     }
///
///     fn end_pending_work(&self) {
///         self.pending.lock().end();
///     }
/// }
/// ```
pub trait RenderHost: Send + Sync + Sized + 'static {
    /// Whatever the host recognizes as a mountable unit.
    type Mounted;

    /// Wrap a freshly instantiated component for mounting.
    fn mount_component(&self, component: Component<Self>) -> Self::Mounted;

    /// Schedule, or with `force_sync` perform, a redraw pass.
    fn request_redraw(&self, force_sync: bool);

    /// A render-blocking computation has started.
    fn begin_pending_work(&self);

    /// A render-blocking computation has finished.
    fn end_pending_work(&self);
}

/// Pending-work counter a host can embed to back
/// [`begin_pending_work`](RenderHost::begin_pending_work) and
/// [`end_pending_work`](RenderHost::end_pending_work).
///
/// Rendering should be deferred while the counter is nonzero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingWork {
    outstanding: usize,
}

impl PendingWork {
    /// An idle counter.
    pub const fn new() -> Self {
        Self { outstanding: 0 }
    }

    /// Record one more render-blocking computation.
    pub fn begin(&mut self) {
        self.outstanding += 1;
    }

    /// Saturates at zero.
    pub fn end(&mut self) {
        match self.outstanding.checked_sub(1) {
            Some(outstanding) => self.outstanding = outstanding,
            None => log::warn!("pending work ended without a matching begin"),
        }
    }

    /// Number of computations still running.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Whether rendering may proceed.
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0
    }
}

#[cfg(any(test, feature = "testing"))]
/// Everything a [`TestRenderHost`] has been asked to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub mounts: usize,
    pub redraws: Vec<bool>,
    pub pending: PendingWork,
    pub begun: usize,
    pub ended: usize,
}

#[cfg(any(test, feature = "testing"))]
/// Test host that records every interaction for assertions.
///
/// Only available with the `testing` feature.
///
/// Mounting returns the [`Component`] itself, so tests can drive its
/// controller and view directly.
///
/// # Example
///
/// ```rust
/// use oxide_component::{create_test_spawner, ComponentFactory, Definition, TestRenderHost};
/// use serde_json::json;
///
/// let host = TestRenderHost::new();
/// let factory = ComponentFactory::new(host.clone(), create_test_spawner());
///
/// let class = factory
///     .create_component(Definition::<TestRenderHost>::new().view(|_| json!("hello")))
///     .unwrap();
/// let component = class.instance().unwrap();
/// component.set_state(json!({ "seen": true }));
///
/// assert_eq!(host.mount_count(), 1);
/// assert_eq!(host.redraw_requests(), vec![true]);
/// ```
pub struct TestRenderHost {
    record: Arc<Mutex<HostRecord>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for TestRenderHost {
    fn clone(&self) -> Self {
        Self {
            record: self.record.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for TestRenderHost {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl TestRenderHost {
    pub fn new() -> Self {
        Self {
            record: Arc::new(Mutex::new(HostRecord::default())),
        }
    }

    /// Number of components mounted so far.
    pub fn mount_count(&self) -> usize {
        self.record.lock().mounts
    }

    /// The `force_sync` flag of every redraw requested so far.
    pub fn redraw_requests(&self) -> Vec<bool> {
        self.record.lock().redraws.clone()
    }

    /// Current value of the pending-work counter.
    pub fn pending_work(&self) -> usize {
        self.record.lock().pending.outstanding()
    }

    /// Access the full record with a closure.
    pub fn with_record<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HostRecord) -> R,
    {
        let record = self.record.lock();
        f(&record)
    }
}

#[cfg(any(test, feature = "testing"))]
impl RenderHost for TestRenderHost {
    type Mounted = Component<Self>;

    fn mount_component(&self, component: Component<Self>) -> Self::Mounted {
        self.record.lock().mounts += 1;
        component
    }

    fn request_redraw(&self, force_sync: bool) {
        self.record.lock().redraws.push(force_sync);
    }

    fn begin_pending_work(&self) {
        let mut record = self.record.lock();
        record.begun += 1;
        record.pending.begin();
    }

    fn end_pending_work(&self) {
        let mut record = self.record.lock();
        record.ended += 1;
        record.pending.end();
    }
}
