//! State setter for embedding state mutations in view callbacks.

use portable_atomic_util::Arc;
use serde_json::Value;
use spin::Mutex;

use crate::component::{MountState, RenderDepth};
use crate::RenderHost;

/// State setter that can be embedded in view output.
///
/// Clone this handle to create callbacks (click handlers and the like) that
/// replace a component's state when invoked. Every call replaces the state
/// wholesale and asks the render host for a redraw.
///
/// `StateSetter` is `Send + Sync`, so a callback may fire from any thread.
///
/// # Example
///
/// ```rust
/// use oxide_component::{create_test_spawner, ComponentFactory, Definition, TestRenderHost};
/// use serde_json::json;
///
/// let host = TestRenderHost::new();
/// let factory = ComponentFactory::new(host.clone(), create_test_spawner());
/// let counter = factory
///     .create_component(Definition::<TestRenderHost>::new().view(|context| {
///         context.state().get("count").cloned().unwrap_or(json!(0))
///     }))
///     .unwrap()
///     .instance()
///     .unwrap();
///
/// let on_click = {
///     let setter = counter.state_setter();
///     move || setter.set(json!({ "count": 1 }))
/// };
/// on_click();
///
/// assert_eq!(counter.view(), json!(1));
/// ```
pub struct StateSetter<H: RenderHost> {
    mount: Arc<Mutex<MountState>>,
    host: Arc<H>,
    render_depth: RenderDepth,
}

impl<H: RenderHost> Clone for StateSetter<H> {
    fn clone(&self) -> Self {
        Self {
            mount: self.mount.clone(),
            host: self.host.clone(),
            render_depth: self.render_depth.clone(),
        }
    }
}

impl<H: RenderHost> StateSetter<H> {
    pub(crate) fn new(
        mount: Arc<Mutex<MountState>>,
        host: Arc<H>,
        render_depth: RenderDepth,
    ) -> Self {
        Self {
            mount,
            host,
            render_depth,
        }
    }

    /// Replace the state and request a redraw.
    ///
    /// While any view pass of the same factory is running, the redraw is
    /// requested without forcing a synchronous pass.
    pub fn set(&self, state: Value) {
        self.mount.lock().state = state;
        let rendering = *self.render_depth.lock() > 0;

        if rendering {
            log::trace!("state replaced during view pass, deferring redraw");
        }
        self.host.request_redraw(!rendering);
    }
}
