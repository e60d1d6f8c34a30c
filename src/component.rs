//! Mounted components and the lifecycle bridge around their controller.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;
#[cfg(feature = "no_std")]
use alloc::vec::Vec;

use portable_atomic_util::Arc;
use serde_json::{Map, Value};
use spin::Mutex;

use crate::awaitable::DeferredResult;
use crate::factory::Blueprint;
use crate::normalize::{is_truthy, normalize_children, resolve_props};
use crate::spawner::SharedSpawner;
use crate::{Awaitable, Children, ComponentError, Props, RenderHost, StateSetter, CHILDREN_KEY};

/// Per-mount record of what the controller and view see.
pub(crate) struct MountState {
    pub(crate) props: Props,
    pub(crate) state: Value,
    pub(crate) pending: usize,
}

impl MountState {
    pub(crate) fn new(props: Props) -> Self {
        Self {
            props,
            state: Value::Object(Map::new()),
            pending: 0,
        }
    }
}

/// Snapshot of a component handed to its controller, view and hooks.
///
/// Taken when the call starts; a state change made while the call runs is
/// not visible through the snapshot.
pub struct ComponentContext<H: RenderHost> {
    props: Props,
    state: Value,
    setter: StateSetter<H>,
}

impl<H: RenderHost> ComponentContext<H> {
    /// Props as they stood when the call started, children included.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// A single prop, `None` when absent.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Normalized children, empty when none were supplied.
    pub fn children(&self) -> &[Value] {
        match self.props.get(CHILDREN_KEY) {
            Some(Value::Array(children)) => children.as_slice(),
            _ => &[],
        }
    }

    /// State as it stood when the call started.
    pub fn state(&self) -> &Value {
        &self.state
    }

    /// See [`StateSetter::set`].
    pub fn set_state(&self, state: Value) {
        self.setter.set(state);
    }

    /// A handle for replacing the state after this call returns.
    pub fn state_setter(&self) -> StateSetter<H> {
        self.setter.clone()
    }
}

/// A component instantiated at one usage site.
///
/// Produced by [`ComponentClass::instance_with`](crate::ComponentClass::instance_with)
/// and handed to [`RenderHost::mount_component`]. The host runs
/// [`controller_with`](Self::controller_with) once before the first render and
/// [`view`](Self::view) on every render.
pub struct Component<H: RenderHost> {
    blueprint: Arc<Blueprint<H>>,
    mount: Arc<Mutex<MountState>>,
    host: Arc<H>,
    spawner: Arc<SharedSpawner>,
    render_depth: RenderDepth,
}

impl<H: RenderHost> Clone for Component<H> {
    fn clone(&self) -> Self {
        Self {
            blueprint: self.blueprint.clone(),
            mount: self.mount.clone(),
            host: self.host.clone(),
            spawner: self.spawner.clone(),
            render_depth: self.render_depth.clone(),
        }
    }
}

impl<H: RenderHost> Component<H> {
    pub(crate) fn new(
        blueprint: Arc<Blueprint<H>>,
        props: Props,
        host: Arc<H>,
        spawner: Arc<SharedSpawner>,
        render_depth: RenderDepth,
    ) -> Self {
        Self {
            blueprint,
            mount: Arc::new(Mutex::new(MountState::new(props))),
            host,
            spawner,
            render_depth,
        }
    }

    /// Current props, children included.
    pub fn props(&self) -> Props {
        self.mount.lock().props.clone()
    }

    /// Current state.
    pub fn state(&self) -> Value {
        self.mount.lock().state.clone()
    }

    /// Current normalized children.
    pub fn children(&self) -> Vec<Value> {
        match self.mount.lock().props.get(CHILDREN_KEY) {
            Some(Value::Array(children)) => children.clone(),
            _ => Vec::new(),
        }
    }

    /// Whether a deferred controller result of this component is outstanding.
    pub fn is_pending(&self) -> bool {
        self.mount.lock().pending > 0
    }

    /// Run the controller with the component's current props and children.
    pub fn controller(&self) -> Result<Value, ComponentError> {
        self.controller_with(None, Children::Absent)
    }

    /// Run the controller and absorb its result into the component state.
    ///
    /// Supplied props replace the stored ones; supplied children replace the
    /// stored children. A ready result becomes the state when truthy and the
    /// resulting state is returned. A deferred result holds the host's
    /// pending-work counter until it settles, and the state as it stands
    /// when this call returns is returned.
    ///
    /// An error returned by the user controller is propagated unchanged.
    pub fn controller_with(
        &self,
        props: Option<Value>,
        children: impl Into<Children>,
    ) -> Result<Value, ComponentError> {
        let props = resolve_props(props)?;

        let children: Children = children.into();
        let children = if children.is_absent() {
            let mount = self.mount.lock();
            let stored = props.as_ref().unwrap_or(&mount.props);
            Children::from(stored.get(CHILDREN_KEY).cloned())
        } else {
            children
        };
        let children = normalize_children(children);

        let context = {
            let mut mount = self.mount.lock();
            if let Some(props) = props {
                mount.props = props;
            }
            mount
                .props
                .insert(CHILDREN_KEY.into(), Value::Array(children));
            self.blueprint.remember_props(&mount.props);
            self.context(&mount)
        };

        let result = match &self.blueprint.controller {
            Some(controller) => controller(&context, context.props(), context.children())?,
            None => Awaitable::empty(),
        };

        match result {
            Awaitable::Ready(value) => {
                let mut mount = self.mount.lock();
                if is_truthy(&value) {
                    mount.state = value;
                }
                Ok(mount.state.clone())
            }
            Awaitable::Deferred(deferred) => {
                self.settle_later(deferred);
                Ok(self.state())
            }
        }
    }

    fn settle_later(&self, deferred: DeferredResult) {
        self.host.begin_pending_work();
        self.mount.lock().pending += 1;
        log::trace!("controller result deferred, pending work started");

        let release = PendingRelease {
            mount: self.mount.clone(),
            host: self.host.clone(),
        };
        let blueprint = self.blueprint.clone();
        let mount = self.mount.clone();

        let settle = async move {
            // Released on completion, or when the spawner drops the task.
            let _release = release;

            match deferred.await {
                Ok(value) => {
                    if is_truthy(&value) {
                        mount.lock().state = value;
                    }
                }
                Err(error) => match &blueprint.on_controller_error {
                    Some(hook) => hook(error),
                    None => log::debug!("discarding rejected controller result: {error}"),
                },
            }
            log::trace!("deferred controller result settled");
        };

        self.spawner.spawn(Box::pin(settle));
    }

    /// Render the component from a snapshot of its props and state.
    pub fn view(&self) -> Value {
        let context = {
            let mount = self.mount.lock();
            self.context(&mount)
        };
        *self.render_depth.lock() += 1;
        let _pass = RenderPass(&self.render_depth);

        (self.blueprint.view)(&context)
    }

    /// Replace the state and request a redraw. See [`StateSetter::set`].
    pub fn set_state(&self, state: Value) {
        self.state_setter().set(state);
    }

    /// A cloneable handle replacing this component's state.
    pub fn state_setter(&self) -> StateSetter<H> {
        StateSetter::new(
            self.mount.clone(),
            self.host.clone(),
            self.render_depth.clone(),
        )
    }

    /// Run the definition's unload hook, if any.
    pub fn unload(&self) {
        if let Some(hook) = &self.blueprint.on_unload {
            let context = {
                let mount = self.mount.lock();
                self.context(&mount)
            };
            hook(&context);
        }
    }

    fn context(&self, mount: &MountState) -> ComponentContext<H> {
        ComponentContext {
            props: mount.props.clone(),
            state: mount.state.clone(),
            setter: self.state_setter(),
        }
    }
}

/// Number of view passes in progress across every component of a factory.
pub(crate) type RenderDepth = Arc<Mutex<usize>>;

/// Marks a view pass as finished when dropped, even if the view panics.
struct RenderPass<'a>(&'a Mutex<usize>);

impl Drop for RenderPass<'_> {
    fn drop(&mut self) {
        let mut depth = self.0.lock();
        *depth = depth.saturating_sub(1);
    }
}

/// Releases the host's pending work for one deferred controller result.
///
/// Dropped exactly once per deferred result: when the settle task finishes,
/// or when the spawner discards it unpolled.
struct PendingRelease<H: RenderHost> {
    mount: Arc<Mutex<MountState>>,
    host: Arc<H>,
}

impl<H: RenderHost> Drop for PendingRelease<H> {
    fn drop(&mut self) {
        {
            let mut mount = self.mount.lock();
            mount.pending = mount.pending.saturating_sub(1);
        }
        self.host.end_pending_work();
    }
}
