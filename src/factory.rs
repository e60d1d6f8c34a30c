//! The component factory and the component classes it produces.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;

use portable_atomic_util::Arc;
use serde_json::Value;
use spin::Mutex;

use crate::component::RenderDepth;
use crate::definition::{ControllerErrorFn, ControllerFn, UnloadFn, ViewFn};
use crate::normalize::{normalize_children, resolve_props};
use crate::spawner::SharedSpawner;
use crate::{
    Children, Component, ComponentError, InvalidArgument, IntoDefinition, Props, RenderHost,
    Spawner, CHILDREN_KEY,
};

/// A validated definition shared by every component of one class.
pub(crate) struct Blueprint<H: RenderHost> {
    pub(crate) view: Box<ViewFn<H>>,
    pub(crate) controller: Option<Box<ControllerFn<H>>>,
    pub(crate) on_controller_error: Option<Box<ControllerErrorFn>>,
    pub(crate) on_unload: Option<Box<UnloadFn<H>>>,
    last_props: Mutex<Props>,
}

impl<H: RenderHost> Blueprint<H> {
    pub(crate) fn remember_props(&self, props: &Props) {
        *self.last_props.lock() = props.clone();
    }

    fn last_props(&self) -> Props {
        self.last_props.lock().clone()
    }
}

/// Entry point turning component definitions into component classes.
///
/// The factory owns the render host and the spawner every component it
/// produces will use.
///
/// # Example
///
/// ```rust
/// use oxide_component::{
///     create_test_spawner, Awaitable, Children, ComponentFactory, Definition, TestRenderHost,
/// };
/// use serde_json::json;
///
/// let factory = ComponentFactory::new(TestRenderHost::new(), create_test_spawner());
///
/// let movie = factory
///     .create_component(
///         Definition::<TestRenderHost>::new()
///             .controller(|_, props, _| {
///                 Ok(Awaitable::ready(json!({ "film": props.get("film").cloned() })))
///             })
///             .view(|context| context.state()["film"].clone()),
///     )
///     .unwrap();
///
/// let component = movie
///     .instance_with(Some(json!({ "film": "Princess Mononoke" })), Children::Absent)
///     .unwrap();
/// component.controller().unwrap();
///
/// assert_eq!(component.view(), json!("Princess Mononoke"));
/// ```
pub struct ComponentFactory<H: RenderHost> {
    host: Arc<H>,
    spawner: Arc<SharedSpawner>,
    render_depth: RenderDepth,
}

impl<H: RenderHost> ComponentFactory<H> {
    /// Create a factory.
    ///
    /// # Arguments
    ///
    /// * `host` - The render host components are mounted into
    /// * `spawner` - Spawner settling deferred controller results on your chosen runtime
    pub fn new<S>(host: H, spawner: S) -> Self
    where
        S: Spawner + Send + Sync + 'static,
    {
        let spawner: SharedSpawner = Box::new(spawner);

        Self {
            host: Arc::new(host),
            spawner: Arc::new(spawner),
            render_depth: Arc::new(Mutex::new(0)),
        }
    }

    /// Turn a definition into a component class.
    ///
    /// Fails with [`InvalidArgument`] when the argument is missing, is not an
    /// object, or lacks a view.
    pub fn create_component<D>(&self, definition: D) -> Result<ComponentClass<H>, ComponentError>
    where
        D: IntoDefinition<H>,
    {
        let definition = definition.into_definition()?;
        let view = definition.view.ok_or(InvalidArgument::MissingView)?;

        let blueprint = Blueprint {
            view,
            controller: definition.controller,
            on_controller_error: definition.on_controller_error,
            on_unload: definition.on_unload,
            last_props: Mutex::new(Props::new()),
        };
        log::debug!(
            "component class created (controller: {}, error hook: {})",
            blueprint.controller.is_some(),
            blueprint.on_controller_error.is_some()
        );

        Ok(ComponentClass {
            blueprint: Arc::new(blueprint),
            host: self.host.clone(),
            spawner: self.spawner.clone(),
            render_depth: self.render_depth.clone(),
        })
    }
}

/// Instantiable component produced by [`ComponentFactory::create_component`].
///
/// Each instantiation yields a fresh [`Component`] with its own state. The
/// class remembers the props of its most recent instantiation (or controller
/// run) and reuses them when an instantiation supplies none.
pub struct ComponentClass<H: RenderHost> {
    blueprint: Arc<Blueprint<H>>,
    host: Arc<H>,
    spawner: Arc<SharedSpawner>,
    render_depth: RenderDepth,
}

impl<H: RenderHost> Clone for ComponentClass<H> {
    fn clone(&self) -> Self {
        Self {
            blueprint: self.blueprint.clone(),
            host: self.host.clone(),
            spawner: self.spawner.clone(),
            render_depth: self.render_depth.clone(),
        }
    }
}

impl<H: RenderHost> ComponentClass<H> {
    /// Instantiate with the remembered props and no children.
    pub fn instance(&self) -> Result<H::Mounted, ComponentError> {
        self.instance_with(None, Children::Absent)
    }

    /// Instantiate for one usage site and hand the result to the host.
    ///
    /// `props` falls back to the class's remembered props when not supplied.
    /// `children` never falls back: omitting it leaves the component with no
    /// children.
    pub fn instance_with(
        &self,
        props: Option<Value>,
        children: impl Into<Children>,
    ) -> Result<H::Mounted, ComponentError> {
        let props = resolve_props(props)?;
        let children = normalize_children(children.into());

        let mut props = props.unwrap_or_else(|| self.blueprint.last_props());
        props.insert(CHILDREN_KEY.into(), Value::Array(children));
        self.blueprint.remember_props(&props);

        let component = Component::new(
            self.blueprint.clone(),
            props,
            self.host.clone(),
            self.spawner.clone(),
            self.render_depth.clone(),
        );
        log::trace!("mounting component instance");

        Ok(self.host.mount_component(component))
    }
}
