//! Component definitions: the view, controller and hooks supplied once per component.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;

use serde_json::Value;

use crate::{
    Awaitable, ComponentContext, ComponentError, ControllerError, InvalidArgument, Props,
    RenderHost,
};

/// Renders a component from its context.
pub type ViewFn<H> = dyn Fn(&ComponentContext<H>) -> Value + Send + Sync;

/// Initializes component state from `(props, children)`.
pub type ControllerFn<H> =
    dyn Fn(&ComponentContext<H>, &Props, &[Value]) -> Result<Awaitable, ControllerError>
        + Send
        + Sync;

/// Receives the failure of a deferred controller result.
pub type ControllerErrorFn = dyn Fn(ControllerError) + Send + Sync;

/// Runs when the host tears a component down.
pub type UnloadFn<H> = dyn Fn(&ComponentContext<H>) + Send + Sync;

/// Declarative description of a component.
///
/// Only [`view`](Self::view) is required; passing a definition without one to
/// [`ComponentFactory::create_component`](crate::ComponentFactory::create_component)
/// fails with [`InvalidArgument::MissingView`].
///
/// # Example
///
/// ```rust
/// use oxide_component::{Awaitable, Definition, TestRenderHost};
/// use serde_json::json;
///
/// let movie = Definition::<TestRenderHost>::new()
///     .controller(|_, props, _children| {
///         Ok(Awaitable::ready(json!({ "film": props.get("film").cloned() })))
///     })
///     .view(|context| context.state()["film"].clone());
/// ```
pub struct Definition<H: RenderHost> {
    pub(crate) view: Option<Box<ViewFn<H>>>,
    pub(crate) controller: Option<Box<ControllerFn<H>>>,
    pub(crate) on_controller_error: Option<Box<ControllerErrorFn>>,
    pub(crate) on_unload: Option<Box<UnloadFn<H>>>,
}

impl<H: RenderHost> Default for Definition<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RenderHost> Definition<H> {
    /// An empty definition; add at least a view before creating a class.
    pub fn new() -> Self {
        Self {
            view: None,
            controller: None,
            on_controller_error: None,
            on_unload: None,
        }
    }

    /// Set the view, run on every render.
    pub fn view<F>(mut self, view: F) -> Self
    where
        F: Fn(&ComponentContext<H>) -> Value + Send + Sync + 'static,
    {
        self.view = Some(Box::new(view));
        self
    }

    /// Set the controller, run once before the first render.
    pub fn controller<F>(mut self, controller: F) -> Self
    where
        F: Fn(&ComponentContext<H>, &Props, &[Value]) -> Result<Awaitable, ControllerError>
            + Send
            + Sync
            + 'static,
    {
        self.controller = Some(Box::new(controller));
        self
    }

    /// Hook receiving rejections of deferred controller results.
    ///
    /// Without it such rejections are discarded.
    pub fn on_controller_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(ControllerError) + Send + Sync + 'static,
    {
        self.on_controller_error = Some(Box::new(hook));
        self
    }

    /// Hook run when the host tears a component down.
    pub fn on_unload<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ComponentContext<H>) + Send + Sync + 'static,
    {
        self.on_unload = Some(Box::new(hook));
        self
    }

    /// Whether a view has been set.
    pub fn has_view(&self) -> bool {
        self.view.is_some()
    }
}

/// Arguments accepted by
/// [`ComponentFactory::create_component`](crate::ComponentFactory::create_component).
///
/// Besides a [`Definition`], the factory accepts the loosely shaped calls a
/// dynamic caller can make: `()` or `None` for a missing argument, and a raw
/// [`Value`]. A raw object carries no callable view, so it converts into an
/// empty definition that construction then rejects.
pub trait IntoDefinition<H: RenderHost> {
    fn into_definition(self) -> Result<Definition<H>, ComponentError>;
}

impl<H: RenderHost> IntoDefinition<H> for Definition<H> {
    fn into_definition(self) -> Result<Definition<H>, ComponentError> {
        Ok(self)
    }
}

impl<H: RenderHost> IntoDefinition<H> for Option<Definition<H>> {
    fn into_definition(self) -> Result<Definition<H>, ComponentError> {
        self.ok_or_else(|| InvalidArgument::MissingArgument.into())
    }
}

impl<H: RenderHost> IntoDefinition<H> for () {
    fn into_definition(self) -> Result<Definition<H>, ComponentError> {
        Err(InvalidArgument::MissingArgument.into())
    }
}

impl<H: RenderHost> IntoDefinition<H> for Value {
    fn into_definition(self) -> Result<Definition<H>, ComponentError> {
        match self {
            Value::Object(_) => Ok(Definition::new()),
            _ => Err(InvalidArgument::NotAnObject.into()),
        }
    }
}
