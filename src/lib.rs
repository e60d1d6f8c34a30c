#![cfg_attr(feature = "no_std", no_std)]

//! Declarative component classes for virtual-DOM render hosts, with `no_std` support.
//!
//! Describe a component once as a [`Definition`] (a view plus an optional
//! controller and hooks), turn it into a [`ComponentClass`] with a
//! [`ComponentFactory`], and instantiate the class at every usage site. The
//! host mounts each [`Component`], runs its controller once and its view on
//! every render.
//!
//! Controllers return an [`Awaitable`]: a ready value becomes the component
//! state immediately, a deferred value holds the host's pending-work counter
//! until it settles.
//!
//! ## Example
//!
//! ```rust
//! use oxide_component::{
//!     Awaitable, Component, ComponentFactory, Definition, RenderHost, SpawnedFuture,
//! };
//! use serde_json::json;
//!
//! struct MyHost;
//!
//! impl RenderHost for MyHost {
//!     type Mounted = Component<Self>;
//!
//!     fn mount_component(&self, component: Component<Self>) -> Self::Mounted {
//!         component
//!     }
//!
//!     fn request_redraw(&self, _force_sync: bool) {}
//!     fn begin_pending_work(&self) {}
//!     fn end_pending_work(&self) {}
//! }
//!
//! // Create a spawner for your async runtime
//! let spawner = |_future: SpawnedFuture| {
//!     // Spawn the future on your chosen runtime
//!     // e.g., tokio::spawn(future); or async_std::task::spawn(future);
//! };
//!
//! let factory = ComponentFactory::new(MyHost, spawner);
//!
//! let list_item = factory
//!     .create_component(
//!         Definition::<MyHost>::new()
//!             .controller(|_, _, children| {
//!                 Ok(Awaitable::ready(json!({ "count": children.len() })))
//!             })
//!             .view(|context| {
//!                 json!({
//!                     "tag": "li",
//!                     "attrs": context.prop("attr").cloned(),
//!                     "children": context.children(),
//!                     "count": context.state()["count"].clone(),
//!                 })
//!             }),
//!     )
//!     .unwrap();
//!
//! let item = list_item
//!     .instance_with(Some(json!({ "attr": { "className": "list-item" } })), json!("#1"))
//!     .unwrap();
//! item.controller().unwrap();
//!
//! assert_eq!(item.view()["children"], json!(["#1"]));
//! assert_eq!(item.view()["count"], json!(1));
//! ```

#[cfg(feature = "no_std")]
extern crate alloc;

// Module declarations
mod awaitable;
mod component;
mod definition;
mod error;
mod factory;
mod host;
mod normalize;
mod setter;
mod spawner;

// Public re-exports
pub use awaitable::{Awaitable, DeferredResult, Resolver};
pub use component::{Component, ComponentContext};
pub use definition::{ControllerErrorFn, ControllerFn, Definition, IntoDefinition, UnloadFn, ViewFn};
pub use error::{ComponentError, ControllerError, InvalidArgument};
pub use factory::{ComponentClass, ComponentFactory};
pub use host::{PendingWork, RenderHost};
pub use normalize::{is_truthy, normalize_children, validate_props, Children, Props, CHILDREN_KEY};
pub use serde_json::Value;
pub use setter::StateSetter;
pub use spawner::{SpawnedFuture, Spawner};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use host::{HostRecord, TestRenderHost};
#[cfg(any(test, feature = "testing"))]
pub use spawner::{create_test_spawner, test_spawner_fn, QueuedSpawner};
