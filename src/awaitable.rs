//! Controller results that are either available now or settle later.

#[cfg(feature = "no_std")]
use alloc::boxed::Box;

use core::future::Future;
use core::pin::Pin;

use flume::Sender;
use serde_json::Value;

use crate::ControllerError;

/// A deferred controller result.
pub type DeferredResult = Pin<Box<dyn Future<Output = Result<Value, ControllerError>> + Send>>;

/// What a controller hands back to the lifecycle bridge.
///
/// A [`Ready`](Awaitable::Ready) value becomes the component state straight
/// away (when truthy). A [`Deferred`](Awaitable::Deferred) value holds the
/// render host's pending-work counter until it settles.
///
/// # Example
///
/// ```rust
/// use oxide_component::Awaitable;
/// use serde_json::json;
///
/// // Known up front
/// let ready = Awaitable::ready(json!({ "film": "Princess Mononoke" }));
/// assert!(!ready.is_deferred());
///
/// // Computed elsewhere
/// let deferred = Awaitable::deferred(async { Ok(json!({ "film": "Porco Rosso" })) });
/// assert!(deferred.is_deferred());
///
/// // Settled by hand through a resolver
/// let (resolver, pending) = Awaitable::pending();
/// resolver.resolve(json!({ "film": "Kiki's Delivery Service" }));
/// assert!(pending.is_deferred());
/// ```
pub enum Awaitable {
    Ready(Value),
    Deferred(DeferredResult),
}

impl Awaitable {
    /// A result available now.
    pub fn ready(value: impl Into<Value>) -> Self {
        Self::Ready(value.into())
    }

    /// A ready result that leaves state untouched.
    pub fn empty() -> Self {
        Self::Ready(Value::Null)
    }

    /// A result produced by `future` once it completes.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, ControllerError>> + Send + 'static,
    {
        Self::Deferred(Box::pin(future))
    }

    /// A deferred result settled through the returned [`Resolver`].
    ///
    /// Dropping the resolver without settling rejects the result, so the
    /// host's pending-work counter is always released.
    pub fn pending() -> (Resolver, Self) {
        let (sender, receiver) = flume::bounded(1);

        let settled = async move {
            match receiver.recv_async().await {
                Ok(outcome) => outcome,
                Err(_) => Err(ControllerError::new(
                    "deferred result was dropped before settling",
                )),
            }
        };

        (Resolver(sender), Self::deferred(settled))
    }

    /// Whether the result will settle later.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<Value> for Awaitable {
    fn from(value: Value) -> Self {
        Self::Ready(value)
    }
}

/// Settles the result created by [`Awaitable::pending`].
///
/// Consumed on use, so a result settles at most once.
pub struct Resolver(Sender<Result<Value, ControllerError>>);

impl Resolver {
    /// Settle with a value, which becomes the state when truthy.
    pub fn resolve(self, value: impl Into<Value>) {
        self.0.send(Ok(value.into())).ok();
    }

    /// Settle with a failure, reported to the error hook if present.
    pub fn reject(self, error: ControllerError) {
        self.0.send(Err(error)).ok();
    }
}
