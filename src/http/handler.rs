//! Route handlers.
//!
//! The API's endpoints are plain `async fn(Request) -> T` items or closures
//! over `Arc<AppState>`. Registering one turns it into a [`BoxedHandler`]: a
//! shared closure that runs the endpoint and converts whatever it returned
//! into a [`Response`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::request::Request;
use super::response::{IntoResponse, Response};

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// What the router stores and every connection task calls.
pub(crate) type BoxedHandler = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync>;

/// An endpoint the [`Router`](super::Router) can serve.
///
/// Any `Fn(Request) -> impl Future<Output = impl IntoResponse>` that is
/// `Send + Sync + 'static` qualifies.
pub trait Handler: Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(move |req: Request| -> BoxFuture {
            let pending = (self)(req);
            Box::pin(async move { pending.await.into_response() })
        })
    }
}
