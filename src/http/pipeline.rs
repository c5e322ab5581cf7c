//! Ordered request-interceptor pipeline.
//!
//! A [`Chain`] is a fixed list of interceptors, outermost first. Wrapping a
//! route with it yields:
//!
//! ```text
//! request → chain[0] → chain[1] → ... → handler
//! response ← chain[0] ← chain[1] ← ... ← handler
//! ```

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use futures_util::future::BoxFuture;

/// One step of the pipeline. Either answers the request itself or delegates
/// to `next`, possibly acting before and after.
pub trait Interceptor: Send + Sync + 'static {
    fn handle<'a>(&'a self, request: Request, next: Next) -> BoxFuture<'a, Response>;
}

/// Ordered interceptor list, outermost first.
#[derive(Clone, Default)]
pub struct Chain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor inside every one already in the chain.
    pub fn then(mut self, interceptor: impl Interceptor) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Wrap one route's handler with the whole chain.
    pub fn wrap<S>(&self, route: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // Each `layer` call becomes the new outermost layer, so apply innermost first.
        self.interceptors.iter().rev().fold(route, |route, interceptor| {
            let interceptor = Arc::clone(interceptor);
            route.layer(middleware::from_fn(move |request: Request, next: Next| {
                let interceptor = Arc::clone(&interceptor);
                async move { interceptor.handle(request, next).await }
            }))
        })
    }
}
