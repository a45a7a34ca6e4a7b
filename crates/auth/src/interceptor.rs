//! Ordered request interceptors.
//!
//! Interceptors run after authentication, in registration order, each seeing the
//! request as left by the previous one.

use core::fmt;
use std::sync::Arc;

use crate::request::OutgoingRequest;

/// A user-supplied request mutation.
pub type Interceptor = Arc<dyn Fn(&mut OutgoingRequest) + Send + Sync>;

#[derive(Clone, Default)]
pub struct InterceptorPipeline {
    interceptors: Vec<Interceptor>,
}

impl InterceptorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<F>(&mut self, interceptor: F)
    where
        F: Fn(&mut OutgoingRequest) + Send + Sync + 'static,
    {
        self.interceptors.push(Arc::new(interceptor));
    }

    pub fn with<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&mut OutgoingRequest) + Send + Sync + 'static,
    {
        self.push(interceptor);
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run every interceptor against `request`, in order.
    pub fn apply(&self, request: &mut OutgoingRequest) {
        for interceptor in &self.interceptors {
            interceptor(request);
        }
        tracing::trace!(count = self.interceptors.len(), uri = %request.uri, "interceptors applied");
    }
}

impl fmt::Debug for InterceptorPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorPipeline")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

/// Interceptor that sets `name: value` unless the request already carries `name`.
pub fn default_header(
    name: impl Into<String>,
    value: impl Into<String>,
) -> impl Fn(&mut OutgoingRequest) + Send + Sync + 'static {
    let name = name.into();
    let value = value.into();
    move |request: &mut OutgoingRequest| {
        if request.header(&name).is_none() {
            request.set_header(&name, &value);
        }
    }
}
