//! Request handlers and the table that binds them to handler ids.

use std::collections::HashMap;
use std::sync::Arc;

use crate::http::request::ParsedRequest;
use crate::http::response::Response;
use crate::routing::automaton::HandlerId;

/// Something that can answer a matched request.
///
/// Implemented for any `Fn(&ParsedRequest, &mut Response)`, so plain
/// functions and closures can be registered directly.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: &ParsedRequest, response: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&ParsedRequest, &mut Response) + Send + Sync + 'static,
{
    fn call(&self, request: &ParsedRequest, response: &mut Response) {
        self(request, response)
    }
}

pub type BoxedHandler = Arc<dyn Handler>;

/// Handler implementations keyed by the id routes refer to.
#[derive(Default, Clone)]
pub struct HandlerTable {
    handlers: HashMap<HandlerId, BoxedHandler>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `id`, replacing any earlier binding. Returns `self`
    /// for chaining.
    pub fn on(mut self, id: impl Into<String>, handler: impl Handler) -> Self {
        self.insert(HandlerId::new(id), handler);
        self
    }

    pub fn insert(&mut self, id: HandlerId, handler: impl Handler) {
        self.handlers.insert(id, Arc::new(handler));
    }

    pub fn get(&self, id: &HandlerId) -> Option<&BoxedHandler> {
        self.handlers.get(id)
    }

    pub fn contains(&self, id: &HandlerId) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
