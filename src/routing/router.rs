use crate::http::request::ParsedRequest;
use crate::http::response::{Response, StatusCode};
use crate::routing::dispatcher::Dispatcher;
use crate::routing::handler::HandlerTable;

/// Pairs the compiled dispatcher with the handler implementations.
///
/// Build it once at startup and share it behind an `Arc`.
pub struct Router {
    dispatcher: Dispatcher,
    handlers: HandlerTable,
}

impl Router {
    pub fn new(dispatcher: Dispatcher, handlers: HandlerTable) -> Self {
        for id in dispatcher.automaton().handlers() {
            if !handlers.contains(id) {
                tracing::warn!(handler = %id, "Route bound to a handler that is not registered");
            }
        }
        Self {
            dispatcher,
            handlers,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Runs the handler matching the request path and returns its response.
    ///
    /// A miss yields 404; a matched id without an implementation yields 500.
    pub fn handle(&self, request: &ParsedRequest) -> Response {
        let Some(id) = self.dispatcher.dispatch(request.path()) else {
            tracing::debug!(uri = %request.uri_lossy(), "No route matched");
            return Response::not_found();
        };

        let Some(handler) = self.handlers.get(id) else {
            tracing::error!(handler = %id, uri = %request.uri_lossy(), "No handler registered");
            return Response::internal_error();
        };

        tracing::debug!(
            method = %request.method,
            uri = %request.uri_lossy(),
            handler = %id,
            "Dispatching request"
        );
        let mut response = Response::new(StatusCode::Ok);
        handler.call(request, &mut response);
        response
    }
}
