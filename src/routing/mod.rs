//! Literal route compilation and dispatch.
//!
//! Routes are compiled once at startup into an [`Automaton`]; a
//! [`Dispatcher`] then resolves each request path by walking it byte by byte.
//!
//! ```
//! use crest::routing::{Dispatcher, Route, compile};
//!
//! let automaton = compile(&[
//!     Route::new("show", "/books"),
//!     Route::new("create", "/books/new"),
//!     Route::new("index", "/"),
//! ])
//! .unwrap();
//! let dispatcher = Dispatcher::new(automaton);
//!
//! assert_eq!(dispatcher.dispatch("/books/new").unwrap().as_str(), "create");
//! assert!(dispatcher.dispatch("/missing").is_none());
//! ```

pub mod automaton;
pub mod codegen;
pub mod compiler;
pub mod dispatcher;
pub mod handler;
pub mod route;
pub mod router;

pub use automaton::{Automaton, HandlerId, Label, NodeId, NodeKind};
pub use compiler::{compile, compile_source};
pub use dispatcher::Dispatcher;
pub use handler::{Handler, HandlerTable};
pub use route::{Route, parse_routes};
pub use router::Router;
