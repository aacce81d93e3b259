//! crest - incremental HTTP/1.x head parsing and compiled literal routing
//!
//! Core library: the line reader and head parsers under [`http`], the route
//! compiler and dispatcher under [`routing`].

pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod server;

pub use error::{CompileError, ParseError, ReadError, RequestError};
