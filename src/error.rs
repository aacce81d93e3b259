//! Error taxonomy for reading, parsing and route compilation.
//!
//! A dispatch miss is not an error; [`crate::routing::Dispatcher::dispatch`]
//! returns `None` for it.

use std::io;

use thiserror::Error;

/// Failures while pulling a line out of the socket.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The peer closed the connection (a read returned zero bytes).
    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// The unterminated line reached the configured maximum.
    #[error("line exceeds {max} bytes")]
    LineTooLong { max: usize },

    /// The request head, counted from its first byte, grew past the cap.
    #[error("request head exceeds {max} bytes")]
    HeadTooLarge { max: usize },
}

/// Failures while interpreting a request line or header line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown method")]
    UnknownMethod,

    #[error("malformed uri")]
    MalformedUri,

    #[error("malformed http version")]
    MalformedVersion,

    #[error("malformed header line")]
    MalformedHeader,
}

/// Anything that stops a request head from being read.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failures while turning a route set into an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("the route set is empty")]
    EmptyInput,

    #[error("line {line}: {reason}")]
    InvalidRouteSyntax { line: usize, reason: &'static str },

    #[error("duplicate route {path}: bound to both `{first}` and `{second}`")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },
}
