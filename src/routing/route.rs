//! Route definitions and the route source format.
//!
//! One route per line, `handler_identifier <whitespace> /literal/path`.
//! Blank lines are skipped.

use crate::error::CompileError;
use crate::routing::automaton::HandlerId;

/// A literal path bound to a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub handler: HandlerId,
    pub path: String,
    /// 1-based source line, or 0 for routes built in code.
    pub line: usize,
}

impl Route {
    pub fn new(handler: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            handler: HandlerId::new(handler),
            path: path.into(),
            line: 0,
        }
    }
}

/// Parses a complete route source. The first malformed line aborts parsing.
pub fn parse_routes(source: &str) -> Result<Vec<Route>, CompileError> {
    let mut routes = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        routes.push(parse_route_line(raw, line)?);
    }
    Ok(routes)
}

fn parse_route_line(raw: &str, line: usize) -> Result<Route, CompileError> {
    let invalid = |reason| CompileError::InvalidRouteSyntax { line, reason };

    let mut fields = raw.split_whitespace();
    let handler = fields.next().ok_or_else(|| invalid("expected a handler name"))?;
    let path = fields
        .next()
        .ok_or_else(|| invalid("expected a path after the handler name"))?;

    check_handler_name(handler).map_err(invalid)?;
    if !path.starts_with('/') {
        return Err(invalid("path must start with '/'"));
    }
    if fields.next().is_some() {
        return Err(invalid("unexpected text after the path"));
    }

    Ok(Route {
        handler: HandlerId::new(handler),
        path: path.to_string(),
        line,
    })
}

/// Names that are identifiers lexically but cannot be used as a method name,
/// not even in raw `r#` form.
const UNUSABLE_NAMES: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Rejects handler names that generated code could not declare as a method.
pub(crate) fn check_handler_name(name: &str) -> Result<(), &'static str> {
    if !is_identifier(name) {
        return Err("handler name must be an identifier");
    }
    if UNUSABLE_NAMES.contains(&name) {
        return Err("handler name is reserved and cannot be a method name");
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
