//! HTTP/1.x request head handling.
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`buffer`**: per-connection read buffer that yields CRLF-terminated lines
//! - **`parser`**: request line and header line parsing on top of the buffer
//! - **`request`**: the parsed request head
//! - **`response`**: response accumulation
//! - **`writer`**: serializes and writes responses to the client
//! - **`connection`**: the per-client request/response loop
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Pull lines until the blank line
//!        └──────┬──────┘
//!               │ Head parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch path, run handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod buffer;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
