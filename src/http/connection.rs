use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{ReadError, RequestError};
use crate::http::buffer::{BufferLimits, LineReader};
use crate::http::parser::read_request_head;
use crate::http::request::ParsedRequest;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// One client session. Created per accepted socket and dropped when the
/// client is done; nothing in it is shared with other connections.
pub struct Connection<S> {
    reader: LineReader<S>,
    router: Arc<Router>,
    read_timeout: Option<Duration>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(ParsedRequest),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, limits: BufferLimits) -> Self {
        Self {
            reader: LineReader::new(stream, limits),
            router,
            read_timeout: None,
            state: ConnectionState::Reading,
        }
    }

    /// Bounds how long reading one request head may take.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(req) => ConnectionState::Processing(req),
                        Err(RequestError::Read(ReadError::ConnectionClosed)) => {
                            ConnectionState::Closed
                        }
                        Err(RequestError::Read(ReadError::Io(e))) => return Err(e.into()),
                        Err(e) => {
                            tracing::warn!(error = %e, "Rejecting malformed request");
                            let response = Self::rejection(&e);
                            ConnectionState::Writing(ResponseWriter::new(&response, false), false)
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.handle(req);
                    // Bodies are not consumed, so unless the head proves there is none
                    // the unread bytes could pass for the next request.
                    let keep_alive = req.keep_alive() && req.has_empty_body();

                    let writer = ResponseWriter::new(&response, keep_alive);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(self.reader.get_mut()).await?;

                    if *keep_alive {
                        self.reader.discard_consumed();
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> Result<ParsedRequest, RequestError> {
        let Some(limit) = self.read_timeout else {
            return read_request_head(&mut self.reader).await;
        };

        match tokio::time::timeout(limit, read_request_head(&mut self.reader)).await {
            Ok(result) => result,
            Err(_) => Err(ReadError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "timed out reading request head",
            ))
            .into()),
        }
    }

    fn rejection(err: &RequestError) -> Response {
        match err {
            RequestError::Read(ReadError::LineTooLong { .. } | ReadError::HeadTooLarge { .. }) => {
                Response::header_too_large()
            }
            _ => Response::bad_request(),
        }
    }
}
