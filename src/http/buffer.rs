//! Per-connection read buffer and CRLF line extraction.
//!
//! Lines are handed out as [`LineSpan`] offsets rather than slices, so nothing
//! outside the reader holds a borrow of the buffer while it refills. Bytes are
//! only borrowed through [`LineReader::line`], and that borrow ends before the
//! next `&mut self` call can grow or compact the storage.

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ReadError;

pub const CRLF: &[u8] = b"\r\n";

/// Default upper bound on one unterminated line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 10 * 1024;
/// Default upper bound on a whole request head, terminators included.
pub const DEFAULT_MAX_HEAD_LENGTH: usize = 32 * 1024;
/// Default growth increment.
pub const DEFAULT_HIGH_WATERMARK: usize = 4096;
/// Default free-capacity threshold below which the buffer grows.
pub const DEFAULT_LOW_WATERMARK: usize = 1024;

/// Sizing knobs for a [`LineReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLimits {
    pub max_line_length: usize,
    /// Cap on the bytes of one head, measured from the start of the buffer
    /// (the last [`LineReader::discard_consumed`]).
    pub max_head_length: usize,
    pub high_watermark: usize,
    pub low_watermark: usize,
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_head_length: DEFAULT_MAX_HEAD_LENGTH,
            high_watermark: DEFAULT_HIGH_WATERMARK,
            low_watermark: DEFAULT_LOW_WATERMARK,
        }
    }
}

/// Position of one extracted line inside the read buffer, CRLF excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Offset of the first byte after this line's terminator.
    pub fn next_offset(&self) -> usize {
        self.end + CRLF.len()
    }
}

/// Pulls CRLF-terminated lines from an async byte source.
pub struct LineReader<R> {
    stream: R,
    buffer: BytesMut,
    limits: BufferLimits,
    /// Most recently extracted line.
    line: LineSpan,
    /// Start of the line currently being assembled.
    cursor: usize,
    /// Where the next CRLF search begins; bytes before it hold no terminator.
    scanned: usize,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(stream: R, limits: BufferLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(limits.high_watermark),
            limits,
            line: LineSpan { start: 0, end: 0 },
            cursor: 0,
            scanned: 0,
        }
    }

    /// Returns the span of the next complete line, reading from the stream
    /// until one is available.
    ///
    /// A CR that ends one read and the LF that starts the next form one
    /// terminator: the search always resumes one byte before the previous
    /// end of data.
    pub async fn next_line(&mut self) -> Result<LineSpan, ReadError> {
        loop {
            if let Some(end) = self.find_crlf() {
                let span = LineSpan {
                    start: self.cursor,
                    end,
                };
                if span.len() >= self.limits.max_line_length {
                    return Err(ReadError::LineTooLong {
                        max: self.limits.max_line_length,
                    });
                }
                if span.next_offset() > self.limits.max_head_length {
                    return Err(ReadError::HeadTooLarge {
                        max: self.limits.max_head_length,
                    });
                }
                self.line = span;
                self.cursor = span.next_offset();
                self.scanned = self.cursor;
                return Ok(span);
            }

            if self.pending_len() >= self.limits.max_line_length {
                return Err(ReadError::LineTooLong {
                    max: self.limits.max_line_length,
                });
            }
            // Even if the CRLF arrived next, the head would no longer fit.
            if self.cursor + self.pending_len() + CRLF.len() > self.limits.max_head_length {
                return Err(ReadError::HeadTooLarge {
                    max: self.limits.max_head_length,
                });
            }

            self.fill().await?;
        }
    }

    /// Bytes of a span returned by [`next_line`](Self::next_line).
    pub fn line(&self, span: LineSpan) -> &[u8] {
        &self.buffer[span.start..span.end]
    }

    /// The most recently extracted line.
    pub fn last_line(&self) -> LineSpan {
        self.line
    }

    /// Offset just past the last extracted line's CRLF.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Number of bytes held in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Drops everything before the current cursor so the next request starts
    /// at offset zero. Any span taken before this call is invalidated.
    pub fn discard_consumed(&mut self) {
        self.buffer.advance(self.cursor);
        self.cursor = 0;
        self.scanned = 0;
        self.line = LineSpan { start: 0, end: 0 };
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.stream
    }

    fn find_crlf(&self) -> Option<usize> {
        let from = self.scanned.max(self.cursor);
        self.buffer[from..]
            .windows(CRLF.len())
            .position(|w| w == CRLF)
            .map(|pos| from + pos)
    }

    /// Length of the unterminated line content, not counting a trailing CR
    /// that may still turn out to be half of a terminator.
    fn pending_len(&self) -> usize {
        let pending = &self.buffer[self.cursor..];
        match pending.last() {
            Some(b'\r') => pending.len() - 1,
            _ => pending.len(),
        }
    }

    async fn fill(&mut self) -> Result<(), ReadError> {
        // Only a trailing CR can be part of a terminator not yet seen.
        self.scanned = self.buffer.len().saturating_sub(1).max(self.cursor);

        let free = self.buffer.capacity() - self.buffer.len();
        if free < self.limits.low_watermark {
            // BytesMut keeps offsets stable across reallocation; spans stay valid.
            self.buffer.reserve(self.limits.high_watermark);
            tracing::trace!(capacity = self.buffer.capacity(), "read buffer grown");
        }

        let n = self.stream.read_buf(&mut self.buffer).await?;
        if n == 0 {
            return Err(ReadError::ConnectionClosed);
        }
        Ok(())
    }
}
