//! HTTP request decoder module
//!
//! This module decodes one HTTP/1.1 request from a growing byte buffer. It is
//! driven by [`FramedRead`](tokio_util::codec::FramedRead), which appends
//! bytes from the socket and calls [`Decoder::decode`] again whenever the
//! previous call returned `Ok(None)`.
//!
//! # State Machine
//!
//! ```text
//! RequestLine -> Headers -> Body -> Done
//!      \            \         \
//!       +------------+---------+--> Error
//! ```
//!
//! Transitions only move forward. Each phase consumes the bytes it used from
//! the front of the buffer, so already-parsed input is never scanned again.
//!
//! # Example
//!
//! ```no_run
//! use httpfromtcp::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer);
//! ```

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::body::LengthDecoder;
use crate::codec::header::parse_request_line;
use crate::ensure;
use crate::protocol::{CONTENT_LENGTH, Headers, ParseError, Request, RequestLine};

/// Maximum size in bytes allowed for the request line plus the header section
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Phase of a [`RequestDecoder`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeState {
    RequestLine,
    Headers,
    Body,
    /// The request has been produced; the decoder yields nothing more.
    Done,
    /// Decoding failed; every further call fails with [`ParseError::Poisoned`].
    Error,
}

impl DecodeState {
    fn phase(self) -> &'static str {
        match self {
            DecodeState::RequestLine => "reading the request line",
            DecodeState::Headers => "reading headers",
            DecodeState::Body => "reading the body",
            DecodeState::Done => "done",
            DecodeState::Error => "failed",
        }
    }
}

/// A decoder producing exactly one [`Request`].
#[derive(Debug)]
pub struct RequestDecoder {
    state: DecodeState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body_decoder: Option<LengthDecoder>,
    /// Bytes consumed by the request line and header lines so far
    header_bytes: usize,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Runs the current phase once against `src`.
    ///
    /// Returns `Ok(true)` if the phase advanced and another step may make
    /// further progress, `Ok(false)` if more input is needed.
    fn step(&mut self, src: &mut BytesMut) -> Result<bool, ParseError> {
        match self.state {
            DecodeState::RequestLine => match parse_request_line(src)? {
                Some((request_line, consumed)) => {
                    trace!(method = request_line.method(), target = request_line.target(), "parsed request line");
                    self.consume_header_bytes(src, consumed)?;
                    self.request_line = Some(request_line);
                    self.state = DecodeState::Headers;
                    Ok(true)
                }
                None => {
                    self.ensure_header_room(src.len())?;
                    Ok(false)
                }
            },

            DecodeState::Headers => {
                let status = self.headers.parse_line(src)?;
                if status.is_partial() {
                    self.ensure_header_room(src.len())?;
                    return Ok(false);
                }

                self.consume_header_bytes(src, status.consumed())?;
                if status.is_end() {
                    let length = content_length(&self.headers)?;
                    trace!(header_count = self.headers.len(), content_length = length, "parsed headers");
                    self.body_decoder = Some(LengthDecoder::new(length));
                    self.state = DecodeState::Body;
                }
                Ok(true)
            }

            // the body phase is driven by `decode` because it produces the request
            DecodeState::Body | DecodeState::Done => Ok(false),

            DecodeState::Error => Err(ParseError::Poisoned),
        }
    }

    fn consume_header_bytes(&mut self, src: &mut BytesMut, consumed: usize) -> Result<(), ParseError> {
        self.header_bytes += consumed;
        ensure!(self.header_bytes <= MAX_HEADER_BYTES, ParseError::too_large_header(self.header_bytes, MAX_HEADER_BYTES));
        src.advance(consumed);
        Ok(())
    }

    /// A line that has not ended yet still counts against the header limit.
    fn ensure_header_room(&self, pending: usize) -> Result<(), ParseError> {
        let current_size = self.header_bytes + pending;
        ensure!(current_size <= MAX_HEADER_BYTES, ParseError::too_large_header(current_size, MAX_HEADER_BYTES));
        Ok(())
    }

    fn decode_body(&mut self, src: &mut BytesMut) -> Result<Option<Request>, ParseError> {
        let Some(body_decoder) = self.body_decoder.as_mut() else {
            return Err(ParseError::Poisoned);
        };

        let Some(body) = body_decoder.decode(src)? else {
            return Ok(None);
        };

        let request_line = self.request_line.take().ok_or(ParseError::Poisoned)?;
        self.body_decoder = None;
        self.state = DecodeState::Done;

        Ok(Some(Request::new(request_line, std::mem::take(&mut self.headers), body)))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self {
            state: DecodeState::RequestLine,
            request_line: None,
            headers: Headers::new(),
            body_decoder: None,
            header_bytes: 0,
        }
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode a request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the request is complete
    /// - `Ok(None)`: need more data to proceed, or the request was already produced
    /// - `Err(_)`: the input is malformed; the decoder moves to [`DecodeState::Error`]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let result = loop {
            match self.state {
                DecodeState::Body => break self.decode_body(src),
                DecodeState::Done => break Ok(None),
                _ => match self.step(src) {
                    Ok(true) => continue,
                    Ok(false) => break Ok(None),
                    Err(e) => break Err(e),
                },
            }
        };

        if result.is_err() {
            self.state = DecodeState::Error;
        }
        result
    }

    /// Called once the stream has ended; anything short of a full request is
    /// reported as [`ParseError::IncompleteRequest`].
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(request) = self.decode(src)? {
            return Ok(Some(request));
        }

        match self.state {
            DecodeState::Done => Ok(None),
            state => {
                let phase = state.phase();
                self.state = DecodeState::Error;
                Err(ParseError::incomplete_request(phase))
            }
        }
    }
}

/// Reads the declared body length; a missing header means an empty body.
fn content_length(headers: &Headers) -> Result<usize, ParseError> {
    match headers.get(CONTENT_LENGTH) {
        None => Ok(0),
        Some(value) => value
            .parse::<usize>()
            .map_err(|e| ParseError::invalid_content_length(format!("value {value:?} is not a non-negative integer: {e}"))),
    }
}
