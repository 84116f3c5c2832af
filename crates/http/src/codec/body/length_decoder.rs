//! Decoder for request bodies framed by the `content-length` header.

use std::cmp;

use crate::protocol::ParseError;
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// Never reserve more than this up front, whatever length the client announced.
const MAX_INITIAL_CAPACITY: usize = 8 * 1024;

/// Accumulates a body of a known length.
///
/// Each call takes at most the number of bytes still missing from `src`, so
/// bytes past the declared length stay in the source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes remaining to be read from the payload
    remaining: usize,
    body: BytesMut,
}

impl LengthDecoder {
    /// Creates a decoder for a body of exactly `length` bytes.
    pub fn new(length: usize) -> Self {
        Self { remaining: length, body: BytesMut::with_capacity(cmp::min(length, MAX_INITIAL_CAPACITY)) }
    }

    /// Bytes still missing before the body is complete.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// # Returns
    /// * `Ok(Some(body))` once all declared bytes have been accumulated
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let len = cmp::min(self.remaining, src.len());
        if len > 0 {
            self.body.extend_from_slice(&src.split_to(len));
            self.remaining -= len;
        }

        if self.remaining == 0 {
            return Ok(Some(std::mem::take(&mut self.body).freeze()));
        }

        Ok(None)
    }
}
