use crate::codec::header::HeaderEncoder;
use crate::protocol::{Response, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;

/// Serializes a complete [`Response`]: status line, headers, blank line, body.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, headers, body) = item.into_parts();

        self.header_encoder.encode((status, headers, body.len()), dst)?;
        dst.extend_from_slice(&body);
        Ok(())
    }
}
