//! Request body decoding.
//!
//! Bodies are framed only by `content-length`; a request without that header
//! has an empty body. [`LengthDecoder`] accumulates exactly the declared
//! number of bytes.

mod length_decoder;

pub use length_decoder::LengthDecoder;
