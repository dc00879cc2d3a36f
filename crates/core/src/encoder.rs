//! Stream finalization and compression.
//!
//! Finishing a content stream turns the accumulated operator text into
//! the byte payload of a PDF stream object. The payload is either left
//! as written or deflated, in which case the owning stream dictionary
//! must declare the `FlateDecode` filter returned alongside the bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use tracing::debug;

use crate::error::Result;

/// Compression applied when a stream is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Leave the operator text as written.
    #[default]
    None,
    /// Deflate the payload and declare `FlateDecode`.
    Flate,
}

/// Filter a stream dictionary must declare for its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFilter {
    FlateDecode,
}

impl StreamFilter {
    /// Name of the filter as written in the dictionary.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FlateDecode => "FlateDecode",
        }
    }
}

/// Finalized payload plus the filter it was encoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    pub data: Vec<u8>,
    pub filter: Option<StreamFilter>,
}

/// Encodes finalized operator text under the requested compression.
pub fn encode_stream(text: String, compression: Compression) -> Result<EncodedStream> {
    match compression {
        Compression::None => Ok(EncodedStream {
            data: text.into_bytes(),
            filter: None,
        }),
        Compression::Flate => {
            let raw = text.into_bytes();
            let mut encoder = ZlibEncoder::new(
                Vec::with_capacity(raw.len() / 2),
                flate2::Compression::default(),
            );
            encoder.write_all(&raw)?;
            let data = encoder.finish()?;
            debug!(
                raw_len = raw.len(),
                compressed_len = data.len(),
                "stream deflated"
            );
            Ok(EncodedStream {
                data,
                filter: Some(StreamFilter::FlateDecode),
            })
        }
    }
}
