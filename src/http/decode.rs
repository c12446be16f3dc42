//! Response body decoding for `Content-Encoding`.

use crate::base::neterror::NetError;
use bytes::Bytes;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use std::io::Read;

/// Brotli decoder window buffer.
const BROTLI_BUFFER: usize = 4096;

/// A content coding the transport can undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
    Deflate,
    Brotli,
}

impl ContentEncoding {
    /// Parse one coding token. Unknown codings are `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "" | "identity" => Some(ContentEncoding::Identity),
            "gzip" | "x-gzip" => Some(ContentEncoding::Gzip),
            "deflate" => Some(ContentEncoding::Deflate),
            "br" => Some(ContentEncoding::Brotli),
            _ => None,
        }
    }

    fn decode(self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(body.len() * 4);
        match self {
            ContentEncoding::Identity => out.extend_from_slice(body),
            ContentEncoding::Gzip => {
                GzDecoder::new(body).read_to_end(&mut out)?;
            }
            ContentEncoding::Deflate => {
                // servers send both zlib-wrapped and raw deflate under this name
                if ZlibDecoder::new(body).read_to_end(&mut out).is_err() {
                    out.clear();
                    DeflateDecoder::new(body).read_to_end(&mut out)?;
                }
            }
            ContentEncoding::Brotli => {
                brotli::Decompressor::new(body, BROTLI_BUFFER).read_to_end(&mut out)?;
            }
        }
        Ok(out)
    }
}

/// Undo the codings listed in a `Content-Encoding` value.
///
/// Codings are removed in reverse of the order they were applied. An
/// unknown coding or a corrupt stream is an `HttpBodyError`.
pub fn decode_body(content_encoding: Option<&str>, body: Bytes) -> Result<Bytes, NetError> {
    let Some(value) = content_encoding else {
        return Ok(body);
    };

    let mut codings = Vec::new();
    for token in value.split(',') {
        match ContentEncoding::parse(token) {
            Some(ContentEncoding::Identity) => {}
            Some(coding) => codings.push(coding),
            None => {
                tracing::debug!(encoding = %token.trim(), "unsupported content encoding");
                return Err(NetError::HttpBodyError);
            }
        }
    }

    let mut body = body;
    for coding in codings.into_iter().rev() {
        let decoded = coding.decode(&body).map_err(|e| {
            tracing::debug!(encoding = ?coding, error = %e, "decoding response body failed");
            NetError::HttpBodyError
        })?;
        body = Bytes::from(decoded);
    }
    Ok(body)
}
