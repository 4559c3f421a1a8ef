//! Legacy encoding to UTF-8 conversion.
//!
//! Malformed input policy: an invalid or truncated byte sequence produces one
//! U+FFFD and decoding resumes at the very next byte. A bad lead byte therefore
//! never swallows the byte after it.

use tracing::trace;

use super::transform::{Progress, Transform};
use crate::utils::encoding::{CharDecoder, DecodeStep, MAX_CHAR_BYTES};

/// UTF-8 bytes of U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT: &[u8] = "\u{FFFD}".as_bytes();

pub struct Decoder<'a, D: CharDecoder + ?Sized> {
    decoder: &'a D,
}

impl<'a, D: CharDecoder + ?Sized> Decoder<'a, D> {
    pub fn new(decoder: &'a D) -> Self {
        Self { decoder }
    }
}

impl<D: CharDecoder + ?Sized> Transform for Decoder<'_, D> {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, at_eof: bool) -> Progress {
        let mut progress = Progress::default();
        let mut scratch = [0u8; MAX_CHAR_BYTES];

        while progress.consumed < src.len() {
            let rest = &src[progress.consumed..];
            match self.decoder.decode_char(rest, at_eof, &mut scratch) {
                DecodeStep::Decoded { consumed, written } => {
                    dst.extend_from_slice(&scratch[..written]);
                    progress.produced += written;
                    progress.consumed += consumed;
                }
                DecodeStep::Incomplete if !at_eof => {
                    progress.needs_more = true;
                    break;
                }
                DecodeStep::Incomplete | DecodeStep::Malformed => {
                    trace!(byte = rest[0], "malformed sequence");
                    dst.extend_from_slice(REPLACEMENT);
                    progress.produced += REPLACEMENT.len();
                    progress.replaced += 1;
                    progress.consumed += 1;
                }
            }
            progress.code_points += 1;
        }

        progress
    }
}
