//! UTF-8 to legacy encoding conversion that never fails.
//!
//! Each source code point becomes exactly one output unit: its encoding, the
//! encoding of its look-alike from the substitution table, or a single `?`.

use tracing::trace;

use super::substitution::SubstitutionTable;
use super::transform::{Progress, Transform};
use crate::utils::encoding::{CharEncoder, MAX_CHAR_BYTES};

/// Byte written in place of a code point the target encoding cannot express.
pub const PLACEHOLDER: u8 = b'?';

/// Next unit at the front of a UTF-8 slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utf8Step {
    Char(char, usize),
    /// Invalid sequence of the given length.
    Invalid(usize),
    /// Truncated sequence; more bytes are needed.
    Incomplete,
}

fn next_char(src: &[u8]) -> Utf8Step {
    let window = &src[..src.len().min(4)];
    let valid = match std::str::from_utf8(window) {
        Ok(text) => text,
        Err(err) => {
            let valid_up_to = err.valid_up_to();
            match std::str::from_utf8(&window[..valid_up_to]) {
                Ok(text) if valid_up_to > 0 => text,
                _ => {
                    return match err.error_len() {
                        Some(len) => Utf8Step::Invalid(len),
                        None => Utf8Step::Incomplete,
                    };
                }
            }
        }
    };

    match valid.chars().next() {
        Some(c) => Utf8Step::Char(c, c.len_utf8()),
        None => Utf8Step::Incomplete,
    }
}

/// Encoder that substitutes look-alikes and falls back to [`PLACEHOLDER`].
pub struct SafeEncoder<'a, E: CharEncoder + ?Sized> {
    encoder: &'a E,
    table: &'static SubstitutionTable,
}

impl<'a, E: CharEncoder + ?Sized> SafeEncoder<'a, E> {
    pub fn new(encoder: &'a E) -> Self {
        Self {
            encoder,
            table: SubstitutionTable::global(),
        }
    }

    fn push_placeholder(dst: &mut Vec<u8>, progress: &mut Progress) {
        dst.push(PLACEHOLDER);
        progress.produced += 1;
        progress.replaced += 1;
    }
}

impl<E: CharEncoder + ?Sized> Transform for SafeEncoder<'_, E> {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, at_eof: bool) -> Progress {
        let mut progress = Progress::default();
        let mut scratch = [0u8; MAX_CHAR_BYTES];

        while progress.consumed < src.len() {
            let rest = &src[progress.consumed..];
            let (source, len) = match next_char(rest) {
                Utf8Step::Char(c, len) => (c, len),
                Utf8Step::Invalid(len) => {
                    trace!(len, "invalid UTF-8 sequence");
                    Self::push_placeholder(dst, &mut progress);
                    progress.code_points += 1;
                    progress.consumed += len;
                    continue;
                }
                Utf8Step::Incomplete if at_eof => {
                    trace!(len = rest.len(), "truncated UTF-8 sequence at end of input");
                    Self::push_placeholder(dst, &mut progress);
                    progress.code_points += 1;
                    progress.consumed = src.len();
                    break;
                }
                Utf8Step::Incomplete => {
                    progress.needs_more = true;
                    break;
                }
            };

            let target = match self.table.lookup(source) {
                Some(replacement) => {
                    trace!(?source, ?replacement, "substituted");
                    progress.substituted += 1;
                    replacement
                }
                None => source,
            };

            match self.encoder.encode_char(target, &mut scratch) {
                Some(bytes) => {
                    dst.extend_from_slice(bytes);
                    progress.produced += bytes.len();
                }
                None => {
                    trace!(?source, "unmappable");
                    Self::push_placeholder(dst, &mut progress);
                }
            }

            // Advance by the source width regardless of the outcome.
            progress.code_points += 1;
            progress.consumed += len;
        }

        progress
    }
}
