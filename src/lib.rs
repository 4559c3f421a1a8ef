//! Stream text between UTF-8 and Shift_JIS / EUC-JP.
//!
//! Encoding never fails on unmappable characters: look-alikes from the
//! substitution table are tried first and anything left becomes `?`.
//! Decoding replaces malformed bytes with U+FFFD. Only I/O errors abort.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use std::io::{Read, Write};

use crate::core::{Decoder, PipelineStats, SafeEncoder, StreamPipeline};
use crate::error::Result;
use crate::utils::encoding::EncodingSelector;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// UTF-8 to the legacy encoding.
    Encode,
    /// Legacy encoding to UTF-8.
    Decode,
}

/// Convert everything from `reader` into `writer`.
pub fn convert<R, W>(
    reader: &mut R,
    writer: &mut W,
    selector: EncodingSelector,
    direction: Direction,
    chunk_size: usize,
) -> Result<PipelineStats>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let codec = selector.codec();
    let mut pipeline = StreamPipeline::new(chunk_size)?;
    match direction {
        Direction::Encode => pipeline.run(reader, writer, &mut SafeEncoder::new(&codec)),
        Direction::Decode => pipeline.run(reader, writer, &mut Decoder::new(&codec)),
    }
}
