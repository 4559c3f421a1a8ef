//! Chunked pump from a reader, through a transformer, into a writer.
//!
//! The pipeline owns a single pending buffer. Each iteration appends at most
//! `chunk_size` freshly read bytes after whatever tail the transformer left
//! unconsumed, so a code point split across two reads is always seen whole.
//! Output for a chunk is written before the next read.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use super::transform::{Progress, Transform};
use crate::error::{ConvError, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest accepted `chunk_size` (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Totals for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub chunks: u64,
    pub code_points: u64,
    pub substituted: u64,
    pub replaced: u64,
}

impl PipelineStats {
    fn record(&mut self, progress: &Progress) {
        self.code_points = self.code_points.saturating_add(progress.code_points as u64);
        self.substituted = self.substituted.saturating_add(progress.substituted as u64);
        self.replaced = self.replaced.saturating_add(progress.replaced as u64);
    }
}

pub struct StreamPipeline {
    chunk: Vec<u8>,
    pending: Vec<u8>,
    output: Vec<u8>,
}

impl StreamPipeline {
    /// # Errors
    /// `chunk_size` must be in `1..=MAX_CHUNK_SIZE`.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
            return Err(ConvError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            chunk: vec![0; chunk_size],
            pending: Vec::with_capacity(chunk_size * 2),
            output: Vec::with_capacity(chunk_size * 2),
        })
    }

    /// Pump `reader` to exhaustion through `transformer` into `writer`.
    ///
    /// # Errors
    /// Any read or write failure other than `Interrupted` aborts the run.
    pub fn run<R, W, T>(&mut self, reader: &mut R, writer: &mut W, transformer: &mut T) -> Result<PipelineStats>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        T: Transform + ?Sized,
    {
        let mut stats = PipelineStats::default();
        self.pending.clear();

        loop {
            let read_len = self.fill(reader)?;
            let at_eof = read_len == 0;
            if !at_eof {
                stats.chunks += 1;
                stats.bytes_read = stats.bytes_read.saturating_add(read_len as u64);
            }

            self.output.clear();
            let progress = transformer.transform(&self.pending, &mut self.output, at_eof);
            stats.record(&progress);
            debug_assert!(!(at_eof && progress.needs_more));

            if !self.output.is_empty() {
                writer.write_all(&self.output)?;
                stats.bytes_written = stats.bytes_written.saturating_add(self.output.len() as u64);
            }
            self.pending.drain(..progress.consumed);

            if at_eof {
                break;
            }
        }

        writer.flush()?;

        if stats.replaced > 0 {
            warn!(replaced = stats.replaced, "some characters could not be converted");
        }
        debug!(
            bytes_read = stats.bytes_read,
            bytes_written = stats.bytes_written,
            chunks = stats.chunks,
            code_points = stats.code_points,
            substituted = stats.substituted,
            "conversion finished"
        );

        Ok(stats)
    }

    /// Read one chunk and append it after the pending tail.
    fn fill<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        let read_len = loop {
            match reader.read(&mut self.chunk) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                other => break other?,
            }
        };
        self.pending.extend_from_slice(&self.chunk[..read_len]);
        Ok(read_len)
    }
}
