//! Chunked transform contract shared by both conversion directions.

/// Result of one `transform` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Source bytes consumed from the front of `src`.
    pub consumed: usize,
    /// Bytes appended to `dst`.
    pub produced: usize,
    /// Source code points handled, including replaced ones.
    pub code_points: usize,
    /// Code points swapped for a look-alike before encoding.
    pub substituted: usize,
    /// Code points emitted as a placeholder or replacement character.
    pub replaced: usize,
    /// The unconsumed tail is an incomplete sequence; call again with more
    /// input. Never set when `at_eof` was true.
    pub needs_more: bool,
}

/// A streaming byte-to-byte converter.
///
/// Implementations must consume everything they are given when `at_eof` is
/// true and must not fail: character-level problems are resolved inside the
/// transformer.
pub trait Transform {
    fn transform(&mut self, src: &[u8], dst: &mut Vec<u8>, at_eof: bool) -> Progress;
}
