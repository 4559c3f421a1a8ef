//! Utility modules for encoding support.

pub mod encoding;
