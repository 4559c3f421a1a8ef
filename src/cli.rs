//! Command line interface.

use clap::Parser;
use std::path::PathBuf;

/// Convert text on stdin between UTF-8 and Shift_JIS / EUC-JP.
///
/// Characters the target encoding cannot represent are replaced with a
/// look-alike where one exists, otherwise with `?`.
#[derive(Debug, Parser)]
#[command(name = "jpconv", version, about, after_help = "Example: echo '入力テキスト' | jpconv > out.txt")]
pub struct Cli {
    /// Decode legacy-encoded input to UTF-8 instead of encoding UTF-8 input
    #[arg(short = 'd', long)]
    pub decode: bool,

    /// Legacy encoding: sjis, eucjp, utf8 or any matching WHATWG label
    #[arg(short = 'e', long)]
    pub encoding: Option<String>,

    /// Bytes read from stdin per chunk
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Config file to load instead of the one next to the executable
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log conversion details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
