use clap::{Args, Parser, Subcommand};
use filekit_core::options::{DEFAULT_BLOCK_SIZE, DEFAULT_CHUNK_SIZE};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filekit")]
#[command(about = "File-system utilities: chunked reads, progress copies and safe writes")]
#[command(after_help = "Run '<command> --help' for detailed options on each command.")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the file, directory, stream and path walkthrough
    Demo(DemoArgs),
    /// Copy a file block by block, showing percentage progress
    Copy(CopyArgs),
    /// Print a text file in fixed-size character chunks
    Chunks(ChunksArgs),
    /// Write text to a file, reporting failure instead of erroring
    Write(WriteArgs),
}

#[derive(Args, Clone, Debug)]
pub struct DemoArgs {
    /// Directory in which the demo creates its files (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,
    /// Remove every file and directory the demo created before exiting
    #[arg(long)]
    pub cleanup: bool,
}

#[derive(Args, Clone, Debug)]
pub struct CopyArgs {
    /// File to copy
    pub source: PathBuf,
    /// Destination file (created or truncated)
    pub destination: PathBuf,
    /// Bytes per read/write block
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: NonZeroUsize,
    /// Print plain percentage lines instead of a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Clone, Debug)]
pub struct ChunksArgs {
    /// Text file to read
    pub path: PathBuf,
    /// Characters per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: NonZeroUsize,
}

#[derive(Args, Clone, Debug)]
pub struct WriteArgs {
    /// Target file
    pub path: PathBuf,
    /// Text to write
    pub content: String,
}
