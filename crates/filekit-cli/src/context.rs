use env_logger::Env;
use filekit_core::IoOptions;

use crate::cli::{ChunksArgs, CopyArgs};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub options: IoOptions,
}

impl AppContext {
    pub fn for_copy(args: &CopyArgs) -> Self {
        Self {
            options: IoOptions {
                block_size: args.block_size,
                ..IoOptions::default()
            },
        }
    }

    pub fn for_chunks(args: &ChunksArgs) -> Self {
        Self {
            options: IoOptions {
                chunk_size: args.chunk_size,
                ..IoOptions::default()
            },
        }
    }
}

/// Install the global logger. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_target(false)
        .try_init();
}
