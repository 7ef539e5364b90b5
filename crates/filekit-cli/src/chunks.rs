use eyre::{Context, Result};
use filekit_core::ChunkedReader;

use crate::cli::ChunksArgs;
use crate::context::AppContext;

pub fn run_chunks(args: &ChunksArgs) -> Result<()> {
    let ctx = AppContext::for_chunks(args);
    let reader = ChunkedReader::with_chunk_size(&args.path, ctx.options.chunk_size);
    let chunk_size = reader.chunk_size();

    let mut count = 0usize;
    for chunk in reader {
        let chunk = chunk.with_context(|| format!("reading {}", args.path.display()))?;
        count += 1;
        println!("--- chunk {} ({} chars) ---", count, chunk.chars().count());
        println!("{chunk}");
    }
    println!("{} chunk(s) of up to {} chars", count, chunk_size);
    Ok(())
}
