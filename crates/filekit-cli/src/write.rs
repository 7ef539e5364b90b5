use eyre::{Context, Result};
use filekit_core::safe_write_all_text;

use crate::cli::WriteArgs;

/// Returns whether the write succeeded; expected failures are already logged.
pub fn run_write(args: &WriteArgs) -> Result<bool> {
    let written = safe_write_all_text(&args.path, &args.content)
        .with_context(|| format!("writing {}", args.path.display()))?;
    if written {
        println!("Wrote {} bytes to {}", args.content.len(), args.path.display());
    } else {
        println!("Could not write {}", args.path.display());
    }
    Ok(written)
}
