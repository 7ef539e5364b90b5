use eyre::{Context, Result};
use filekit_core::copy::{copy_file_with_progress_sized, CopyEvent, CopyObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

use crate::cli::CopyArgs;
use crate::context::AppContext;

/// Drives an indicatif bar whose position is the copy percentage.
struct BarObserver {
    bar: ProgressBar,
}

impl BarObserver {
    fn new(label: String) -> Result<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {pos:>3}%",
        )?);
        bar.set_message(label);
        Ok(Self { bar })
    }
}

impl CopyObserver for BarObserver {
    fn on_event(&mut self, event: CopyEvent) {
        match event {
            CopyEvent::Progress { percent, .. } => self.bar.set_position(u64::from(percent)),
            CopyEvent::Complete { .. } => self.bar.finish(),
        }
    }
}

/// Rewrites a single "Copying: N%" line on stderr.
struct LineObserver;

impl CopyObserver for LineObserver {
    fn on_event(&mut self, event: CopyEvent) {
        let mut err = io::stderr().lock();
        match event {
            CopyEvent::Progress { percent, .. } => write!(err, "\rCopying: {percent}%").ok(),
            CopyEvent::Complete { .. } => writeln!(err, " - Complete!").ok(),
        };
    }
}

pub fn run_copy(args: &CopyArgs) -> Result<()> {
    let ctx = AppContext::for_copy(args);
    let block_size = ctx.options.block_size;

    let stats = if args.no_progress {
        copy_file_with_progress_sized(&args.source, &args.destination, block_size, &mut LineObserver)
    } else {
        let mut observer = BarObserver::new(format!("{}", args.source.display()))?;
        copy_file_with_progress_sized(&args.source, &args.destination, block_size, &mut observer)
    }
    .with_context(|| {
        format!(
            "copying {} to {}",
            args.source.display(),
            args.destination.display()
        )
    })?;

    println!(
        "Copied {} in {} block(s) to {}",
        format_bytes(stats.bytes_copied),
        stats.blocks,
        args.destination.display()
    );
    Ok(())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
