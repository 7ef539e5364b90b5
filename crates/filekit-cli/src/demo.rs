//! Linear walkthrough of the library: text files, directories, streams and
//! paths, printed section by section.

use eyre::{Context, Result};
use filekit_core::binary::{BinaryReader, BinaryWriter};
use filekit_core::directory::{
    current_dir, ensure_dir, list_files, list_files_recursive, list_subdirectories, remove_path,
};
use filekit_core::paths::{combine, create_temp_file, invalid_file_name_chars, temp_dir, PathParts};
use filekit_core::text::{
    append_all_text, file_details, file_exists, numbered_lines, read_all_lines, read_all_text,
    write_all_lines, write_all_text, write_bytes,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::DemoArgs;

const TEXT_FILE: &str = "proba.txt";
const LINES_FILE: &str = "lines.txt";
const DEMO_DIR: &str = "TestDirectory";
const STREAM_FILE: &str = "stream_example.txt";
const WRITER_FILE: &str = "writer_example.txt";
const BINARY_FILE: &str = "binary_example.bin";

pub fn run_demo(args: &DemoArgs) -> Result<()> {
    let workdir = match &args.workdir {
        Some(dir) => dir.clone(),
        None => current_dir()?,
    };
    ensure_dir(&workdir).with_context(|| format!("preparing {}", workdir.display()))?;
    log::debug!("demo workdir {}", workdir.display());

    file_io_section(&workdir)?;
    directory_section(&workdir)?;
    stream_section(&workdir)?;
    path_section()?;

    if args.cleanup {
        cleanup(&workdir)?;
    }
    Ok(())
}

fn file_io_section(workdir: &Path) -> Result<()> {
    println!("=== FILE I/O EXAMPLES ===");
    let text_path = workdir.join(TEXT_FILE);

    write_all_text(&text_path, "Hello, World!\nThis is a test file.")?;
    println!("File written successfully.");

    let content = read_all_text(&text_path)?;
    println!("File content:\n{content}");

    append_all_text(&text_path, "\nAppended line.")?;

    let lines_path = workdir.join(LINES_FILE);
    write_all_lines(&lines_path, ["Line 1", "Line 2", "Line 3"])?;

    println!("\nLines from file:");
    for line in read_all_lines(&lines_path)? {
        println!("- {line}");
    }

    if file_exists(&text_path) {
        println!("File {TEXT_FILE} exists.");
        let details = file_details(&text_path)?;
        println!("Size: {} bytes", details.size);
        println!("Created: {}", format_time(details.created));
        println!("Modified: {}", format_time(details.modified));
    }

    println!();
    Ok(())
}

fn directory_section(workdir: &Path) -> Result<()> {
    println!("=== DIRECTORY OPERATIONS ===");
    let dir = workdir.join(DEMO_DIR);

    if ensure_dir(&dir)? {
        println!("Directory '{DEMO_DIR}' created.");
    }

    let sub_dir = dir.join("SubFolder");
    ensure_dir(&sub_dir)?;

    write_all_text(&dir.join("file1.txt"), "Content 1")?;
    write_all_text(&dir.join("file2.txt"), "Content 2")?;
    write_all_text(&sub_dir.join("subfile.txt"), "Sub content")?;

    println!("\nFiles in {DEMO_DIR}:");
    for file in list_files(&dir)? {
        println!("- {}", display_name(&file));
    }

    println!("\nAll files (recursive):");
    for file in list_files_recursive(&dir)? {
        println!("- {}", file.display());
    }

    println!("\nSubdirectories:");
    for sub in list_subdirectories(&dir)? {
        println!("- {}", display_name(&sub));
    }

    println!("\nCurrent directory: {}", current_dir()?.display());
    println!();
    Ok(())
}

#[allow(clippy::approx_constant)]
fn stream_section(workdir: &Path) -> Result<()> {
    println!("=== STREAM EXAMPLES ===");

    write_bytes(&workdir.join(STREAM_FILE), "Hello from FileStream!".as_bytes())?;
    println!("Data written using a raw byte stream.");

    let writer_path = workdir.join(WRITER_FILE);
    {
        let file = File::create(&writer_path)
            .with_context(|| format!("creating {}", writer_path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "Line 1 from BufWriter")?;
        writeln!(writer, "Line 2 from BufWriter")?;
        write!(writer, "Partial line ")?;
        writeln!(writer, "completed.")?;
        writer.flush()?;
    }
    println!("Text written using a buffered writer.");

    println!("\nReading line by line:");
    for entry in numbered_lines(&writer_path)? {
        let (number, line) = entry?;
        println!("{number}: {line}");
    }

    let binary_path = workdir.join(BINARY_FILE);
    {
        let file = File::create(&binary_path)
            .with_context(|| format!("creating {}", binary_path.display()))?;
        let mut writer = BinaryWriter::new(BufWriter::new(file));
        writer.write_i32(42)?;
        writer.write_f64(3.14159)?;
        writer.write_str("Binary text")?;
        writer.write_bool(true)?;
        writer.flush()?;
    }

    let file = File::open(&binary_path)
        .with_context(|| format!("opening {}", binary_path.display()))?;
    let mut reader = BinaryReader::new(file);
    let int_value = reader.read_i32()?;
    let double_value = reader.read_f64()?;
    let string_value = reader.read_string()?;
    let bool_value = reader.read_bool()?;

    println!("\nBinary data read:");
    println!("Int: {int_value}");
    println!("Double: {double_value}");
    println!("String: {string_value}");
    println!("Bool: {bool_value}");

    println!();
    Ok(())
}

fn path_section() -> Result<()> {
    println!("=== PATH OPERATIONS ===");

    let sample = sample_path();
    let parts = PathParts::of(&sample);
    println!("Full path: {}", sample.display());
    println!("Directory: {}", or_empty(parts.directory.as_deref().map(Path::display)));
    println!("Filename: {}", parts.file_name.unwrap_or_default());
    println!("Filename without extension: {}", parts.stem.unwrap_or_default());
    println!(
        "Extension: {}",
        parts.extension.map(|ext| format!(".{ext}")).unwrap_or_default()
    );
    println!("Root: {}", or_empty(parts.root.as_deref().map(Path::display)));

    let combined = combine(["folder1", "folder2", "file.txt"]);
    println!("Combined path: {}", combined.display());

    println!("Temp directory: {}", temp_dir().display());
    let temp_file = create_temp_file()?;
    println!("Temp filename: {}", temp_file.display());
    remove_path(&temp_file)?;

    println!(
        "Invalid filename characters count: {}",
        invalid_file_name_chars().len()
    );

    println!();
    Ok(())
}

fn cleanup(workdir: &Path) -> Result<()> {
    for name in [TEXT_FILE, LINES_FILE, STREAM_FILE, WRITER_FILE, BINARY_FILE, DEMO_DIR] {
        remove_path(&workdir.join(name))?;
    }
    println!("Cleanup completed.");
    Ok(())
}

#[cfg(windows)]
fn sample_path() -> PathBuf {
    PathBuf::from(r"C:\Users\Example\Documents\test.txt")
}

#[cfg(not(windows))]
fn sample_path() -> PathBuf {
    PathBuf::from("/home/example/documents/test.txt")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn or_empty(value: Option<std::path::Display<'_>>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn format_time(time: Option<chrono::DateTime<chrono::Local>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unavailable".to_owned(),
    }
}
