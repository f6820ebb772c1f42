//! Open a file, edit it, walk the history, and save the result next to it.
//!
//! ```text
//! RUST_LOG=piece_table=debug cargo run --example edit_file -- notes.txt
//! ```
//!
//! Without an argument a small sample file is created in a temporary
//! directory.

use std::path::PathBuf;
use std::time::Instant;

use piece_table::{Document, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let scratch = tempfile::tempdir().expect("create temp dir");
    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            let path = scratch.path().join("sample.txt");
            std::fs::write(&path, "hello world\nsecond line\n").expect("write sample");
            path
        }
    };

    let start = Instant::now();
    let mut doc = Document::open(&path)?;
    println!("opened {} ({} bytes) in {:?}", path.display(), doc.len(), start.elapsed());

    doc.insert(0, b"// edited\n")?;
    let end = doc.len();
    doc.insert(end, b"-- appended --\n")?;
    if doc.len() > 20 {
        doc.delete(10, 6)?;
    }
    println!(
        "after edits: {} bytes in {} pieces, undo depth {}",
        doc.len(),
        doc.piece_count(),
        doc.undo_depth()
    );

    doc.undo();
    println!("after undo: {} bytes, redo depth {}", doc.len(), doc.redo_depth());
    doc.redo();

    if let Ok((c, width)) = doc.codepoint_at(0) {
        println!("first code point: {c:?} ({width} bytes)");
    }

    let mut out = path.clone().into_os_string();
    out.push(".edited");
    let out = PathBuf::from(out);
    doc.save(&out)?;
    println!("saved {}", out.display());

    Ok(())
}
