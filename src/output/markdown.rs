//! Markdown corpus generation
//!
//! Every page record becomes one section:
//!
//! ```text
//! # {title}
//! **URL:** {url}
//! **Depth:** {depth}
//!
//! ## Page Content
//!
//! {text}
//!
//! ---
//!
//! ```

use crate::crawler::PageRecord;
use crate::CorpusError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formats a single page record as a markdown section
pub fn format_page(page: &PageRecord) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n", page.title));
    md.push_str(&format!("**URL:** {}\n", page.url));
    md.push_str(&format!("**Depth:** {}\n\n", page.depth));
    md.push_str("## Page Content\n\n");
    md.push_str(&page.text);
    md.push_str("\n\n");
    md.push_str("---\n\n");

    md
}

/// Concatenates all page records, in order, into one document
///
/// Pure formatting: nothing is filtered or reordered, and an empty slice
/// yields an empty document.
pub fn assemble(pages: &[PageRecord]) -> String {
    pages.iter().map(format_page).collect()
}

/// Assembles the page records and writes them to `output_path`
///
/// Missing parent directories are created first.
///
/// # Returns
///
/// * `Ok(())` - Document written
/// * `Err(CorpusError::Output)` - The directory or file could not be written;
///   this is the one failure a crawl cannot recover from
pub fn write_document(pages: &[PageRecord], output_path: &Path) -> crate::Result<()> {
    let output_error = |source| CorpusError::Output {
        path: output_path.display().to_string(),
        source,
    };

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(output_error)?;
        }
    }

    let document = assemble(pages);

    let mut file = File::create(output_path).map_err(output_error)?;
    file.write_all(document.as_bytes()).map_err(output_error)?;

    tracing::info!(
        "Wrote {} pages ({} bytes) to {}",
        pages.len(),
        document.len(),
        output_path.display()
    );

    Ok(())
}
