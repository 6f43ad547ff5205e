use crate::models::Book;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Characters replaced with a space when deriving a markdown file name from
/// a book title. Must stay stable so a book maps to the same file every run.
const FILENAME_SPECIAL_CHARS: &str = "!@#$%^&*()[]{};:,./<>?\\|`~-=_+";

#[derive(Debug)]
pub enum WriteError {
    CreateDir(String),
    CreateFile(String),
    Append(String),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::CreateDir(e) => write!(f, "Failed to create author directory: {}", e),
            WriteError::CreateFile(e) => write!(f, "Failed to create book file: {}", e),
            WriteError::Append(e) => write!(f, "Failed to append highlight: {}", e),
        }
    }
}

impl std::error::Error for WriteError {}

/// Outcome of one sync run. A failure for one book does not stop the others;
/// it is recorded here instead.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub skipped: usize,
    pub failures: Vec<(String, WriteError)>,
}

/// Replace filesystem-hostile characters in a title with spaces and append
/// the markdown extension.
pub fn book_filename(title: &str) -> String {
    let mut name: String = title
        .chars()
        .map(|c| {
            if FILENAME_SPECIAL_CHARS.contains(c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    name.push_str(".md");
    name
}

/// Sync all books into `destination/<author>/<title>.md`, appending only the
/// highlights whose timestamp is not already present in the file.
pub fn sync_books(books: &[Book], destination: &Path, verbose: bool) -> SyncReport {
    let mut report = SyncReport::default();

    for book in books {
        match sync_book(book, destination, verbose) {
            Ok((synced, skipped)) => {
                report.synced += synced;
                report.skipped += skipped;
            }
            Err(e) => report.failures.push((book.key.clone(), e)),
        }
    }

    report
}

fn sync_book(book: &Book, destination: &Path, verbose: bool) -> Result<(usize, usize), WriteError> {
    let filepath = ensure_book_file(book, destination, verbose)?;

    // Snapshot taken once per run; appends within the run do not grow it, so
    // two new highlights sharing a timestamp are both written (as the source
    // format never produces that in practice).
    let content = fs::read_to_string(&filepath).map_err(|e| WriteError::Append(e.to_string()))?;

    let mut file = OpenOptions::new()
        .append(true)
        .open(&filepath)
        .map_err(|e| WriteError::Append(e.to_string()))?;

    let mut synced = 0;
    let mut skipped = 0;

    for highlight in &book.highlights {
        if content.contains(&highlight.timestamp) {
            skipped += 1;
            continue;
        }

        let header = match &highlight.page {
            Some(page) => format!(
                "## Page {} | Location {} | {} \n",
                page, highlight.loc, highlight.timestamp
            ),
            None => format!("## Location {} | {} \n", highlight.loc, highlight.timestamp),
        };

        file.write_all(header.as_bytes())
            .and_then(|_| file.write_all(highlight.text.as_bytes()))
            .and_then(|_| file.write_all(b"\n \n"))
            .map_err(|e| WriteError::Append(e.to_string()))?;
        synced += 1;
    }

    Ok((synced, skipped))
}

/// Create the author directory and the book file (with its title heading) if
/// they do not exist yet, returning the book file path.
fn ensure_book_file(book: &Book, destination: &Path, verbose: bool) -> Result<PathBuf, WriteError> {
    let author_dir = destination.join(&book.author);
    if !author_dir.is_dir() {
        if verbose {
            println!("Creating folder for author {}.", book.author);
        }
        fs::create_dir_all(&author_dir).map_err(|e| WriteError::CreateDir(e.to_string()))?;
    }

    let filepath = author_dir.join(book_filename(&book.title));
    if !filepath.is_file() {
        if verbose {
            println!("Creating markdown file for book {}.", book.key);
        }
        fs::write(&filepath, format!("# {}\n\n", book.key))
            .map_err(|e| WriteError::CreateFile(e.to_string()))?;
    }

    Ok(filepath)
}
