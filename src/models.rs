use serde::Serialize;

/// One excerpt marked on the device, with its position metadata.
///
/// `timestamp` is kept verbatim as found in the source file; it doubles as
/// the deduplication key when merging into existing markdown files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub author: String,
    pub title: String,
    pub text: String,
    pub timestamp: String,
    pub loc: String,
    pub page: Option<String>,
}

impl Highlight {
    /// The "Title (Author)" line this highlight was parsed from, used as
    /// the grouping key for per-book output.
    pub fn book_key(&self) -> String {
        format!("{} ({})", self.title, self.author)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub key: String,
    pub author: String,
    pub title: String,
    pub highlights: Vec<Highlight>,
}

/// Group highlights by book, preserving first-encounter order of books and
/// source order of highlights within each book.
pub fn group_by_book(highlights: Vec<Highlight>) -> Vec<Book> {
    let mut books: Vec<Book> = Vec::new();

    for highlight in highlights {
        let key = highlight.book_key();

        match books.iter_mut().find(|b| b.key == key) {
            Some(book) => book.highlights.push(highlight),
            None => books.push(Book {
                key,
                author: highlight.author.clone(),
                title: highlight.title.clone(),
                highlights: vec![highlight],
            }),
        }
    }

    books
}
