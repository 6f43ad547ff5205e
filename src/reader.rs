use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ReadError {
    Io(String),
    Decode { path: String, encoding: &'static str },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "Failed to read clippings file: {}", e),
            ReadError::Decode { path, encoding } => {
                write!(f, "File {} is not valid {}", path, encoding)
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Read a clippings file and decode it into lines with trailing `\r`/`\n`
/// stripped. A leading byte-order mark for the given encoding is removed, so
/// the UTF-8 default also accepts the BOM-prefixed files Kindle writes.
pub fn read_clippings(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>, ReadError> {
    let bytes = fs::read(path).map_err(|e| ReadError::Io(format!("{}: {}", path.display(), e)))?;

    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(ReadError::Decode {
            path: path.display().to_string(),
            encoding: encoding.name(),
        });
    }

    Ok(text
        .lines()
        .map(|line| line.trim_end_matches(['\r', '\n']).to_string())
        .collect())
}
