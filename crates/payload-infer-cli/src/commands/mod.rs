//! CLI command implementations.

pub mod batch;
pub mod infer;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use payload_infer::{Message, PayloadError};

/// The file to read, or `None` for stdin (no argument or `-`).
fn input_path(file: Option<&Path>) -> Option<&Path> {
    file.filter(|path| *path != Path::new("-"))
}

/// Load a single message from `file` or stdin.
pub fn load_message(file: Option<&Path>) -> Result<Message, PayloadError> {
    match input_path(file) {
        Some(path) => Message::from_path(path),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|source| PayloadError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Message::from_json_slice(&bytes)
        }
    }
}

/// Open `file` or stdin for buffered reading.
pub fn open_input(file: Option<&Path>) -> Result<Box<dyn BufRead>, PayloadError> {
    match input_path(file) {
        Some(path) => {
            let file = File::open(path).map_err(|source| PayloadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
