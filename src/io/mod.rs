//! Mesh exchange formats: OBJ in and out, ASCII STL out.

pub mod obj;
pub mod stl;

/// Parse and file errors of the exchange formats.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("Could not parse float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
    #[error("Could not parse index: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("Input is malformed: line {line}: {msg}")]
    MalformedInput { line: usize, msg: String },
}
