//! # Program Loader
//!
//! LS-8 programs are distributed as text: one byte per line written as a
//! binary literal, with `#` starting a comment that runs to the end of the
//! line. Blank and comment-only lines are ignored.
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use crate::MEMORY_SIZE;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading a program.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("cannot read program file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line holds something other than an 8-bit binary literal.
    #[error("line {line}: `{text}` is not an 8-bit binary literal")]
    InvalidLine { line: usize, text: String },

    /// The program has more bytes than memory has cells.
    #[error("program is {len} bytes but memory holds only {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },
}

/// Parses program text into the bytes to load at address 0.
///
/// # Errors
///
/// - `LoadError::InvalidLine` for the first line that is not a 1-8 digit
///   binary literal (line numbers are 1-based)
/// - `LoadError::ProgramTooLarge` if the image exceeds `MEMORY_SIZE`
///
/// # Examples
///
/// ```
/// use ls8::parse_program;
///
/// let source = "10000010 # LDI R0,8\n00000000\n00001000\n\n# done\n00000001\n";
/// assert_eq!(parse_program(source).unwrap(), vec![0x82, 0x00, 0x08, 0x01]);
///
/// assert!(parse_program("10000002\n").is_err());
/// ```
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let code = raw_line.split('#').next().unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }

        program.push(parse_binary_byte(code).ok_or_else(|| LoadError::InvalidLine {
            line: index + 1,
            text: code.to_string(),
        })?);
    }

    if program.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge {
            len: program.len(),
            capacity: MEMORY_SIZE,
        });
    }

    Ok(program)
}

fn parse_binary_byte(text: &str) -> Option<u8> {
    if text.is_empty() || text.len() > 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(text, 2).ok()
}

/// Reads and parses a program file.
///
/// # Errors
///
/// `LoadError::Io` if the file cannot be read, otherwise as `parse_program`.
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let program = parse_program(&source)?;
    log::debug!("parsed {} bytes from {}", program.len(), path.display());
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let source = "# header\n\n   \n10100010 # MUL\n  00000001  \n";
        assert_eq!(parse_program(source).unwrap(), vec![0xA2, 0x01]);
    }

    #[test]
    fn test_short_literals_accepted() {
        assert_eq!(parse_program("1\n101\n").unwrap(), vec![1, 5]);
    }

    #[test]
    fn test_invalid_line_reports_position() {
        match parse_program("00000001\n\nLDI R0\n") {
            Err(LoadError::InvalidLine { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "LDI R0");
            }
            other => panic!("Expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_nine_digits_rejected() {
        assert!(matches!(
            parse_program("100000000\n"),
            Err(LoadError::InvalidLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_too_large() {
        let source = "00000000\n".repeat(MEMORY_SIZE + 1);
        assert!(matches!(
            parse_program(&source),
            Err(LoadError::ProgramTooLarge { len: 257, capacity: 256 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_program_file("/nonexistent/ls8/program.ls8").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("program.ls8"));
    }
}
