//! Reading and writing RDP files on disk
//!
//! mstsc saves connection files as UTF-16LE with a byte-order mark, other
//! tools write UTF-8 with or without one. Reading sniffs the mark; writing
//! always produces plain UTF-8.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::rdp::document::RdpDocument;

#[derive(Debug, Error)]
pub enum RdpFileError {
    #[error("The file {} does not exist.", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine the executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),
}

/// Loads a document from disk
pub fn read_document(path: &Path) -> Result<RdpDocument, RdpFileError> {
    if !path.exists() {
        return Err(RdpFileError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read(path)
        .and_then(|bytes| decode_contents(&bytes))
        .map_err(|source| RdpFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Read {} lines from {}", contents.lines().count(), path.display());
    Ok(RdpDocument::parse(&contents))
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decodes file bytes according to their byte-order mark, UTF-8 without one
fn decode_contents(bytes: &[u8]) -> io::Result<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        decode_utf8(rest)
    } else if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        decode_utf16(rest, u16::from_le_bytes)
    } else if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        decode_utf16(rest, u16::from_be_bytes)
    } else {
        decode_utf8(bytes)
    }
}

fn decode_utf8(bytes: &[u8]) -> io::Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> io::Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "UTF-16 data has an odd number of bytes",
        ));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Writes a document, replacing any existing file
pub fn write_document(path: &Path, document: &RdpDocument) -> Result<(), RdpFileError> {
    fs::write(path, document.to_text()).map_err(|source| RdpFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} lines to {}", document.lines().len(), path.display());
    Ok(())
}

/// `<prefix>_<YYYYMMDD_HHmmss>.<extension>`
pub fn timestamped_file_name(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), extension)
}

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, RdpFileError> {
    let exe = std::env::current_exe().map_err(RdpFileError::ExecutableDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        RdpFileError::ExecutableDir(io::Error::new(
            io::ErrorKind::NotFound,
            "executable path has no parent directory",
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdp::document::SelectionDirective;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    #[test]
    fn file_name_uses_local_timestamp_pattern() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap();
        assert_eq!(
            timestamped_file_name("MonitorSelect", "rdp", at),
            "MonitorSelect_20240307_090542.rdp"
        );
    }

    #[test]
    fn write_then_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.rdp");

        write_document(&path, &RdpDocument::generate(&[0, 2])).unwrap();
        let document = read_document(&path).unwrap();

        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([0, 2]))
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = read_document(&dir.path().join("absent.rdp"));
        assert!(matches!(result, Err(RdpFileError::NotFound { .. })));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("session.rdp");

        let result = write_document(&path, &RdpDocument::generate(&[0]));
        assert!(matches!(result, Err(RdpFileError::Write { .. })));
    }

    #[test]
    fn error_messages_name_the_file() {
        let err = RdpFileError::NotFound {
            path: PathBuf::from("work.rdp"),
        };
        assert_eq!(err.to_string(), "The file work.rdp does not exist.");
    }

    fn utf16_bytes(text: &str, bom: &[u8], to_bytes: fn(u16) -> [u8; 2]) -> Vec<u8> {
        let mut bytes = bom.to_vec();
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&to_bytes(unit));
        }
        bytes
    }

    fn selection_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|line| line.starts_with("selectedmonitors:"))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn utf8_bom_does_not_hide_leading_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.rdp");
        fs::write(&path, "\u{feff}selectedmonitors:s:0\nfull address:s:host\n").unwrap();

        let mut document = read_document(&path).unwrap();
        assert_eq!(
            document.parse_selection(),
            SelectionDirective::Found(BTreeSet::from([0]))
        );

        document.merge_selection(&[1]);
        write_document(&path, &document).unwrap();

        assert_eq!(selection_lines(&path), vec!["selectedmonitors:s:1"]);
        assert!(!fs::read(&path).unwrap().starts_with(UTF8_BOM));
    }

    #[test]
    fn utf16_files_are_decoded_and_rewritten_as_utf8() {
        let dir = TempDir::new().unwrap();
        let text = "screen mode id:i:2\r\nselectedmonitors:s:0,2\r\nfull address:s:host\r\n";

        for (name, bytes) in [
            ("le.rdp", utf16_bytes(text, UTF16LE_BOM, u16::to_le_bytes)),
            ("be.rdp", utf16_bytes(text, UTF16BE_BOM, u16::to_be_bytes)),
        ] {
            let path = dir.path().join(name);
            fs::write(&path, bytes).unwrap();

            let mut document = read_document(&path).unwrap();
            assert_eq!(
                document.parse_selection(),
                SelectionDirective::Found(BTreeSet::from([0, 2])),
                "{}",
                name
            );

            document.merge_selection(&[1]);
            write_document(&path, &document).unwrap();
            assert_eq!(selection_lines(&path), vec!["selectedmonitors:s:1"]);
            assert!(fs::read_to_string(&path).unwrap().contains("full address:s:host"));
        }
    }

    #[test]
    fn truncated_utf16_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.rdp");
        fs::write(&path, [0xFFu8, 0xFE, 0x61, 0x00, 0x62]).unwrap();

        let result = read_document(&path);
        assert!(matches!(result, Err(RdpFileError::Read { .. })));
    }

    #[test]
    fn executable_dir_exists() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_dir());
    }
}
