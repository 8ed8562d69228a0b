//! SHA-512 integrity checks for downloaded installers.

use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Outcome of comparing a file against its expected digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestCheck {
    /// No digest configured; the file is trusted as-is.
    Skipped,
    /// The computed digest equals the expected one (ignoring ASCII case).
    Matched { actual: String },
    /// The digests differ.
    Mismatched { expected: String, actual: String },
}

impl DigestCheck {
    /// Whether the pipeline may continue.
    pub fn passed(&self) -> bool {
        !matches!(self, DigestCheck::Mismatched { .. })
    }
}

/// Compute the lowercase hex SHA-512 of a file's full contents.
pub fn sha512_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha512::new();
    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compare two hex digests, ignoring ASCII case and surrounding whitespace.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.trim().eq_ignore_ascii_case(actual.trim())
}

/// Verify a file against an optional expected digest.
///
/// An absent or blank expected digest always passes without reading the file.
pub fn verify_file(path: &Path, expected: Option<&str>) -> io::Result<DigestCheck> {
    let Some(expected) = expected.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(DigestCheck::Skipped);
    };

    let actual = sha512_file(path)?;
    if digests_match(expected, &actual) {
        Ok(DigestCheck::Matched { actual })
    } else {
        Ok(DigestCheck::Mismatched {
            expected: expected.to_string(),
            actual,
        })
    }
}
