use std::fmt;
use std::path::Path;

use md5::{Digest, Md5};

use crate::consts::FINGERPRINT_LEN;
use crate::error::Result;

/// Short content hash of a file's raw bytes, used to version output names.
///
/// Holds the first [`FINGERPRINT_LEN`] lowercase hex characters of the MD5 digest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Md5::digest(bytes);
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest.iter() {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex.truncate(FINGERPRINT_LEN);
        Self(hex)
    }

    pub fn of_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::of_bytes(&bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
