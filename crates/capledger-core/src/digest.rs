use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Supported digest algorithms for transaction identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// SHA-256 (the current capledger default).
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + bytes digest, encoded as base64url without padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm (currently always `sha-256`).
    pub alg: DigestAlg,
    /// Base64URL (no padding) digest bytes.
    #[serde(rename = "b64")]
    pub b64: String,
}

/// Shape of a base64url-no-pad SHA-256 digest.
const B64_PATTERN: &str = r"^[A-Za-z0-9_-]{43,44}$";

impl Digest {
    /// Constructs a validated digest.
    pub fn new(alg: DigestAlg, b64: impl Into<String>) -> Result<Self, ValidationError> {
        let b64 = b64.into();
        let re = Regex::new(B64_PATTERN).expect("invalid regex");
        if !re.is_match(&b64) {
            return Err(ValidationError {
                field: "digest",
                expected: B64_PATTERN,
                value: b64,
            });
        }
        Ok(Digest { alg, b64 })
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.b64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_43_char_base64url() {
        let b64 = "A".repeat(43);
        assert!(Digest::new(DigestAlg::Sha256, b64).is_ok());
    }

    #[test]
    fn rejects_short_or_padded() {
        assert!(Digest::new(DigestAlg::Sha256, "abc").is_err());
        let padded = format!("{}=", "A".repeat(43));
        assert!(Digest::new(DigestAlg::Sha256, padded).is_err());
    }
}
