// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! 32-byte digests and their hex text form.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};

use crate::config::{DIGEST_HEX_LEN, DIGEST_LEN};
use crate::error::{ReceiptError, ReceiptResult};

/// A SHA-256 output. Textual form is 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Decodes 64 hex characters (either case).
    pub fn from_hex(text: &str) -> ReceiptResult<Self> {
        if text.len() != DIGEST_HEX_LEN {
            return Err(ReceiptError::MalformedDigest(format!(
                "expected {} hex characters, found {}",
                DIGEST_HEX_LEN,
                text.len()
            )));
        }
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(text, &mut out)
            .map_err(|e| ReceiptError::MalformedDigest(format!("{text:?}: {e}")))?;
        Ok(Self(out))
    }

    /// Always 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Accepts a raw byte slice; anything but exactly 32 bytes is rejected.
    pub fn from_slice(bytes: &[u8]) -> ReceiptResult<Self> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| {
            ReceiptError::MalformedDigest(format!(
                "expected {} bytes, found {}",
                DIGEST_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Digest(hasher.finalize().into())
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Digest {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
