// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Length in bytes of every digest in a receipt (SHA-256 output).
pub const DIGEST_LEN: usize = 32;

/// Length of a digest in its textual (hex) form.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// Leaf preimage: write-set digest || commit-evidence digest || claims digest.
pub const LEAF_PREIMAGE_LEN: usize = DIGEST_LEN * 3;

/// Prefix of every commit evidence string (`ce:<term>.<revision>:<nonce>`).
pub const COMMIT_EVIDENCE_PREFIX: &str = "ce:";

/// id-ecPublicKey
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
/// secp256r1 / prime256v1
pub const OID_CURVE_P256: &str = "1.2.840.10045.3.1.7";
/// secp384r1
pub const OID_CURVE_P384: &str = "1.3.132.0.34";

pub const OID_ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
pub const OID_ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
pub const OID_ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";
