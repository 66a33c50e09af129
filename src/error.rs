// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

use crate::digest::Digest;

/// Why a receipt was rejected.
///
/// Every failure is terminal for the verification call that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    /// A digest field is not exactly 64 hex characters.
    #[error("Malformed digest: {0}")]
    MalformedDigest(String),

    /// Missing leaf components, bad proof direction tag, undecodable signature, ...
    #[error("Malformed receipt: {0}")]
    MalformedReceipt(String),

    #[error("Unsupported operation kind: {0}")]
    UnsupportedOperationKind(String),

    #[error("Certificate parse error: {0}")]
    CertificateParse(String),

    /// The signature does not verify over the reconstructed root.
    #[error("Signature over reconstructed root is invalid")]
    SignatureInvalid,

    /// The trust policy refused the signing node.
    #[error("Node {0} is not trusted")]
    UntrustedNode(String),

    /// The receipt commits to a different request/response than the one supplied.
    #[error("Claims digest mismatch: receipt commits to {expected}, operation hashes to {computed}")]
    ClaimsMismatch { expected: Digest, computed: Digest },
}

impl ReceiptError {
    /// True when the rejection means the service produced a bad attestation,
    /// as opposed to the caller handing over malformed input.
    pub fn is_service_fault(&self) -> bool {
        matches!(
            self,
            ReceiptError::SignatureInvalid
                | ReceiptError::UntrustedNode(_)
                | ReceiptError::ClaimsMismatch { .. }
        )
    }

    /// Stable snake_case name of the failure kind, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ReceiptError::MalformedDigest(_) => "malformed_digest",
            ReceiptError::MalformedReceipt(_) => "malformed_receipt",
            ReceiptError::UnsupportedOperationKind(_) => "unsupported_operation_kind",
            ReceiptError::CertificateParse(_) => "certificate_parse_error",
            ReceiptError::SignatureInvalid => "signature_invalid",
            ReceiptError::UntrustedNode(_) => "untrusted_node",
            ReceiptError::ClaimsMismatch { .. } => "claims_mismatch",
        }
    }
}

pub type ReceiptResult<T> = core::result::Result<T, ReceiptError>;
