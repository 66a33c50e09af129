// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Node signature verification.
//!
//! Ledger nodes sign the 32-byte Merkle root directly (pre-hashed ECDSA) with
//! the key in their X.509 certificate. Only the cryptographic binding between
//! key, signature and root is checked here; whether the node belongs to the
//! service is a trust-policy question (see `trust`).

use p256::ecdsa::signature::hazmat::PrehashVerifier;
use x509_parser::certificate::X509Certificate;
use x509_parser::x509::SubjectPublicKeyInfo;

use crate::config::{OID_CURVE_P256, OID_CURVE_P384, OID_EC_PUBLIC_KEY};
use crate::digest::Digest;
use crate::error::{ReceiptError, ReceiptResult};

const PEM_MARKER: &[u8] = b"-----BEGIN";

/// ECDSA verifying key taken from a certificate.
#[derive(Debug, Clone)]
pub enum NodeKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

impl NodeKey {
    /// Extracts the subject public key of a PEM or DER certificate.
    pub fn from_certificate(cert: &[u8]) -> ReceiptResult<Self> {
        let der = certificate_der(cert)?;
        let cert = parse_certificate(&der)?;
        Self::from_spki(cert.public_key())
    }

    pub fn from_spki(spki: &SubjectPublicKeyInfo<'_>) -> ReceiptResult<Self> {
        let key_type = spki.algorithm.algorithm.to_id_string();
        if key_type != OID_EC_PUBLIC_KEY {
            return Err(ReceiptError::CertificateParse(format!(
                "unsupported public key algorithm {key_type}"
            )));
        }

        let curve = spki
            .algorithm
            .parameters
            .as_ref()
            .and_then(|params| params.as_oid().ok())
            .map(|oid| oid.to_id_string())
            .ok_or_else(|| ReceiptError::CertificateParse("EC key without a named curve".into()))?;

        let point: &[u8] = &spki.subject_public_key.data;
        let bad_point = |e| ReceiptError::CertificateParse(format!("invalid EC point: {e}"));
        match curve.as_str() {
            OID_CURVE_P256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(point)
                .map(NodeKey::P256)
                .map_err(bad_point),
            OID_CURVE_P384 => p384::ecdsa::VerifyingKey::from_sec1_bytes(point)
                .map(NodeKey::P384)
                .map_err(bad_point),
            other => Err(ReceiptError::CertificateParse(format!("unsupported curve {other}"))),
        }
    }

    pub fn curve_name(&self) -> &'static str {
        match self {
            NodeKey::P256(_) => "secp256r1",
            NodeKey::P384(_) => "secp384r1",
        }
    }

    /// Verifies a DER-encoded ECDSA signature over an already hashed message.
    ///
    /// A signature that is not valid DER is simply not a valid signature.
    pub fn verify_prehash(&self, prehash: &[u8], signature_der: &[u8]) -> bool {
        match self {
            NodeKey::P256(key) => p256::ecdsa::Signature::from_der(signature_der)
                .map(|sig| key.verify_prehash(prehash, &sig).is_ok())
                .unwrap_or(false),
            NodeKey::P384(key) => p384::ecdsa::Signature::from_der(signature_der)
                .map(|sig| key.verify_prehash(prehash, &sig).is_ok())
                .unwrap_or(false),
        }
    }
}

/// Certificate bytes as DER; PEM input is unwrapped, anything else passes through.
pub fn certificate_der(cert: &[u8]) -> ReceiptResult<Vec<u8>> {
    let start = cert
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(cert.len());
    let trimmed = &cert[start..];
    if !trimmed.starts_with(PEM_MARKER) {
        return Ok(cert.to_vec());
    }
    let (_, pem) = x509_parser::pem::parse_x509_pem(trimmed)
        .map_err(|e| ReceiptError::CertificateParse(format!("invalid PEM: {e:?}")))?;
    Ok(pem.contents)
}

pub(crate) fn parse_certificate(der: &[u8]) -> ReceiptResult<X509Certificate<'_>> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| ReceiptError::CertificateParse(format!("invalid X.509 DER: {e}")))?;
    Ok(cert)
}

/// Does `signature` verify over `root` under the certificate's key?
///
/// Certificate problems are errors; a wrong signature is `Ok(false)`.
pub fn verify_root(cert: &[u8], signature: &[u8], root: &Digest) -> ReceiptResult<bool> {
    let key = NodeKey::from_certificate(cert)?;
    Ok(key.verify_prehash(root.as_bytes(), signature))
}
