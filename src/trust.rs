// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Trust policies: which nodes may sign receipts.

use sha2::{Digest as _, Sha256, Sha384, Sha512};

use crate::config::{OID_ECDSA_WITH_SHA256, OID_ECDSA_WITH_SHA384, OID_ECDSA_WITH_SHA512};
use crate::error::{ReceiptError, ReceiptResult};
use crate::signature::{certificate_der, parse_certificate, NodeKey};

/// Decides whether the node that signed a receipt is a member of the service.
///
/// Any `Fn(&str, &[u8]) -> bool` (node id, certificate bytes) is a policy.
pub trait NodeTrust: Sync {
    fn is_trusted(&self, node_id: &str, cert: &[u8]) -> bool;
}

impl<F> NodeTrust for F
where
    F: Fn(&str, &[u8]) -> bool + Sync,
{
    fn is_trusted(&self, node_id: &str, cert: &[u8]) -> bool {
        self(node_id, cert)
    }
}

/// Accepts every node. The caller vouches for the certificate some other way.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustAnyNode;

impl NodeTrust for TrustAnyNode {
    fn is_trusted(&self, _node_id: &str, _cert: &[u8]) -> bool {
        true
    }
}

/// Accepts a node whose certificate was issued (signed) by the service identity.
///
/// Validity periods are not checked.
#[derive(Debug, Clone)]
pub struct ServiceEndorsement {
    service_key: NodeKey,
}

impl ServiceEndorsement {
    /// `service_cert` is the service identity certificate, PEM or DER.
    pub fn from_certificate(service_cert: &[u8]) -> ReceiptResult<Self> {
        Ok(Self {
            service_key: NodeKey::from_certificate(service_cert)?,
        })
    }

    pub fn from_key(service_key: NodeKey) -> Self {
        Self { service_key }
    }

    /// Checks the node certificate's signature against the service key.
    pub fn endorses(&self, node_cert: &[u8]) -> ReceiptResult<bool> {
        let der = certificate_der(node_cert)?;
        let cert = parse_certificate(&der)?;

        let tbs: &[u8] = cert.tbs_certificate.as_ref();
        let algorithm = cert.signature_algorithm.algorithm.to_id_string();
        let prehash = match algorithm.as_str() {
            OID_ECDSA_WITH_SHA256 => Sha256::digest(tbs).to_vec(),
            OID_ECDSA_WITH_SHA384 => Sha384::digest(tbs).to_vec(),
            OID_ECDSA_WITH_SHA512 => Sha512::digest(tbs).to_vec(),
            other => {
                return Err(ReceiptError::CertificateParse(format!(
                    "unsupported certificate signature algorithm {other}"
                )))
            }
        };

        let signature: &[u8] = &cert.signature_value.data;
        Ok(self.service_key.verify_prehash(&prehash, signature))
    }
}

impl NodeTrust for ServiceEndorsement {
    fn is_trusted(&self, node_id: &str, cert: &[u8]) -> bool {
        match self.endorses(cert) {
            Ok(endorsed) => endorsed,
            Err(e) => {
                tracing::warn!("Cannot check endorsement of node {}: {}", node_id, e);
                false
            }
        }
    }
}
