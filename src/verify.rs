// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Receipt verification.
//!
//! Gates, in order, stopping at the first failure:
//! 1. decode (wire form only) -> `MalformedReceipt`
//! 2. leaf from leaf components
//! 3. root from leaf + proof
//! 4. node signature over root -> `CertificateParse` / `SignatureInvalid`
//! 5. trust policy accepts the node -> `UntrustedNode`
//! 6. claims digest of the caller's operation equals the leaf's -> `ClaimsMismatch`
//!
//! Verification is a pure function of its inputs; a verifier can be shared
//! across threads freely.

use rayon::prelude::*;
use serde::Serialize;

use crate::claims::Operation;
use crate::digest::Digest;
use crate::error::{ReceiptError, ReceiptResult};
use crate::leaf::TxId;
use crate::proof::fold_root;
use crate::receipt::Receipt;
use crate::signature::verify_root;
use crate::trust::{NodeTrust, TrustAnyNode};
use crate::wire::ReceiptJson;

/// What an accepted receipt attests to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedReceipt {
    pub node_id: String,
    pub leaf: Digest,
    pub root: Digest,
    /// Ledger position from the commit evidence, when it parses.
    pub tx_id: Option<TxId>,
}

#[derive(Debug, Clone, Default)]
pub struct ReceiptVerifier<T = TrustAnyNode> {
    trust: T,
}

impl ReceiptVerifier<TrustAnyNode> {
    pub fn new() -> Self {
        Self { trust: TrustAnyNode }
    }
}

impl<T: NodeTrust> ReceiptVerifier<T> {
    pub fn with_trust(trust: T) -> Self {
        Self { trust }
    }

    pub fn verify(&self, receipt: &Receipt, operation: &Operation) -> ReceiptResult<VerifiedReceipt> {
        let result = self.run_gates(receipt, operation);
        if let Err(e) = &result {
            tracing::warn!(
                "Rejected {} receipt from node {}: {}",
                operation.kind(),
                receipt.node_id,
                e
            );
        }
        result
    }

    /// Same as [`verify`](Self::verify), starting from the undecoded wire form.
    pub fn verify_json(&self, receipt: ReceiptJson, operation: &Operation) -> ReceiptResult<VerifiedReceipt> {
        let receipt = Receipt::try_from(receipt).inspect_err(|e| {
            tracing::warn!("Rejected {} receipt: {}", operation.kind(), e);
        })?;
        self.verify(&receipt, operation)
    }

    /// Verifies independent receipts in parallel. Output order matches input order.
    pub fn verify_batch(&self, items: &[(Receipt, Operation)]) -> Vec<ReceiptResult<VerifiedReceipt>> {
        items
            .par_iter()
            .map(|(receipt, operation)| self.verify(receipt, operation))
            .collect()
    }

    fn run_gates(&self, receipt: &Receipt, operation: &Operation) -> ReceiptResult<VerifiedReceipt> {
        let components = &receipt.leaf_components;

        let leaf = components.leaf();
        tracing::debug!("leaf {}", leaf);

        let root = fold_root(&leaf, &receipt.proof);
        tracing::debug!("root {} ({} proof steps)", root, receipt.proof.len());

        if !verify_root(&receipt.cert, &receipt.signature, &root)? {
            return Err(ReceiptError::SignatureInvalid);
        }
        tracing::debug!("signature by node {} verified", receipt.node_id);

        if !self.trust.is_trusted(&receipt.node_id, &receipt.cert) {
            return Err(ReceiptError::UntrustedNode(receipt.node_id.clone()));
        }

        let computed = operation.claims_digest();
        if computed != components.claims_digest {
            return Err(ReceiptError::ClaimsMismatch {
                expected: components.claims_digest,
                computed,
            });
        }
        tracing::debug!("claims digest {} bound to {}", computed, operation.kind());

        Ok(VerifiedReceipt {
            node_id: receipt.node_id.clone(),
            leaf,
            root,
            tx_id: receipt.tx_id(),
        })
    }
}
