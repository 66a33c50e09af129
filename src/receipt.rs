// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Decoded receipts.

use crate::digest::Digest;
use crate::leaf::{LeafComponents, TxId};
use crate::proof::{fold_root, ProofStep};

/// A receipt with every digest decoded and every proof step tagged.
///
/// Built from the wire form by `Receipt::try_from(wire::ReceiptJson)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub node_id: String,
    /// PEM or DER certificate of the signing node.
    pub cert: Vec<u8>,
    /// DER ECDSA signature over the root.
    pub signature: Vec<u8>,
    pub leaf_components: LeafComponents,
    /// Leaf-adjacent step first.
    pub proof: Vec<ProofStep>,
}

impl Receipt {
    pub fn leaf(&self) -> Digest {
        self.leaf_components.leaf()
    }

    pub fn root(&self) -> Digest {
        fold_root(&self.leaf(), &self.proof)
    }

    pub fn tx_id(&self) -> Option<TxId> {
        self.leaf_components.commit_evidence.tx_id()
    }
}
