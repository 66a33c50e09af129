// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Leaf construction.
//!
//! The ledger commits `SHA256(write_set_digest || SHA256(commit_evidence) || claims_digest)`
//! as the Merkle leaf of every transaction. The concatenation order is fixed by
//! the committing side and must not change.

use serde::{Deserialize, Serialize};

use crate::config::{COMMIT_EVIDENCE_PREFIX, DIGEST_LEN, LEAF_PREIMAGE_LEN};
use crate::digest::{sha256, Digest};

/// Ledger position of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxId {
    pub term: u64,
    pub revision: u64,
}

/// `ce:<term>.<revision>:<nonce-hex>`, hashed exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEvidence(pub String);

impl CommitEvidence {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn digest(&self) -> Digest {
        sha256(&[self.0.as_bytes()])
    }

    /// Ledger position named by the evidence, if it is well-formed.
    pub fn tx_id(&self) -> Option<TxId> {
        let rest = self.0.strip_prefix(COMMIT_EVIDENCE_PREFIX)?;
        let (position, nonce) = rest.split_once(':')?;
        if nonce.is_empty() || !nonce.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let (term, revision) = position.split_once('.')?;
        Some(TxId {
            term: term.parse().ok()?,
            revision: revision.parse().ok()?,
        })
    }
}

/// The three inputs of a leaf. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafComponents {
    pub write_set_digest: Digest,
    pub commit_evidence: CommitEvidence,
    pub claims_digest: Digest,
}

impl LeafComponents {
    pub fn leaf(&self) -> Digest {
        build_leaf(
            &self.write_set_digest,
            self.commit_evidence.as_str(),
            &self.claims_digest,
        )
    }
}

pub fn build_leaf(write_set_digest: &Digest, commit_evidence: &str, claims_digest: &Digest) -> Digest {
    let commit_evidence_digest = sha256(&[commit_evidence.as_bytes()]);

    let mut preimage = [0u8; LEAF_PREIMAGE_LEN];
    preimage[..DIGEST_LEN].copy_from_slice(write_set_digest.as_bytes());
    preimage[DIGEST_LEN..2 * DIGEST_LEN].copy_from_slice(commit_evidence_digest.as_bytes());
    preimage[2 * DIGEST_LEN..].copy_from_slice(claims_digest.as_bytes());

    sha256(&[&preimage])
}
