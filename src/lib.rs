// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! ledger-receipt: offline verification of key-value ledger receipts.
//!
//! A receipt proves that one put / delete_range / txn was committed at a
//! specific ledger position. Verification rebuilds the Merkle leaf, folds the
//! inclusion proof into a root, checks the node's ECDSA signature over that
//! root and finally binds the receipt to the caller's own request/response.

pub mod config;
pub mod error;
pub mod digest;
pub mod leaf;
pub mod proof;
pub mod rpc;
pub mod claims;
pub mod signature;
pub mod trust;
pub mod receipt;
pub mod wire;
pub mod verify;

pub use claims::{Operation, OperationKind};
pub use digest::Digest;
pub use error::{ReceiptError, ReceiptResult};
pub use receipt::Receipt;
pub use trust::{NodeTrust, ServiceEndorsement, TrustAnyNode};
pub use verify::{ReceiptVerifier, VerifiedReceipt};

#[cfg(test)]
pub mod tests;
