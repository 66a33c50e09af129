// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON wire form of receipts and its normalization.
//!
//! Shape served by `/v3/receipt/get_receipt`:
//!
//! ```json
//! { "header": { ... },
//!   "receipt": { "cert": "<PEM>", "signature": "<base64 DER>", "nodeId": "<hex>",
//!                "txReceipt": { "leafComponents": { "writeSetDigest": "<hex>",
//!                                                   "commitEvidence": "ce:2.11:<hex>",
//!                                                   "claimsDigest": "<hex>" },
//!                               "proof": [ { "left": "<hex>" }, { "right": "<hex>" } ] } } }
//! ```
//!
//! Converting to [`Receipt`] decodes every digest and the signature and
//! resolves each proof entry's direction. Nothing is defaulted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::{ReceiptError, ReceiptResult};
use crate::leaf::{CommitEvidence, LeafComponents};
use crate::proof::{Direction, ProofStep};
use crate::receipt::Receipt;
use crate::rpc::ResponseHeader;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetReceiptResponse {
    #[serde(default)]
    pub header: Option<ResponseHeader>,
    pub receipt: ReceiptJson,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptJson {
    pub cert: Option<String>,
    pub signature: Option<String>,
    #[serde(alias = "node_id")]
    pub node_id: Option<String>,
    #[serde(alias = "tx_receipt")]
    pub tx_receipt: Option<TxReceiptJson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxReceiptJson {
    #[serde(alias = "leaf_components")]
    pub leaf_components: Option<LeafComponentsJson>,
    pub proof: Option<Vec<ProofStepJson>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeafComponentsJson {
    #[serde(alias = "write_set_digest")]
    pub write_set_digest: Option<String>,
    #[serde(alias = "commit_evidence")]
    pub commit_evidence: Option<String>,
    #[serde(alias = "claims_digest")]
    pub claims_digest: Option<String>,
}

/// `{"left": hex}` or `{"right": hex}`. Key presence is the direction.
///
/// Kept as the raw object so that a second key, even one set to `null`,
/// is seen by [`to_step`](Self::to_step).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProofStepJson(pub serde_json::Map<String, serde_json::Value>);

fn malformed(msg: impl Into<String>) -> ReceiptError {
    ReceiptError::MalformedReceipt(msg.into())
}

fn required<T>(value: Option<T>, field: &str) -> ReceiptResult<T> {
    value.ok_or_else(|| malformed(format!("missing {field}")))
}

fn decode_digest(text: &str, field: &str) -> ReceiptResult<Digest> {
    Digest::from_hex(text).map_err(|e| malformed(format!("{field}: {e}")))
}

impl ProofStepJson {
    pub fn to_step(&self, index: usize) -> ReceiptResult<ProofStep> {
        let mut entries = self.0.iter();
        let (tag, value) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(malformed(format!("proof[{index}]: missing direction tag"))),
            (Some(_), Some(_)) => {
                let tags: Vec<&str> = self.0.keys().map(String::as_str).collect();
                return Err(malformed(format!(
                    "proof[{index}]: expected one direction tag, found {tags:?}"
                )));
            }
        };
        let direction = match tag.as_str() {
            "left" => Direction::Left,
            "right" => Direction::Right,
            other => return Err(malformed(format!("proof[{index}]: unknown direction tag {other:?}"))),
        };
        let hex = value
            .as_str()
            .ok_or_else(|| malformed(format!("proof[{index}].{tag}: expected a hex string")))?;
        Ok(ProofStep {
            direction,
            sibling: decode_digest(hex, &format!("proof[{index}]"))?,
        })
    }
}

impl TryFrom<LeafComponentsJson> for LeafComponents {
    type Error = ReceiptError;

    fn try_from(j: LeafComponentsJson) -> ReceiptResult<Self> {
        let write_set_digest = required(j.write_set_digest, "leafComponents.writeSetDigest")?;
        let commit_evidence = required(j.commit_evidence, "leafComponents.commitEvidence")?;
        let claims_digest = required(j.claims_digest, "leafComponents.claimsDigest")?;

        Ok(LeafComponents {
            write_set_digest: decode_digest(&write_set_digest, "writeSetDigest")?,
            commit_evidence: CommitEvidence(commit_evidence),
            claims_digest: decode_digest(&claims_digest, "claimsDigest")?,
        })
    }
}

impl TryFrom<ReceiptJson> for Receipt {
    type Error = ReceiptError;

    fn try_from(j: ReceiptJson) -> ReceiptResult<Self> {
        let node_id = required(j.node_id, "nodeId")?;
        let cert = required(j.cert, "cert")?;
        let signature = required(j.signature, "signature")?;
        let tx_receipt = required(j.tx_receipt, "txReceipt")?;
        let leaf_components = required(tx_receipt.leaf_components, "txReceipt.leafComponents")?;
        let proof = required(tx_receipt.proof, "txReceipt.proof")?;

        let signature = STANDARD
            .decode(signature.trim())
            .map_err(|e| malformed(format!("signature is not base64: {e}")))?;

        let proof = proof
            .iter()
            .enumerate()
            .map(|(i, step)| step.to_step(i))
            .collect::<ReceiptResult<Vec<_>>>()?;

        Ok(Receipt {
            node_id,
            cert: cert.into_bytes(),
            signature,
            leaf_components: LeafComponents::try_from(leaf_components)?,
            proof,
        })
    }
}

/// Parses either a full `GetReceiptResponse` envelope or a bare receipt object.
pub fn parse_receipt_json(json: &str) -> ReceiptResult<ReceiptJson> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    if value.get("receipt").is_some_and(serde_json::Value::is_object) {
        let envelope =
            GetReceiptResponse::deserialize(&value).map_err(|e| malformed(format!("envelope: {e}")))?;
        return Ok(envelope.receipt);
    }
    ReceiptJson::deserialize(&value).map_err(|e| malformed(e.to_string()))
}

pub fn parse_receipt(json: &str) -> ReceiptResult<Receipt> {
    Receipt::try_from(parse_receipt_json(json)?)
}
