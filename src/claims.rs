// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Claims binding.
//!
//! When the ledger commits a write it also commits the SHA-256 of a
//! `ReceiptClaims` protobuf holding the request and the response (header
//! cleared). Recomputing that digest from the caller's own request/response
//! ties a receipt to exactly one operation.

use core::fmt;
use core::str::FromStr;

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::digest::{sha256, Digest};
use crate::error::{ReceiptError, ReceiptResult};
use crate::rpc::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, TxnRequest, TxnResponse,
};

/// Operations that commit a transaction and therefore carry claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Put,
    DeleteRange,
    Txn,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [OperationKind::Put, OperationKind::DeleteRange, OperationKind::Txn];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Put => "put",
            OperationKind::DeleteRange => "delete_range",
            OperationKind::Txn => "txn",
        }
    }
}

impl FromStr for OperationKind {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ReceiptError::UnsupportedOperationKind(s.to_string()))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `lskvserverpb.ReceiptClaims`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReceiptClaims {
    #[prost(oneof = "receipt_claims::Request", tags = "1, 2, 3")]
    pub request: Option<receipt_claims::Request>,
    #[prost(oneof = "receipt_claims::Response", tags = "4, 5, 6")]
    pub response: Option<receipt_claims::Response>,
}

pub mod receipt_claims {
    use super::*;

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        RequestPut(PutRequest),
        #[prost(message, tag = "2")]
        RequestDeleteRange(DeleteRangeRequest),
        #[prost(message, tag = "3")]
        RequestTxn(TxnRequest),
    }

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "4")]
        ResponsePut(PutResponse),
        #[prost(message, tag = "5")]
        ResponseDeleteRange(DeleteRangeResponse),
        #[prost(message, tag = "6")]
        ResponseTxn(TxnResponse),
    }
}

/// A request paired with the response the service returned for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Put {
        request: PutRequest,
        response: PutResponse,
    },
    DeleteRange {
        request: DeleteRangeRequest,
        response: DeleteRangeResponse,
    },
    Txn {
        request: TxnRequest,
        response: TxnResponse,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Put { .. } => OperationKind::Put,
            Operation::DeleteRange { .. } => OperationKind::DeleteRange,
            Operation::Txn { .. } => OperationKind::Txn,
        }
    }

    /// Builds the operation from protobuf-JSON request and response bodies.
    pub fn from_json(
        kind: OperationKind,
        request: &serde_json::Value,
        response: &serde_json::Value,
    ) -> ReceiptResult<Self> {
        fn parse<T: serde::de::DeserializeOwned>(what: &str, value: &serde_json::Value) -> ReceiptResult<T> {
            T::deserialize(value).map_err(|e| ReceiptError::MalformedReceipt(format!("{what}: {e}")))
        }

        Ok(match kind {
            OperationKind::Put => Operation::Put {
                request: parse("put request", request)?,
                response: parse("put response", response)?,
            },
            OperationKind::DeleteRange => Operation::DeleteRange {
                request: parse("delete_range request", request)?,
                response: parse("delete_range response", response)?,
            },
            OperationKind::Txn => Operation::Txn {
                request: parse("txn request", request)?,
                response: parse("txn response", response)?,
            },
        })
    }

    /// The claims record as the ledger built it: top-level response header cleared.
    pub fn claims(&self) -> ReceiptClaims {
        use receipt_claims::{Request, Response};

        let (request, response) = match self {
            Operation::Put { request, response } => (
                Request::RequestPut(request.clone()),
                Response::ResponsePut(PutResponse { header: None, ..response.clone() }),
            ),
            Operation::DeleteRange { request, response } => (
                Request::RequestDeleteRange(request.clone()),
                Response::ResponseDeleteRange(DeleteRangeResponse { header: None, ..response.clone() }),
            ),
            Operation::Txn { request, response } => (
                Request::RequestTxn(request.clone()),
                Response::ResponseTxn(TxnResponse { header: None, ..response.clone() }),
            ),
        };

        ReceiptClaims {
            request: Some(request),
            response: Some(response),
        }
    }

    pub fn claims_digest(&self) -> Digest {
        sha256(&[&self.claims().encode_to_vec()])
    }
}

/// Claims digest for an operation named by its string tag.
pub fn claims_digest(
    kind: &str,
    request: &serde_json::Value,
    response: &serde_json::Value,
) -> ReceiptResult<Digest> {
    let kind: OperationKind = kind.parse()?;
    Ok(Operation::from_json(kind, request, response)?.claims_digest())
}
