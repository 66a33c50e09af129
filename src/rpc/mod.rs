// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! etcd-compatible request/response shapes.
//!
//! Each message derives both `prost::Message` (canonical bytes for claims
//! hashing) and serde (the JSON served over HTTP).

pub mod json;
pub mod kv;
pub mod txn;

pub use kv::{
    DeleteRangeRequest, DeleteRangeResponse, KeyValue, PutRequest, PutResponse, RangeRequest,
    RangeResponse, ResponseHeader, SortOrder, SortTarget,
};
pub use txn::{Compare, CompareResult, CompareTarget, RequestOp, ResponseOp, TxnRequest, TxnResponse};
