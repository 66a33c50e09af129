// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction messages.
//!
//! Protobuf `oneof`s are flattened into their parent object in the JSON
//! mapping, so every message carrying one goes through a small JSON proxy.

use serde::{Deserialize, Serialize};

use super::json::{self, ProtoEnum};
use super::kv::{
    DeleteRangeRequest, DeleteRangeResponse, PutRequest, PutResponse, RangeRequest, RangeResponse,
    ResponseHeader,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CompareResult {
    Equal = 0,
    Greater = 1,
    Less = 2,
    NotEqual = 3,
}

impl ProtoEnum for CompareResult {
    const NAMES: &'static [&'static str] = &["EQUAL", "GREATER", "LESS", "NOT_EQUAL"];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CompareTarget {
    Version = 0,
    Create = 1,
    Mod = 2,
    Value = 3,
    Lease = 4,
}

impl ProtoEnum for CompareTarget {
    const NAMES: &'static [&'static str] = &["VERSION", "CREATE", "MOD", "VALUE", "LEASE"];
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(try_from = "CompareJson", into = "CompareJson")]
pub struct Compare {
    #[prost(enumeration = "CompareResult", tag = "1")]
    pub result: i32,
    #[prost(enumeration = "CompareTarget", tag = "2")]
    pub target: i32,
    #[prost(bytes = "vec", tag = "3")]
    pub key: Vec<u8>,
    #[prost(oneof = "compare::TargetUnion", tags = "4, 5, 6, 7, 8")]
    pub target_union: Option<compare::TargetUnion>,
    #[prost(bytes = "vec", tag = "64")]
    pub range_end: Vec<u8>,
}

pub mod compare {
    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum TargetUnion {
        #[prost(int64, tag = "4")]
        Version(i64),
        #[prost(int64, tag = "5")]
        CreateRevision(i64),
        #[prost(int64, tag = "6")]
        ModRevision(i64),
        #[prost(bytes = "vec", tag = "7")]
        Value(Vec<u8>),
        #[prost(int64, tag = "8")]
        Lease(i64),
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CompareJson {
    #[serde(
        serialize_with = "json::serialize_enum::<CompareResult, _>",
        deserialize_with = "json::deserialize_enum::<CompareResult, _>"
    )]
    result: i32,
    #[serde(
        serialize_with = "json::serialize_enum::<CompareTarget, _>",
        deserialize_with = "json::deserialize_enum::<CompareTarget, _>"
    )]
    target: i32,
    #[serde(with = "json::base64_bytes")]
    key: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opt_number")]
    version: Option<i64>,
    #[serde(alias = "create_revision", skip_serializing_if = "Option::is_none", deserialize_with = "opt_number")]
    create_revision: Option<i64>,
    #[serde(alias = "mod_revision", skip_serializing_if = "Option::is_none", deserialize_with = "opt_number")]
    mod_revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opt_bytes")]
    value: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "opt_number")]
    lease: Option<i64>,
    #[serde(alias = "range_end", with = "json::base64_bytes")]
    range_end: Vec<u8>,
}

fn opt_number<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    json::number::deserialize(deserializer).map(Some)
}

fn opt_bytes<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    json::base64_bytes::deserialize(deserializer).map(Some)
}

impl TryFrom<CompareJson> for Compare {
    type Error = String;

    fn try_from(j: CompareJson) -> Result<Self, Self::Error> {
        use compare::TargetUnion;

        let mut targets = [
            j.version.map(TargetUnion::Version),
            j.create_revision.map(TargetUnion::CreateRevision),
            j.mod_revision.map(TargetUnion::ModRevision),
            j.value.map(TargetUnion::Value),
            j.lease.map(TargetUnion::Lease),
        ]
        .into_iter()
        .flatten();
        let target_union = targets.next();
        if targets.next().is_some() {
            return Err("compare sets more than one target value".to_string());
        }

        Ok(Compare {
            result: j.result,
            target: j.target,
            key: j.key,
            target_union,
            range_end: j.range_end,
        })
    }
}

impl From<Compare> for CompareJson {
    fn from(c: Compare) -> Self {
        use compare::TargetUnion;

        let mut j = CompareJson {
            result: c.result,
            target: c.target,
            key: c.key,
            range_end: c.range_end,
            ..Default::default()
        };
        match c.target_union {
            Some(TargetUnion::Version(v)) => j.version = Some(v),
            Some(TargetUnion::CreateRevision(v)) => j.create_revision = Some(v),
            Some(TargetUnion::ModRevision(v)) => j.mod_revision = Some(v),
            Some(TargetUnion::Value(v)) => j.value = Some(v),
            Some(TargetUnion::Lease(v)) => j.lease = Some(v),
            None => {}
        }
        j
    }
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(try_from = "RequestOpJson", into = "RequestOpJson")]
pub struct RequestOp {
    #[prost(oneof = "request_op::Request", tags = "1, 2, 3, 4")]
    pub request: Option<request_op::Request>,
}

pub mod request_op {
    use super::*;

    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        RequestRange(RangeRequest),
        #[prost(message, tag = "2")]
        RequestPut(PutRequest),
        #[prost(message, tag = "3")]
        RequestDeleteRange(DeleteRangeRequest),
        #[prost(message, tag = "4")]
        RequestTxn(TxnRequest),
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RequestOpJson {
    #[serde(alias = "request_range", skip_serializing_if = "Option::is_none")]
    request_range: Option<RangeRequest>,
    #[serde(alias = "request_put", skip_serializing_if = "Option::is_none")]
    request_put: Option<PutRequest>,
    #[serde(alias = "request_delete_range", skip_serializing_if = "Option::is_none")]
    request_delete_range: Option<DeleteRangeRequest>,
    #[serde(alias = "request_txn", skip_serializing_if = "Option::is_none")]
    request_txn: Option<TxnRequest>,
}

impl TryFrom<RequestOpJson> for RequestOp {
    type Error = String;

    fn try_from(j: RequestOpJson) -> Result<Self, Self::Error> {
        use request_op::Request;

        let mut ops = [
            j.request_range.map(Request::RequestRange),
            j.request_put.map(Request::RequestPut),
            j.request_delete_range.map(Request::RequestDeleteRange),
            j.request_txn.map(Request::RequestTxn),
        ]
        .into_iter()
        .flatten();
        let request = ops.next();
        if ops.next().is_some() {
            return Err("request op sets more than one request".to_string());
        }
        Ok(RequestOp { request })
    }
}

impl From<RequestOp> for RequestOpJson {
    fn from(op: RequestOp) -> Self {
        use request_op::Request;

        let mut j = RequestOpJson::default();
        match op.request {
            Some(Request::RequestRange(r)) => j.request_range = Some(r),
            Some(Request::RequestPut(r)) => j.request_put = Some(r),
            Some(Request::RequestDeleteRange(r)) => j.request_delete_range = Some(r),
            Some(Request::RequestTxn(r)) => j.request_txn = Some(r),
            None => {}
        }
        j
    }
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(try_from = "ResponseOpJson", into = "ResponseOpJson")]
pub struct ResponseOp {
    #[prost(oneof = "response_op::Response", tags = "1, 2, 3, 4")]
    pub response: Option<response_op::Response>,
}

pub mod response_op {
    use super::*;

    #[derive(Clone, PartialEq, Eq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "1")]
        ResponseRange(RangeResponse),
        #[prost(message, tag = "2")]
        ResponsePut(PutResponse),
        #[prost(message, tag = "3")]
        ResponseDeleteRange(DeleteRangeResponse),
        #[prost(message, tag = "4")]
        ResponseTxn(TxnResponse),
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResponseOpJson {
    #[serde(alias = "response_range", skip_serializing_if = "Option::is_none")]
    response_range: Option<RangeResponse>,
    #[serde(alias = "response_put", skip_serializing_if = "Option::is_none")]
    response_put: Option<PutResponse>,
    #[serde(alias = "response_delete_range", skip_serializing_if = "Option::is_none")]
    response_delete_range: Option<DeleteRangeResponse>,
    #[serde(alias = "response_txn", skip_serializing_if = "Option::is_none")]
    response_txn: Option<TxnResponse>,
}

impl TryFrom<ResponseOpJson> for ResponseOp {
    type Error = String;

    fn try_from(j: ResponseOpJson) -> Result<Self, Self::Error> {
        use response_op::Response;

        let mut ops = [
            j.response_range.map(Response::ResponseRange),
            j.response_put.map(Response::ResponsePut),
            j.response_delete_range.map(Response::ResponseDeleteRange),
            j.response_txn.map(Response::ResponseTxn),
        ]
        .into_iter()
        .flatten();
        let response = ops.next();
        if ops.next().is_some() {
            return Err("response op sets more than one response".to_string());
        }
        Ok(ResponseOp { response })
    }
}

impl From<ResponseOp> for ResponseOpJson {
    fn from(op: ResponseOp) -> Self {
        use response_op::Response;

        let mut j = ResponseOpJson::default();
        match op.response {
            Some(Response::ResponseRange(r)) => j.response_range = Some(r),
            Some(Response::ResponsePut(r)) => j.response_put = Some(r),
            Some(Response::ResponseDeleteRange(r)) => j.response_delete_range = Some(r),
            Some(Response::ResponseTxn(r)) => j.response_txn = Some(r),
            None => {}
        }
        j
    }
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxnRequest {
    #[prost(message, repeated, tag = "1")]
    pub compare: Vec<Compare>,
    #[prost(message, repeated, tag = "2")]
    pub success: Vec<RequestOp>,
    #[prost(message, repeated, tag = "3")]
    pub failure: Vec<RequestOp>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxnResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(bool, tag = "2")]
    pub succeeded: bool,
    #[prost(message, repeated, tag = "3")]
    pub responses: Vec<ResponseOp>,
}
