// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Key-value request/response messages (etcd `rpc.proto` / `kv.proto` subset).

use serde::{Deserialize, Serialize};

use super::json::{self, ProtoEnum};

/// Echoed by every response. Not part of the claims: it is stripped before hashing.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseHeader {
    #[prost(uint64, tag = "1")]
    #[serde(alias = "cluster_id", with = "json::number")]
    pub cluster_id: u64,
    #[prost(uint64, tag = "2")]
    #[serde(alias = "member_id", with = "json::number")]
    pub member_id: u64,
    #[prost(int64, tag = "3")]
    #[serde(with = "json::number")]
    pub revision: i64,
    #[prost(uint64, tag = "4")]
    #[serde(alias = "raft_term", with = "json::number")]
    pub raft_term: u64,
    #[prost(int64, tag = "5")]
    #[serde(alias = "committed_revision", with = "json::number")]
    pub committed_revision: i64,
    #[prost(uint64, tag = "6")]
    #[serde(alias = "committed_raft_term", with = "json::number")]
    pub committed_raft_term: u64,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyValue {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "json::base64_bytes")]
    pub key: Vec<u8>,
    #[prost(int64, tag = "2")]
    #[serde(alias = "create_revision", with = "json::number")]
    pub create_revision: i64,
    #[prost(int64, tag = "3")]
    #[serde(alias = "mod_revision", with = "json::number")]
    pub mod_revision: i64,
    #[prost(int64, tag = "4")]
    #[serde(with = "json::number")]
    pub version: i64,
    #[prost(bytes = "vec", tag = "5")]
    #[serde(with = "json::base64_bytes")]
    pub value: Vec<u8>,
    #[prost(int64, tag = "6")]
    #[serde(with = "json::number")]
    pub lease: i64,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PutRequest {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "json::base64_bytes")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "json::base64_bytes")]
    pub value: Vec<u8>,
    #[prost(int64, tag = "3")]
    #[serde(with = "json::number")]
    pub lease: i64,
    #[prost(bool, tag = "4")]
    #[serde(alias = "prev_kv")]
    pub prev_kv: bool,
    #[prost(bool, tag = "5")]
    #[serde(alias = "ignore_value")]
    pub ignore_value: bool,
    #[prost(bool, tag = "6")]
    #[serde(alias = "ignore_lease")]
    pub ignore_lease: bool,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PutResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    #[serde(alias = "prev_kv")]
    pub prev_kv: Option<KeyValue>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRangeRequest {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "json::base64_bytes")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(alias = "range_end", with = "json::base64_bytes")]
    pub range_end: Vec<u8>,
    #[prost(bool, tag = "3")]
    #[serde(alias = "prev_kv")]
    pub prev_kv: bool,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRangeResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(int64, tag = "2")]
    #[serde(with = "json::number")]
    pub deleted: i64,
    #[prost(message, repeated, tag = "3")]
    #[serde(alias = "prev_kvs")]
    pub prev_kvs: Vec<KeyValue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SortOrder {
    None = 0,
    Ascend = 1,
    Descend = 2,
}

impl ProtoEnum for SortOrder {
    const NAMES: &'static [&'static str] = &["NONE", "ASCEND", "DESCEND"];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SortTarget {
    Key = 0,
    Version = 1,
    Create = 2,
    Mod = 3,
    Value = 4,
}

impl ProtoEnum for SortTarget {
    const NAMES: &'static [&'static str] = &["KEY", "VERSION", "CREATE", "MOD", "VALUE"];
}

/// Reads only appear inside transactions; a bare range commits nothing.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeRequest {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(with = "json::base64_bytes")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(alias = "range_end", with = "json::base64_bytes")]
    pub range_end: Vec<u8>,
    #[prost(int64, tag = "3")]
    #[serde(with = "json::number")]
    pub limit: i64,
    #[prost(int64, tag = "4")]
    #[serde(with = "json::number")]
    pub revision: i64,
    #[prost(enumeration = "SortOrder", tag = "5")]
    #[serde(
        alias = "sort_order",
        serialize_with = "json::serialize_enum::<SortOrder, _>",
        deserialize_with = "json::deserialize_enum::<SortOrder, _>"
    )]
    pub sort_order: i32,
    #[prost(enumeration = "SortTarget", tag = "6")]
    #[serde(
        alias = "sort_target",
        serialize_with = "json::serialize_enum::<SortTarget, _>",
        deserialize_with = "json::deserialize_enum::<SortTarget, _>"
    )]
    pub sort_target: i32,
    #[prost(bool, tag = "7")]
    pub serializable: bool,
    #[prost(bool, tag = "8")]
    #[serde(alias = "keys_only")]
    pub keys_only: bool,
    #[prost(bool, tag = "9")]
    #[serde(alias = "count_only")]
    pub count_only: bool,
    #[prost(int64, tag = "10")]
    #[serde(alias = "min_mod_revision", with = "json::number")]
    pub min_mod_revision: i64,
    #[prost(int64, tag = "11")]
    #[serde(alias = "max_mod_revision", with = "json::number")]
    pub max_mod_revision: i64,
    #[prost(int64, tag = "12")]
    #[serde(alias = "min_create_revision", with = "json::number")]
    pub min_create_revision: i64,
    #[prost(int64, tag = "13")]
    #[serde(alias = "max_create_revision", with = "json::number")]
    pub max_create_revision: i64,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeResponse {
    #[prost(message, optional, tag = "1")]
    pub header: Option<ResponseHeader>,
    #[prost(message, repeated, tag = "2")]
    pub kvs: Vec<KeyValue>,
    #[prost(bool, tag = "3")]
    pub more: bool,
    #[prost(int64, tag = "4")]
    #[serde(with = "json::number")]
    pub count: i64,
}
