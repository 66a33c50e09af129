// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protobuf-JSON field codecs.
//!
//! The ledger serves the canonical protobuf JSON mapping: `bytes` as base64,
//! 64-bit integers as decimal strings, enums by name. Clients in the wild also
//! send plain numbers, so both forms are accepted on input.

use core::fmt::Display;
use core::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// `bytes` fields.
pub mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(&text)
            .or_else(|_| URL_SAFE.decode(&text))
            .map_err(|e| D::Error::custom(format!("invalid base64 {text:?}: {e}")))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Unsigned(u64),
    Signed(i64),
    Text(String),
    Null(()),
}

/// `int64` / `uint64` fields, as a JSON number or a decimal string.
pub mod number {
    use super::*;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + TryFrom<u64> + TryFrom<i64> + Default,
        <T as FromStr>::Err: Display,
        <T as TryFrom<u64>>::Error: Display,
        <T as TryFrom<i64>>::Error: Display,
    {
        match RawNumber::deserialize(deserializer)? {
            RawNumber::Unsigned(n) => T::try_from(n).map_err(D::Error::custom),
            RawNumber::Signed(n) => T::try_from(n).map_err(D::Error::custom),
            RawNumber::Text(s) => s.trim().parse::<T>().map_err(D::Error::custom),
            RawNumber::Null(()) => Ok(T::default()),
        }
    }
}

/// Protobuf enums whose values are `0..NAMES.len()` in declaration order.
pub trait ProtoEnum {
    const NAMES: &'static [&'static str];
}

pub fn serialize_enum<E: ProtoEnum, S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    match usize::try_from(*value).ok().and_then(|i| E::NAMES.get(i)) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_i32(*value),
    }
}

pub fn deserialize_enum<'de, E: ProtoEnum, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    match RawNumber::deserialize(deserializer)? {
        RawNumber::Unsigned(n) => i32::try_from(n).map_err(D::Error::custom),
        RawNumber::Signed(n) => i32::try_from(n).map_err(D::Error::custom),
        RawNumber::Text(name) => E::NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|i| i as i32)
            .ok_or_else(|| D::Error::custom(format!("unknown enum value {name:?}"))),
        RawNumber::Null(()) => Ok(0),
    }
}
