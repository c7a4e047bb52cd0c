//! # Schema Validation
//!
//! One validation function per upstream payload shape. Each takes an arbitrary
//! decoded JSON value and returns either the narrowed DTO or a [`SchemaError`]
//! naming the path that failed. Nothing in here panics.
//!
//! ## Rules
//!
//! - Required coin fields (`id`, `symbol`, `name`, `current_price`) must be
//!   present with the right type.
//! - Optional fields default to zero, empty or `None`. JSON `null` counts as absent.
//! - An optional field that is present with the wrong type is still a failure.
//! - Unknown keys are ignored, except on the global snapshot where they are
//!   preserved in [`GlobalMarket::extra`].

use crate::dto::market::{Coin, GlobalMarket, PricePoint};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Reason a payload could not be narrowed into its typed shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{path}: missing required field")]
    Missing { path: String },

    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl SchemaError {
    /// JSON path of the offending value (`$[3].current_price`).
    pub fn path(&self) -> &str {
        match self {
            SchemaError::Missing { path }
            | SchemaError::WrongType { path, .. }
            | SchemaError::Invalid { path, .. } => path,
        }
    }
}

/// Validated coin list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinList {
    /// Coins in upstream order, ids unique
    pub coins: Vec<Coin>,
    /// Ids of later duplicates that were dropped
    pub dropped_duplicates: Vec<String>,
}

/// Validate a `/coins/markets` payload.
///
/// The first occurrence of an id wins; later duplicates are dropped and
/// reported in [`CoinList::dropped_duplicates`].
pub fn validate_coin_list(value: &Value) -> Result<CoinList, SchemaError> {
    let items = value.as_array().ok_or_else(|| wrong_type("$", "array", value))?;

    let mut seen = HashSet::with_capacity(items.len());
    let mut list = CoinList {
        coins: Vec::with_capacity(items.len()),
        dropped_duplicates: Vec::new(),
    };

    for (index, item) in items.iter().enumerate() {
        let path = format!("$[{}]", index);
        let coin = validate_coin(item, &path)?;
        if seen.insert(coin.id.clone()) {
            list.coins.push(coin);
        } else {
            list.dropped_duplicates.push(coin.id);
        }
    }

    Ok(list)
}

fn validate_coin(value: &Value, path: &str) -> Result<Coin, SchemaError> {
    let obj = value.as_object().ok_or_else(|| wrong_type(path, "object", value))?;

    let id = required_str(obj, "id", path)?;
    if id.trim().is_empty() {
        return Err(SchemaError::Invalid {
            path: format!("{}.id", path),
            reason: "id must not be empty".to_string(),
        });
    }

    let market_cap_rank = match optional_u64(obj, "market_cap_rank", path)? {
        Some(0) => {
            return Err(SchemaError::Invalid {
                path: format!("{}.market_cap_rank", path),
                reason: "rank must be a positive integer".to_string(),
            })
        }
        Some(rank) => Some(u32::try_from(rank).map_err(|_| SchemaError::Invalid {
            path: format!("{}.market_cap_rank", path),
            reason: format!("rank {} out of range", rank),
        })?),
        None => None,
    };

    Ok(Coin {
        id,
        symbol: required_str(obj, "symbol", path)?,
        name: required_str(obj, "name", path)?,
        image: optional_str(obj, "image", path)?.unwrap_or_default(),
        current_price: required_f64(obj, "current_price", path)?,
        price_change_percentage_24h: optional_f64(obj, "price_change_percentage_24h", path)?
            .unwrap_or(0.0),
        high_24h: optional_f64(obj, "high_24h", path)?,
        low_24h: optional_f64(obj, "low_24h", path)?,
        total_volume: optional_f64(obj, "total_volume", path)?,
        market_cap: optional_f64(obj, "market_cap", path)?.unwrap_or(0.0),
        market_cap_rank,
    })
}

/// Validate a `/global` payload (`{ "data": { ... } }`).
///
/// A missing `data` object yields an all-default snapshot.
pub fn validate_global_market(value: &Value) -> Result<GlobalMarket, SchemaError> {
    let envelope = value.as_object().ok_or_else(|| wrong_type("$", "object", value))?;

    let data = match envelope.get("data") {
        None | Some(Value::Null) => return Ok(GlobalMarket::default()),
        Some(data) => data
            .as_object()
            .ok_or_else(|| wrong_type("$.data", "object", data))?,
    };
    let path = "$.data";

    let mut global = GlobalMarket {
        active_cryptocurrencies: optional_u64(data, "active_cryptocurrencies", path)?.unwrap_or(0),
        markets: optional_u64(data, "markets", path)?.unwrap_or(0),
        total_market_cap: optional_number_map(data, "total_market_cap", path)?,
        total_volume: optional_number_map(data, "total_volume", path)?,
        market_cap_percentage: optional_number_map(data, "market_cap_percentage", path)?,
        market_cap_change_percentage_24h_usd: optional_f64(
            data,
            "market_cap_change_percentage_24h_usd",
            path,
        )?,
        updated_at: optional_u64(data, "updated_at", path)?.and_then(|v| i64::try_from(v).ok()),
        extra: Map::new(),
    };

    const KNOWN: [&str; 7] = [
        "active_cryptocurrencies",
        "markets",
        "total_market_cap",
        "total_volume",
        "market_cap_percentage",
        "market_cap_change_percentage_24h_usd",
        "updated_at",
    ];
    for (key, value) in data {
        if !KNOWN.contains(&key.as_str()) {
            global.extra.insert(key.clone(), value.clone());
        }
    }

    Ok(global)
}

/// Validate a `/coins/{id}/market_chart` payload into a time-ordered series.
///
/// Samples with a non-finite price or an unrepresentable timestamp are
/// dropped; the remaining points are sorted by timestamp.
pub fn validate_price_series(value: &Value) -> Result<Vec<PricePoint>, SchemaError> {
    let obj = value.as_object().ok_or_else(|| wrong_type("$", "object", value))?;
    let prices = obj.get("prices").ok_or_else(|| SchemaError::Missing {
        path: "$.prices".to_string(),
    })?;
    let samples = prices
        .as_array()
        .ok_or_else(|| wrong_type("$.prices", "array", prices))?;

    let mut points = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        let path = format!("$.prices[{}]", index);
        let pair = sample
            .as_array()
            .ok_or_else(|| wrong_type(&path, "array", sample))?;
        if pair.len() < 2 {
            return Err(SchemaError::Invalid {
                path,
                reason: format!("expected [timestamp, price], found {} element(s)", pair.len()),
            });
        }

        let (Some(ts), Some(price)) = (pair[0].as_f64(), pair[1].as_f64()) else {
            // null price samples show up for freshly listed coins
            continue;
        };
        if !ts.is_finite() || !price.is_finite() {
            continue;
        }
        if let Some(timestamp) = DateTime::<Utc>::from_timestamp_millis(ts as i64) {
            points.push(PricePoint { timestamp, price });
        }
    }

    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(points)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(path: &str, expected: &'static str, found: &Value) -> SchemaError {
    SchemaError::WrongType {
        path: path.to_string(),
        expected,
        found: json_type(found),
    }
}

/// Field value, treating `null` as absent.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn required_str(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String, SchemaError> {
    optional_str(obj, key, path)?.ok_or_else(|| SchemaError::Missing {
        path: format!("{}.{}", path, key),
    })
}

fn optional_str(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, SchemaError> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(&format!("{}.{}", path, key), "string", other)),
    }
}

fn required_f64(obj: &Map<String, Value>, key: &str, path: &str) -> Result<f64, SchemaError> {
    optional_f64(obj, key, path)?.ok_or_else(|| SchemaError::Missing {
        path: format!("{}.{}", path, key),
    })
}

fn optional_f64(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<f64>, SchemaError> {
    match field(obj, key) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(&format!("{}.{}", path, key), "number", v)),
    }
}

/// Non-negative integer; integral floats such as `12.0` are accepted.
fn optional_u64(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<u64>, SchemaError> {
    let Some(v) = field(obj, key) else {
        return Ok(None);
    };
    if let Some(n) = v.as_u64() {
        return Ok(Some(n));
    }
    match v.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(Some(f as u64)),
        Some(f) => Err(SchemaError::Invalid {
            path: format!("{}.{}", path, key),
            reason: format!("expected a non-negative integer, found {}", f),
        }),
        None => Err(wrong_type(&format!("{}.{}", path, key), "integer", v)),
    }
}

fn optional_number_map(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<BTreeMap<String, f64>, SchemaError> {
    let Some(v) = field(obj, key) else {
        return Ok(BTreeMap::new());
    };
    let path = format!("{}.{}", path, key);
    let entries = v.as_object().ok_or_else(|| wrong_type(&path, "object", v))?;

    entries
        .iter()
        .map(|(code, amount)| {
            amount
                .as_f64()
                .map(|n| (code.to_lowercase(), n))
                .ok_or_else(|| wrong_type(&format!("{}.{}", path, code), "number", amount))
        })
        .collect()
}
