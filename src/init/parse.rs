// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::error::Error;

pub(crate) type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Parse a single key-value pair
pub(crate) fn parse_key_val<T, U>(s: &str) -> Result<(T, U), BoxError>
where
    T: std::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
    U: std::str::FromStr,
    U::Err: Error + Send + Sync + 'static,
{
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    Ok((s[..pos].parse()?, s[pos + 1..].parse()?))
}

/// Parse a comma-separated list of key-value pairs
pub(crate) fn parse_key_vals<T, U>(s: &str) -> Result<Vec<(T, U)>, BoxError>
where
    T: std::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
    U: std::str::FromStr,
    U::Err: Error + Send + Sync + 'static,
{
    s.trim()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| parse_key_val::<T, U>(s))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyValuePairs {
    Inline(String),
    Table(BTreeMap<String, String>),
}

// Key-value settings are either a "k1=v1,k2=v2" string or a table
pub(crate) fn deserialize_key_value_pairs<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    match KeyValuePairs::deserialize(deserializer)? {
        KeyValuePairs::Inline(s) => {
            parse_key_vals::<String, String>(&s).map_err(serde::de::Error::custom)
        }
        KeyValuePairs::Table(table) => Ok(table.into_iter().collect()),
    }
}
