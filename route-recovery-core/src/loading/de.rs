//! Field formats shared by the tabular readers and writers.
//!
//! Node sequences are written as bracketed lists (`[1, 2, 3]`), edge sets
//! as lists of pairs (`[(1, 2), (2, 3)]`).

use chrono::{DateTime, NaiveDateTime};
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serializer};

use crate::{Error, HighwayClass, NodeId};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_node_list(ids: &[NodeId]) -> String {
    format!("[{}]", ids.iter().join(", "))
}

pub fn parse_node_list(s: &str) -> Result<Vec<NodeId>, Error> {
    list_items(s)
        .map(|item| {
            item.parse::<NodeId>()
                .map_err(|e| Error::InvalidData(format!("Invalid node id '{item}' in {s}: {e}")))
        })
        .collect()
}

pub fn format_edge_list(edges: &[(NodeId, NodeId)]) -> String {
    format!(
        "[{}]",
        edges
            .iter()
            .map(|(from, to)| format!("({from}, {to})"))
            .join(", ")
    )
}

pub fn parse_edge_list(s: &str) -> Result<Vec<(NodeId, NodeId)>, Error> {
    let flat: String = s.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let ids = parse_node_list(&flat)?;
    if ids.len() % 2 != 0 {
        return Err(Error::InvalidData(format!(
            "Unpaired node in edge list {s}"
        )));
    }
    Ok(ids.into_iter().tuples().collect())
}

pub fn format_highway_list(classes: &[HighwayClass]) -> String {
    format!("[{}]", classes.iter().join(", "))
}

/// Unknown tags are classified like raw `highway` values
pub fn parse_highway_list(s: &str) -> Vec<HighwayClass> {
    list_items(s)
        .map(|item| HighwayClass::from_tag(item.trim_matches(|c| c == '\'' || c == '"')))
        .collect()
}

/// Either `%Y-%m-%d %H:%M:%S` or unix seconds
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            s.parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|datetime| datetime.naive_utc())
        })
}

fn list_items(s: &str) -> impl Iterator<Item = &str> {
    s.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

pub(crate) mod node_list {
    use super::*;

    pub fn serialize<S: Serializer>(ids: &[NodeId], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_node_list(ids))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<NodeId>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_node_list(&s).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod edge_list {
    use super::*;

    pub fn serialize<S: Serializer>(
        edges: &[(NodeId, NodeId)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_edge_list(edges))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(NodeId, NodeId)>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_edge_list(&s).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod highway_list {
    use super::*;

    pub fn serialize<S: Serializer>(
        classes: &[HighwayClass],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_highway_list(classes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<HighwayClass>, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(parse_highway_list(&s))
    }
}

/// Optional timestamp column; empty or unparsable values become `None`
pub(crate) fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                log::warn!("Ignoring unparsable timestamp '{s}'");
            }
            parsed
        }))
}
