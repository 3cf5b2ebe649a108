//! Helpers called from generated `map_from` functions.
//!
//! Null handling differs per shape: a missing nested value is an error,
//! a missing collection maps to an empty one, and a missing array stays
//! missing.

use std::collections::BTreeMap;

use crate::MapError;

/// Post-mapping hook implemented by a hand-written base type.
///
/// Runs once on the fully populated target, after every field has been
/// assigned, so it can derive values from mapped data.
pub trait MapHook<T> {
    fn after_map(target: &mut T);
}

/// Require a nested source value to be present.
pub fn nested<'a, S>(value: Option<&'a S>, field: &'static str) -> Result<&'a S, MapError> {
    value.ok_or(MapError::NullNested { field })
}

/// Map every element in order.
pub fn map_each<S, T, F>(source: &[S], f: F) -> Result<Vec<T>, MapError>
where
    F: FnMut(&S) -> Result<T, MapError>,
{
    source.iter().map(f).collect()
}

/// Collection policy: a missing source becomes an empty target.
pub fn map_each_or_empty<S, T, F>(source: Option<&[S]>, f: F) -> Result<Vec<T>, MapError>
where
    F: FnMut(&S) -> Result<T, MapError>,
{
    match source {
        Some(items) => map_each(items, f),
        None => Ok(Vec::new()),
    }
}

/// Array policy: a missing source stays missing.
pub fn map_each_or_none<S, T, F>(source: Option<&[S]>, f: F) -> Result<Option<Vec<T>>, MapError>
where
    F: FnMut(&S) -> Result<T, MapError>,
{
    source.map(|items| map_each(items, f)).transpose()
}

/// Map every value of a map, keeping keys.
pub fn map_values<K, S, T, F>(source: &BTreeMap<K, S>, mut f: F) -> Result<BTreeMap<K, T>, MapError>
where
    K: Ord + Clone,
    F: FnMut(&S) -> Result<T, MapError>,
{
    source
        .iter()
        .map(|(key, value)| Ok((key.clone(), f(value)?)))
        .collect()
}

pub fn map_values_or_empty<K, S, T, F>(
    source: Option<&BTreeMap<K, S>>,
    f: F,
) -> Result<BTreeMap<K, T>, MapError>
where
    K: Ord + Clone,
    F: FnMut(&S) -> Result<T, MapError>,
{
    match source {
        Some(map) => map_values(map, f),
        None => Ok(BTreeMap::new()),
    }
}
