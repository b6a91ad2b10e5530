//! `serde` support for the flat containers.
//!
//! Both containers serialize as a plain sequence in stored order. They
//! deserialize for any comparator implementing `Default`; the incoming
//! sequence does not have to be sorted, and a `FlatSet` drops equivalent
//! duplicates the same way [`FlatSet::from_vec`] does.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compare::Compare;

use super::{FlatMultiSet, FlatSet};

fn serialize_elements<'a, T, I, S>(elements: I, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + 'a,
    I: ExactSizeIterator<Item = &'a T>,
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(elements.len()))?;
    for element in elements {
        seq.serialize_element(element)?;
    }
    seq.end()
}

impl<T: Serialize, C: Compare<T>> Serialize for FlatSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_elements(self.iter(), serializer)
    }
}

impl<T: Serialize, C: Compare<T>> Serialize for FlatMultiSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_elements(self.iter(), serializer)
    }
}

/// Collects a sequence into a `Vec` before the container sorts it once.
struct ElementsVisitor<T> {
    marker: PhantomData<T>,
}

impl<T> ElementsVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ElementsVisitor<T> {
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(elements)
    }
}

impl<'de, T, C> Deserialize<'de> for FlatSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements = deserializer.deserialize_seq(ElementsVisitor::new())?;
        Ok(Self::from_vec(elements, C::default()))
    }
}

impl<'de, T, C> Deserialize<'de> for FlatMultiSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements = deserializer.deserialize_seq(ElementsVisitor::new())?;
        Ok(Self::from_vec(elements, C::default()))
    }
}
