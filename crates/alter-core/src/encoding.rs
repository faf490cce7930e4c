//! Tagged-array serialization for the change vocabularies.
//!
//! Every change serializes as an array whose first element is the operation
//! tag, e.g. `["set", "bob", 2]` or `["chg", "a", ["to", 5]]`. Nested
//! changes under `chg` and `all` spread into the tail of the array, one
//! element each, encoded however their own type chooses. Decoding is
//! strict: unknown tags, missing payloads, and trailing elements after a
//! fixed-arity operation are all errors.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::boolean::BoolChange;
use crate::list::{Entity, ListChange};
use crate::map::MapChange;
use crate::record::{Record, RecordChange};
use crate::scalar::ScalarChange;

const TO: &str = "to";
const SET: &str = "set";
const DEL: &str = "del";
const CHG: &str = "chg";
const ALL: &str = "all";
const TGL: &str = "tgl";

const SCALAR_TAGS: &[&str] = &[TO];
const BOOL_TAGS: &[&str] = &[TO, TGL];
const CONTAINER_TAGS: &[&str] = &[TO, SET, DEL, CHG, ALL];

/// Pulls the element at `index` or rejects the array as too short.
fn require_element<'de, A, T>(
    seq: &mut A,
    index: usize,
    expecting: &'static str,
) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, &expecting))
}

fn require_tag<'de, A>(seq: &mut A) -> Result<String, A::Error>
where
    A: SeqAccess<'de>,
{
    require_element(seq, 0, "an operation tag")
}

/// Rejects anything left over after a fixed-arity operation.
fn require_end<'de, A>(seq: &mut A) -> Result<(), A::Error>
where
    A: SeqAccess<'de>,
{
    if seq.next_element::<de::IgnoredAny>()?.is_some() {
        return Err(de::Error::custom(
            "unexpected trailing elements in change array",
        ));
    }
    Ok(())
}

/// Consumes the rest of the array as nested changes.
fn drain_changes<'de, A, C>(seq: &mut A) -> Result<Vec<C>, A::Error>
where
    A: SeqAccess<'de>,
    C: Deserialize<'de>,
{
    let mut changes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(change) = seq.next_element()? {
        changes.push(change);
    }
    Ok(changes)
}

impl<T> Serialize for ScalarChange<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::To(value) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TO)?;
                seq.serialize_element(value)?;
                seq.end()
            }
        }
    }
}

impl<'de, T> Deserialize<'de> for ScalarChange<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarChangeVisitor<T> {
            _phantom: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for ScalarChangeVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = ScalarChange<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a tagged scalar change array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                match require_tag(&mut seq)?.as_str() {
                    TO => {
                        let value = require_element(&mut seq, 1, "a replacement value")?;
                        require_end(&mut seq)?;
                        Ok(ScalarChange::To(value))
                    }
                    other => Err(de::Error::unknown_variant(other, SCALAR_TAGS)),
                }
            }
        }

        deserializer.deserialize_seq(ScalarChangeVisitor {
            _phantom: PhantomData,
        })
    }
}

impl Serialize for BoolChange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::To(value) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TO)?;
                seq.serialize_element(value)?;
                seq.end()
            }
            Self::Tgl => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(TGL)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for BoolChange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BoolChangeVisitor;

        impl<'de> Visitor<'de> for BoolChangeVisitor {
            type Value = BoolChange;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a tagged boolean change array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                match require_tag(&mut seq)?.as_str() {
                    TO => {
                        let value = require_element(&mut seq, 1, "a replacement flag")?;
                        require_end(&mut seq)?;
                        Ok(BoolChange::To(value))
                    }
                    TGL => {
                        require_end(&mut seq)?;
                        Ok(BoolChange::Tgl)
                    }
                    other => Err(de::Error::unknown_variant(other, BOOL_TAGS)),
                }
            }
        }

        deserializer.deserialize_seq(BoolChangeVisitor)
    }
}

impl<K, V, C> Serialize for MapChange<K, V, C>
where
    K: Serialize + Hash + Eq,
    V: Serialize,
    C: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::To(map) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TO)?;
                seq.serialize_element(map)?;
                seq.end()
            }
            Self::Set(key, value) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(SET)?;
                seq.serialize_element(key)?;
                seq.serialize_element(value)?;
                seq.end()
            }
            Self::Del(key) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(DEL)?;
                seq.serialize_element(key)?;
                seq.end()
            }
            Self::Chg(key, changes) => {
                let mut seq = serializer.serialize_seq(Some(2 + changes.len()))?;
                seq.serialize_element(CHG)?;
                seq.serialize_element(key)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
            Self::All(changes) => {
                let mut seq = serializer.serialize_seq(Some(1 + changes.len()))?;
                seq.serialize_element(ALL)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de, K, V, C> Deserialize<'de> for MapChange<K, V, C>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    C: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapChangeVisitor<K, V, C> {
            _phantom: PhantomData<(K, V, C)>,
        }

        impl<'de, K, V, C> Visitor<'de> for MapChangeVisitor<K, V, C>
        where
            K: Deserialize<'de> + Hash + Eq,
            V: Deserialize<'de>,
            C: Deserialize<'de>,
        {
            type Value = MapChange<K, V, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a tagged map change array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                match require_tag(&mut seq)?.as_str() {
                    TO => {
                        let map = require_element(&mut seq, 1, "a replacement map")?;
                        require_end(&mut seq)?;
                        Ok(MapChange::To(map))
                    }
                    SET => {
                        let key = require_element(&mut seq, 1, "a key to set")?;
                        let value = require_element(&mut seq, 2, "a value to store")?;
                        require_end(&mut seq)?;
                        Ok(MapChange::Set(key, value))
                    }
                    DEL => {
                        let key = require_element(&mut seq, 1, "a key to delete")?;
                        require_end(&mut seq)?;
                        Ok(MapChange::Del(key))
                    }
                    CHG => {
                        let key = require_element(&mut seq, 1, "a key to change")?;
                        Ok(MapChange::Chg(key, drain_changes(&mut seq)?))
                    }
                    ALL => Ok(MapChange::All(drain_changes(&mut seq)?)),
                    other => Err(de::Error::unknown_variant(other, CONTAINER_TAGS)),
                }
            }
        }

        deserializer.deserialize_seq(MapChangeVisitor {
            _phantom: PhantomData,
        })
    }
}

impl<R, C> Serialize for RecordChange<R, C>
where
    R: Record + Serialize,
    R::Key: Serialize,
    R::Value: Serialize,
    C: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::To(record) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TO)?;
                seq.serialize_element(record)?;
                seq.end()
            }
            Self::Set(key, value) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(SET)?;
                seq.serialize_element(key)?;
                seq.serialize_element(value)?;
                seq.end()
            }
            Self::Del(key) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(DEL)?;
                seq.serialize_element(key)?;
                seq.end()
            }
            Self::Chg(key, changes) => {
                let mut seq = serializer.serialize_seq(Some(2 + changes.len()))?;
                seq.serialize_element(CHG)?;
                seq.serialize_element(key)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
            Self::All(changes) => {
                let mut seq = serializer.serialize_seq(Some(1 + changes.len()))?;
                seq.serialize_element(ALL)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de, R, C> Deserialize<'de> for RecordChange<R, C>
where
    R: Record + Deserialize<'de>,
    R::Key: Deserialize<'de>,
    R::Value: Deserialize<'de>,
    C: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordChangeVisitor<R, C> {
            _phantom: PhantomData<(R, C)>,
        }

        impl<'de, R, C> Visitor<'de> for RecordChangeVisitor<R, C>
        where
            R: Record + Deserialize<'de>,
            R::Key: Deserialize<'de>,
            R::Value: Deserialize<'de>,
            C: Deserialize<'de>,
        {
            type Value = RecordChange<R, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a tagged record change array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                match require_tag(&mut seq)?.as_str() {
                    TO => {
                        let record = require_element(&mut seq, 1, "a replacement record")?;
                        require_end(&mut seq)?;
                        Ok(RecordChange::To(record))
                    }
                    SET => {
                        let key = require_element(&mut seq, 1, "a slot key")?;
                        let value = require_element(&mut seq, 2, "a value to store")?;
                        require_end(&mut seq)?;
                        Ok(RecordChange::Set(key, value))
                    }
                    DEL => {
                        let key = require_element(&mut seq, 1, "a slot key")?;
                        require_end(&mut seq)?;
                        Ok(RecordChange::Del(key))
                    }
                    CHG => {
                        let key = require_element(&mut seq, 1, "a slot key")?;
                        Ok(RecordChange::Chg(key, drain_changes(&mut seq)?))
                    }
                    ALL => Ok(RecordChange::All(drain_changes(&mut seq)?)),
                    other => Err(de::Error::unknown_variant(other, CONTAINER_TAGS)),
                }
            }
        }

        deserializer.deserialize_seq(RecordChangeVisitor {
            _phantom: PhantomData,
        })
    }
}

impl<I, C> Serialize for ListChange<I, C>
where
    I: Entity + Serialize,
    I::Id: Serialize,
    C: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::To(items) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TO)?;
                seq.serialize_element(items)?;
                seq.end()
            }
            Self::Set(item) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(SET)?;
                seq.serialize_element(item)?;
                seq.end()
            }
            Self::Del(id) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(DEL)?;
                seq.serialize_element(id)?;
                seq.end()
            }
            Self::Chg(id, changes) => {
                let mut seq = serializer.serialize_seq(Some(2 + changes.len()))?;
                seq.serialize_element(CHG)?;
                seq.serialize_element(id)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
            Self::All(changes) => {
                let mut seq = serializer.serialize_seq(Some(1 + changes.len()))?;
                seq.serialize_element(ALL)?;
                for change in changes {
                    seq.serialize_element(change)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de, I, C> Deserialize<'de> for ListChange<I, C>
where
    I: Entity + Deserialize<'de>,
    I::Id: Deserialize<'de>,
    C: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ListChangeVisitor<I, C> {
            _phantom: PhantomData<(I, C)>,
        }

        impl<'de, I, C> Visitor<'de> for ListChangeVisitor<I, C>
        where
            I: Entity + Deserialize<'de>,
            I::Id: Deserialize<'de>,
            C: Deserialize<'de>,
        {
            type Value = ListChange<I, C>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a tagged list change array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                match require_tag(&mut seq)?.as_str() {
                    TO => {
                        let items = require_element(&mut seq, 1, "a replacement list")?;
                        require_end(&mut seq)?;
                        Ok(ListChange::To(items))
                    }
                    SET => {
                        let item = require_element(&mut seq, 1, "an item to store")?;
                        require_end(&mut seq)?;
                        Ok(ListChange::Set(item))
                    }
                    DEL => {
                        let id = require_element(&mut seq, 1, "an id to delete")?;
                        require_end(&mut seq)?;
                        Ok(ListChange::Del(id))
                    }
                    CHG => {
                        let id = require_element(&mut seq, 1, "an id to change")?;
                        Ok(ListChange::Chg(id, drain_changes(&mut seq)?))
                    }
                    ALL => Ok(ListChange::All(drain_changes(&mut seq)?)),
                    other => Err(de::Error::unknown_variant(other, CONTAINER_TAGS)),
                }
            }
        }

        deserializer.deserialize_seq(ListChangeVisitor {
            _phantom: PhantomData,
        })
    }
}
