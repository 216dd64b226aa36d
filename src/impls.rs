//! [`Bind`] implementations for standard types.
//!
//! | Rust type | JSON |
//! |---|---|
//! | `String`, `char` | string |
//! | `bool` | `true` / `false` |
//! | `f64`, `f32` | number |
//! | primitive integers | number with no fractional part, in range |
//! | [`Null`] | `null` |
//! | `Option<T>` | `null` or `T` |
//! | `Vec<T>` | array |
//! | `BTreeMap<String, T>`, `HashMap<String, T>`, `IndexMap<String, T>` | object |
//! | `DateTime<Utc>` | RFC 3339 string |
//! | [`Value`] | anything |
//!
//! Containers validate each element against `T::default()`, so element types
//! need a `Default` implementation.

use crate::{Bind, Error, Null, ObjectMap, Result, Value};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Copies `text` into a new `String`, reporting allocation failure.
pub(crate) fn try_owned(text: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

impl Bind for String {
    fn new_node() -> Value {
        Value::String(String::new())
    }

    fn validate(&self, node: &Value) -> Result<()> {
        node.as_str().map(drop).ok_or(Error::InvalidValueType)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        let text = node.as_str().ok_or(Error::InvalidValueType)?;
        self.clear();
        self.try_reserve(text.len())?;
        self.push_str(text);
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::String(try_owned(self)?);
        Ok(())
    }
}

fn single_char(node: &Value) -> Result<char> {
    let text = node.as_str().ok_or(Error::InvalidValueType)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidValueType),
    }
}

impl Bind for char {
    fn new_node() -> Value {
        Value::String(String::new())
    }

    fn validate(&self, node: &Value) -> Result<()> {
        single_char(node).map(drop)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        *self = single_char(node)?;
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        let mut buffer = [0; 4];
        *node = Value::String(try_owned(self.encode_utf8(&mut buffer))?);
        Ok(())
    }
}

impl Bind for bool {
    fn new_node() -> Value {
        Value::Bool(false)
    }

    fn validate(&self, node: &Value) -> Result<()> {
        node.as_bool().map(drop).ok_or(Error::InvalidValueType)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        *self = node.as_bool().ok_or(Error::InvalidValueType)?;
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::Bool(*self);
        Ok(())
    }
}

impl Bind for f64 {
    fn new_node() -> Value {
        Value::Number(0.0)
    }

    fn validate(&self, node: &Value) -> Result<()> {
        node.as_f64().map(drop).ok_or(Error::InvalidValueType)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        *self = node.as_f64().ok_or(Error::InvalidValueType)?;
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::Number(*self);
        Ok(())
    }
}

fn narrow_f32(node: &Value) -> Result<f32> {
    let n = node.as_f64().ok_or(Error::InvalidValueType)?;
    let narrowed = n as f32;
    if narrowed.is_finite() {
        Ok(narrowed)
    } else {
        Err(Error::InvalidValueType)
    }
}

impl Bind for f32 {
    fn new_node() -> Value {
        Value::Number(0.0)
    }

    fn validate(&self, node: &Value) -> Result<()> {
        narrow_f32(node).map(drop)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        *self = narrow_f32(node)?;
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::Number(f64::from(*self));
        Ok(())
    }
}

/// Returns the number held by `node` if it is whole and within `min..=max`.
///
/// `max` is compared exclusively against `max + 1` so that the 64-bit bounds,
/// which round up to a power of two as `f64`, stay correct.
fn whole_number(node: &Value, min: f64, max: f64) -> Result<f64> {
    let n = node.as_f64().ok_or(Error::InvalidValueType)?;
    if n.fract() == 0.0 && n >= min && n < max + 1.0 {
        Ok(n)
    } else {
        Err(Error::InvalidValueType)
    }
}

macro_rules! bind_integer {
    ($($t:ty),*) => {
        $(
            impl Bind for $t {
                fn new_node() -> Value {
                    Value::Number(0.0)
                }

                fn validate(&self, node: &Value) -> Result<()> {
                    whole_number(node, <$t>::MIN as f64, <$t>::MAX as f64).map(drop)
                }

                fn deserialize(&mut self, node: &Value) -> Result<()> {
                    *self = whole_number(node, <$t>::MIN as f64, <$t>::MAX as f64)? as $t;
                    Ok(())
                }

                /// Fails with [`Error::InvalidValueType`] for values an `f64`
                /// cannot hold exactly, since they would not read back.
                fn serialize(&self, node: &mut Value) -> Result<()> {
                    let number = Value::Number(*self as f64);
                    let exact = whole_number(&number, <$t>::MIN as f64, <$t>::MAX as f64)?;
                    if exact as $t != *self {
                        return Err(Error::InvalidValueType);
                    }
                    *node = number;
                    Ok(())
                }
            }
        )*
    };
}

bind_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Bind for Null {
    fn new_node() -> Value {
        Value::Null
    }

    fn validate(&self, node: &Value) -> Result<()> {
        if node.is_null() {
            Ok(())
        } else {
            Err(Error::InvalidValueType)
        }
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        self.validate(node)
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::Null;
        Ok(())
    }
}

impl Bind for Value {
    fn new_node() -> Value {
        Value::Null
    }

    fn validate(&self, _node: &Value) -> Result<()> {
        Ok(())
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        self.clone_from(node);
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        node.clone_from(self);
        Ok(())
    }
}

fn timestamp(node: &Value) -> Result<DateTime<Utc>> {
    let text = node.as_str().ok_or(Error::InvalidValueType)?;
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::InvalidValueType)
}

impl Bind for DateTime<Utc> {
    fn new_node() -> Value {
        Value::String(String::new())
    }

    fn validate(&self, node: &Value) -> Result<()> {
        timestamp(node).map(drop)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        *self = timestamp(node)?;
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        *node = Value::String(self.to_rfc3339());
        Ok(())
    }
}

impl<T: Bind + Default> Bind for Option<T> {
    fn new_node() -> Value {
        Value::Null
    }

    fn validate(&self, node: &Value) -> Result<()> {
        match self {
            _ if node.is_null() => Ok(()),
            Some(inner) => inner.validate(node),
            None => T::default().validate(node),
        }
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        if node.is_null() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).deserialize(node)
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        match self {
            Some(inner) => {
                *node = T::new_node();
                inner.serialize(node)
            }
            None => {
                *node = Value::Null;
                Ok(())
            }
        }
    }
}

impl<T: Bind> Bind for Box<T> {
    fn new_node() -> Value {
        T::new_node()
    }

    fn validate(&self, node: &Value) -> Result<()> {
        (**self).validate(node)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        (**self).deserialize(node)
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        (**self).serialize(node)
    }
}

impl<T: Bind + Default> Bind for Vec<T> {
    fn new_node() -> Value {
        Value::array()
    }

    fn validate(&self, node: &Value) -> Result<()> {
        let elements = node.as_array().ok_or(Error::InvalidValueType)?;
        let prototype = T::default();
        elements
            .iter()
            .try_for_each(|element| prototype.validate(element))
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        let elements = node.as_array().ok_or(Error::InvalidValueType)?;
        self.clear();
        self.try_reserve(elements.len())?;
        for element in elements {
            let mut item = T::default();
            item.deserialize(element)?;
            self.push(item);
        }
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        let mut elements = Vec::new();
        elements.try_reserve_exact(self.len())?;
        for item in self {
            let mut child = T::new_node();
            item.serialize(&mut child)?;
            elements.push(child);
        }
        *node = Value::Array(elements);
        Ok(())
    }
}

/// String-keyed maps.
///
/// Deserializing merges: members of the object update the entry with the
/// same key or add a new one, and entries the object does not mention are
/// kept. Serializing writes the map's own iteration order.
///
/// `BTreeMap` has no fallible reservation, so only its keys are reserved.
macro_rules! bind_string_map {
    ($map:ident $(, $hasher:ident)? $(; $reserve:ident)?) => {
        impl<T: Bind + Default $(, $hasher: BuildHasher)?> Bind for $map<String, T $(, $hasher)?> {
            fn validate(&self, node: &Value) -> Result<()> {
                let object = node.as_object().ok_or(Error::InvalidValueType)?;
                let prototype = T::default();
                object
                    .values()
                    .try_for_each(|member| prototype.validate(member))
            }

            fn deserialize(&mut self, node: &Value) -> Result<()> {
                let object = node.as_object().ok_or(Error::InvalidValueType)?;
                for (key, member) in object {
                    match self.get_mut(key.as_str()) {
                        Some(existing) => existing.deserialize(member)?,
                        None => {
                            let mut item = T::default();
                            item.deserialize(member)?;
                            let key = try_owned(key)?;
                            $(self.$reserve(1).map_err(|_| Error::Exception)?;)?
                            self.insert(key, item);
                        }
                    }
                }
                Ok(())
            }

            fn serialize(&self, node: &mut Value) -> Result<()> {
                let mut object = ObjectMap::new();
                for (key, item) in self {
                    let mut child = T::new_node();
                    item.serialize(&mut child)?;
                    object.try_insert(try_owned(key)?, child)?;
                }
                *node = Value::Object(object);
                Ok(())
            }
        }
    };
}

bind_string_map!(BTreeMap);
bind_string_map!(HashMap, S; try_reserve);
bind_string_map!(IndexMap, S; try_reserve);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    fn round_trip<T: Bind + Default>(value: &T) -> T {
        let mut node = T::new_node();
        value.serialize(&mut node).unwrap();
        let mut back = T::default();
        back.validate(&node).unwrap();
        back.deserialize(&node).unwrap();
        back
    }

    #[test]
    fn test_scalars() {
        assert_eq!(round_trip(&"héllo".to_string()), "héllo");
        assert!(round_trip(&true));
        assert_eq!(round_trip(&-2.75f64), -2.75);
        assert_eq!(round_trip(&1.5f32), 1.5);
        assert_eq!(round_trip(&'λ'), 'λ');
        assert_eq!(round_trip(&Null), Null);
    }

    #[test]
    fn test_kind_mismatch() {
        assert_eq!(String::new().validate(&json!(1)), Err(Error::InvalidValueType));
        assert_eq!(false.validate(&json!("true")), Err(Error::InvalidValueType));
        assert_eq!(0.0f64.validate(&json!(null)), Err(Error::InvalidValueType));
        assert_eq!('a'.validate(&json!("ab")), Err(Error::InvalidValueType));
        assert_eq!(Null.validate(&json!(false)), Err(Error::InvalidValueType));
        assert_eq!(0.0f32.validate(&json!(1e300)), Err(Error::InvalidValueType));
    }

    #[test]
    fn test_integer_ranges() {
        let mut byte = 0u8;
        assert_eq!(byte.deserialize(&json!(255)), Ok(()));
        assert_eq!(byte, 255);
        assert_eq!(byte.validate(&json!(256)), Err(Error::InvalidValueType));
        assert_eq!(byte.validate(&json!(-1)), Err(Error::InvalidValueType));
        assert_eq!(byte.validate(&json!(1.5)), Err(Error::InvalidValueType));

        assert_eq!(round_trip(&i64::MIN), i64::MIN);
        assert_eq!(round_trip(&(1i64 << 53)), 1 << 53);
        assert_eq!(round_trip(&(u64::MAX - 2047)), u64::MAX - 2047);

        let mut node = Value::Null;
        assert_eq!(i64::MAX.serialize(&mut node), Err(Error::InvalidValueType));
        assert_eq!(u64::MAX.serialize(&mut node), Err(Error::InvalidValueType));
        assert_eq!(((1u64 << 53) + 1).serialize(&mut node), Err(Error::InvalidValueType));
        assert!(node.is_null());
        assert_eq!(0i64.validate(&Value::Number(9.3e18)), Err(Error::InvalidValueType));
        assert_eq!(round_trip(&u32::MAX), u32::MAX);
        assert_eq!(round_trip(&-128i8), -128);
    }

    #[test]
    fn test_option() {
        let mut value: Option<u16> = Some(3);
        value.deserialize(&json!(null)).unwrap();
        assert_eq!(value, None);
        value.deserialize(&json!(7)).unwrap();
        assert_eq!(value, Some(7));

        let mut node = Value::object();
        None::<u16>.serialize(&mut node).unwrap();
        assert!(node.is_null());
        assert_eq!(None::<u16>.validate(&json!("x")), Err(Error::InvalidValueType));
    }

    #[test]
    fn test_vec_replaces_contents() {
        let mut list = vec![9, 9, 9];
        list.deserialize(&json!([1, 2])).unwrap();
        assert_eq!(list, vec![1, 2]);
        assert_eq!(list.validate(&json!([1, "x"])), Err(Error::InvalidValueType));
        assert_eq!(list.validate(&json!({})), Err(Error::InvalidValueType));
        assert_eq!(round_trip(&vec![vec![1u8], vec![]]), vec![vec![1u8], vec![]]);
    }

    #[test]
    fn test_map_merges() {
        let mut map = BTreeMap::new();
        map.insert("keep".to_string(), 1u32);
        map.insert("update".to_string(), 2u32);
        map.deserialize(&json!({ "update": 20, "add": 30 })).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["keep"], 1);
        assert_eq!(map["update"], 20);
        assert_eq!(map["add"], 30);

        assert_eq!(map.validate(&json!({ "x": "y" })), Err(Error::InvalidValueType));
        assert_eq!(map.validate(&json!([])), Err(Error::InvalidValueType));
    }

    #[test]
    fn test_hashed_maps_merge() {
        let mut hashed = HashMap::from([("keep".to_string(), 'k')]);
        hashed.deserialize(&json!({ "add": "a" })).unwrap();
        assert_eq!(hashed.len(), 2);
        assert_eq!(hashed["add"], 'a');

        let mut ordered: IndexMap<String, char> = IndexMap::new();
        ordered.insert("first".to_string(), '1');
        ordered.deserialize(&json!({ "second": "2", "first": "!" })).unwrap();
        assert_eq!(ordered.keys().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(ordered["first"], '!');

        let mut node = Value::Null;
        ordered.serialize(&mut node).unwrap();
        assert_eq!(node, json!({ "first": "!", "second": "2" }));
    }

    #[test]
    fn test_map_serialize_order() {
        let mut map = IndexMap::new();
        map.insert("z".to_string(), "last".to_string());
        map.insert("a".to_string(), "first".to_string());
        let mut node = Value::Null;
        map.serialize(&mut node).unwrap();
        let keys: Vec<_> = node.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);

        let hashed: HashMap<String, bool> = round_trip(&HashMap::from([("k".to_string(), true)]));
        assert_eq!(hashed.get("k"), Some(&true));
    }

    #[test]
    fn test_timestamp() {
        let when = DateTime::parse_from_rfc3339("2024-05-06T07:08:09Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(round_trip(&when), when);
        assert_eq!(when.validate(&json!("yesterday")), Err(Error::InvalidValueType));
    }

    #[test]
    fn test_value_passthrough() {
        let tree = json!({ "any": [1, null, "x"] });
        assert_eq!(round_trip(&tree), tree);
    }

    #[test]
    fn test_boxed() {
        assert_eq!(*round_trip(&Box::new(5u8)), 5);
    }
}
