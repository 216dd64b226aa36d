//! Structured binding between native types and [`Value`] trees.
//!
//! A type that implements [`Bind`] can be checked against a node
//! ([`validate`](Bind::validate)), filled from a node
//! ([`deserialize`](Bind::deserialize)) and written into a node
//! ([`serialize`](Bind::serialize)).
//!
//! Scalars, sequences and string-keyed maps come with implementations. Record
//! types declare their fields with [`record!`](crate::record), which implements
//! all three operations on top of the record's [`Prototype`](crate::Prototype).
//! A type that needs custom logic for any of them (private fields, derived
//! values, versioned layouts) implements `Bind` by hand, delegating the rest to
//! [`validate_record`], [`deserialize_record`] and [`serialize_record`] or
//! working member by member with the keyed helpers [`validate_field`],
//! [`deserialize_field`] and [`serialize_field`].
//!
//! ## Examples
//!
//! ```rust
//! use jsondoc::{bind::deserialize_field, bind::serialize_field, Bind, Result, Value};
//!
//! #[derive(Default)]
//! struct Temperature {
//!     celsius: f64,
//! }
//!
//! // Stored as Fahrenheit on the wire.
//! impl Bind for Temperature {
//!     fn validate(&self, node: &Value) -> Result<()> {
//!         jsondoc::bind::validate_field(node, "fahrenheit", &0.0_f64)
//!     }
//!
//!     fn deserialize(&mut self, node: &Value) -> Result<()> {
//!         let mut f = 0.0_f64;
//!         deserialize_field(node, "fahrenheit", &mut f)?;
//!         self.celsius = (f - 32.0) / 1.8;
//!         Ok(())
//!     }
//!
//!     fn serialize(&self, node: &mut Value) -> Result<()> {
//!         serialize_field(node, "fahrenheit", &(self.celsius * 1.8 + 32.0))
//!     }
//! }
//!
//! let t: Temperature = jsondoc::from_str(r#"{"fahrenheit": 212}"#).unwrap();
//! assert_eq!(t.celsius, 100.0);
//! ```

use crate::{Error, Record, Result, Value};
use log::trace;

/// Binding of a native type to JSON values.
///
/// Implementations must keep `validate` free of side effects: a type that
/// validates successfully against a node must also deserialize from it.
pub trait Bind {
    /// Creates the node this type serializes into.
    ///
    /// Records, sequences and maps start from an empty container; scalars
    /// override this with their own kind.
    fn new_node() -> Value
    where
        Self: Sized,
    {
        Value::object()
    }

    /// Checks that `node` has the shape this type expects, without changing
    /// anything.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValueType`] when a node has the wrong kind,
    /// [`Error::NameNotPresent`] when a record member is missing.
    fn validate(&self, node: &Value) -> Result<()>;

    /// Fills `self` from `node`.
    ///
    /// The first failure is returned; `self` may be partially updated by then.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Bind::validate), plus [`Error::Exception`] when
    /// an allocation fails.
    fn deserialize(&mut self, node: &Value) -> Result<()>;

    /// Writes the current contents of `self` into `node`, replacing what was
    /// there.
    ///
    /// # Errors
    ///
    /// [`Error::Exception`] when an allocation fails, or whatever a nested
    /// custom implementation reports.
    fn serialize(&self, node: &mut Value) -> Result<()>;
}

fn member<'v>(node: &'v Value, key: &str) -> Result<&'v Value> {
    let object = node.as_object().ok_or(Error::InvalidValueType)?;
    object.get(key).ok_or_else(|| {
        trace!("member {key:?} not present");
        Error::NameNotPresent
    })
}

/// Validates the member `key` of the object `node` against `field`.
///
/// # Errors
///
/// [`Error::InvalidValueType`] if `node` is not an object,
/// [`Error::NameNotPresent`] if it has no member `key`, or any error from
/// the field's own validation.
pub fn validate_field<F: Bind + ?Sized>(node: &Value, key: &str, field: &F) -> Result<()> {
    field.validate(member(node, key)?)
}

/// Deserializes the member `key` of the object `node` into `field`.
///
/// # Errors
///
/// As [`validate_field`].
pub fn deserialize_field<F: Bind + ?Sized>(node: &Value, key: &str, field: &mut F) -> Result<()> {
    trace!("deserializing member {key:?}");
    field.deserialize(member(node, key)?)
}

/// Serializes `field` as the member `key` of the object `node`.
///
/// An existing member with the same key is replaced in place.
///
/// # Errors
///
/// [`Error::InvalidValueType`] if `node` is not an object, or any error from
/// the field's own serialization.
pub fn serialize_field<F: Bind>(node: &mut Value, key: &str, field: &F) -> Result<()> {
    let object = node.as_object_mut().ok_or(Error::InvalidValueType)?;
    let mut child = F::new_node();
    field.serialize(&mut child)?;
    object.try_insert(crate::impls::try_owned(key)?, child)?;
    Ok(())
}

/// Validates `node` against every field of the record's prototype.
///
/// # Errors
///
/// [`Error::InvalidValueType`] if `node` is not an object; otherwise the
/// first field failure, in declaration order.
pub fn validate_record<T: Record>(record: &T, node: &Value) -> Result<()> {
    if !node.is_object() {
        return Err(Error::InvalidValueType);
    }
    T::prototype()
        .fields()
        .try_for_each(|field| field.validate(record, node))
}

/// Deserializes every field of the record's prototype from `node`.
///
/// # Errors
///
/// As [`validate_record`].
pub fn deserialize_record<T: Record>(record: &mut T, node: &Value) -> Result<()> {
    if !node.is_object() {
        return Err(Error::InvalidValueType);
    }
    T::prototype()
        .fields()
        .try_for_each(|field| field.deserialize(record, node))
}

/// Serializes every field of the record's prototype into `node`.
///
/// `node` becomes an object holding exactly the declared fields, in
/// declaration order; whatever it held before is discarded.
///
/// # Errors
///
/// The first field failure, in declaration order.
pub fn serialize_record<T: Record>(record: &T, node: &mut Value) -> Result<()> {
    match &mut *node {
        Value::Object(object) => object.remove_all(),
        other => *other = Value::object(),
    }
    T::prototype()
        .fields()
        .try_for_each(|field| field.serialize(record, node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{json, record};

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        flag: bool,
    }

    record!(Inner { "flag" => flag });

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        label: String,
        inner: Inner,
        scores: Vec<f64>,
    }

    record!(Outer {
        "label" => label,
        "inner" => inner,
        "scores" => scores,
    });

    #[test]
    fn test_keyed_helpers() {
        let node = json!({ "n": 3, "s": "x" });
        let mut n = 0u8;
        deserialize_field(&node, "n", &mut n).unwrap();
        assert_eq!(n, 3);

        assert_eq!(validate_field(&node, "missing", &n), Err(Error::NameNotPresent));
        assert_eq!(validate_field(&node, "s", &n), Err(Error::InvalidValueType));
        assert_eq!(
            validate_field(&json!([1]), "n", &n),
            Err(Error::InvalidValueType)
        );

        let mut out = Value::object();
        serialize_field(&mut out, "n", &n).unwrap();
        assert_eq!(out, json!({ "n": 3 }));
        assert_eq!(
            serialize_field(&mut Value::Null, "n", &n),
            Err(Error::InvalidValueType)
        );
    }

    #[test]
    fn test_record_round_trip() {
        let source = Outer {
            label: "L".to_string(),
            inner: Inner { flag: true },
            scores: vec![1.5, 2.0],
        };
        let mut node = Outer::new_node();
        source.serialize(&mut node).unwrap();
        assert_eq!(
            node,
            json!({ "label": "L", "inner": { "flag": true }, "scores": [1.5, 2] })
        );

        let mut target = Outer::default();
        target.validate(&node).unwrap();
        target.deserialize(&node).unwrap();
        assert_eq!(target, source);
    }

    #[test]
    fn test_serialize_record_clears_previous_members() {
        let mut node = json!({ "stale": 1, "scores": "old" });
        Outer::default().serialize(&mut node).unwrap();
        let keys: Vec<_> = node.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["label", "inner", "scores"]);

        let mut scalar = Value::from(5);
        Inner::default().serialize(&mut scalar).unwrap();
        assert_eq!(scalar, json!({ "flag": false }));
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let node = json!({ "label": 1, "inner": {} });
        assert_eq!(Outer::default().validate(&node), Err(Error::InvalidValueType));

        let node = json!({ "label": "ok", "inner": {} });
        assert_eq!(Outer::default().validate(&node), Err(Error::NameNotPresent));

        assert_eq!(Outer::default().validate(&json!(null)), Err(Error::InvalidValueType));
    }

    #[test]
    fn test_validate_is_pure() {
        let node = json!({ "label": "new", "inner": { "flag": true }, "scores": [] });
        let before = Outer {
            label: "old".to_string(),
            ..Outer::default()
        };
        before.validate(&node).unwrap();
        assert_eq!(before.label, "old");
    }
}
