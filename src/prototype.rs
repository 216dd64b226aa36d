//! Declared field lists for record types.
//!
//! A [`Prototype`] is the ordered list of `(key, field accessor)` pairs that
//! describes how a record maps onto a JSON object. Accessors are plain function
//! pointers, so a prototype holds no data of the record itself and can be
//! built once per type and shared.
//!
//! The [`record!`](crate::record) macro is the usual way to declare one:
//!
//! ```rust
//! use jsondoc::{record, Record};
//!
//! #[derive(Default)]
//! struct TextBox {
//!     text: String,
//!     width: u32,
//!     height: u32,
//! }
//!
//! record!(TextBox {
//!     "text" => text,
//!     "width" => width,
//!     "height" => height,
//! });
//!
//! let keys: Vec<_> = TextBox::prototype().keys().collect();
//! assert_eq!(keys, ["text", "width", "height"]);
//! ```

use crate::bind::{deserialize_field, serialize_field, validate_field};
use crate::{Bind, Result, Value};

/// Type-erased access to one field of `T`.
trait Access<T>: Send + Sync {
    fn validate(&self, record: &T, node: &Value, key: &str) -> Result<()>;
    fn deserialize(&self, record: &mut T, node: &Value, key: &str) -> Result<()>;
    fn serialize(&self, record: &T, node: &mut Value, key: &str) -> Result<()>;
}

struct Accessor<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F: Bind> Access<T> for Accessor<T, F> {
    fn validate(&self, record: &T, node: &Value, key: &str) -> Result<()> {
        validate_field(node, key, (self.get)(record))
    }

    fn deserialize(&self, record: &mut T, node: &Value, key: &str) -> Result<()> {
        deserialize_field(node, key, (self.get_mut)(record))
    }

    fn serialize(&self, record: &T, node: &mut Value, key: &str) -> Result<()> {
        serialize_field(node, key, (self.get)(record))
    }
}

/// One entry of a [`Prototype`].
pub struct Field<T> {
    key: &'static str,
    access: Box<dyn Access<T>>,
}

impl<T> Field<T> {
    /// The object key this field binds to.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub(crate) fn validate(&self, record: &T, node: &Value) -> Result<()> {
        self.access.validate(record, node, self.key)
    }

    pub(crate) fn deserialize(&self, record: &mut T, node: &Value) -> Result<()> {
        self.access.deserialize(record, node, self.key)
    }

    pub(crate) fn serialize(&self, record: &T, node: &mut Value) -> Result<()> {
        self.access.serialize(record, node, self.key)
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("key", &self.key).finish()
    }
}

/// The ordered field list of a record type.
///
/// Fields are bound, and written, in the order they were declared.
///
/// # Examples
///
/// ```rust
/// use jsondoc::Prototype;
///
/// struct Point { x: f64, y: f64 }
///
/// let prototype = Prototype::<Point>::new()
///     .field("x", |p| &p.x, |p| &mut p.x)
///     .field("y", |p| &p.y, |p| &mut p.y);
///
/// assert_eq!(prototype.len(), 2);
/// ```
#[derive(Debug)]
pub struct Prototype<T> {
    fields: Vec<Field<T>>,
}

impl<T: 'static> Prototype<T> {
    #[must_use]
    pub fn new() -> Self {
        Prototype { fields: Vec::new() }
    }

    /// Appends a field bound to `key`.
    #[must_use]
    pub fn field<F: Bind + 'static>(
        mut self,
        key: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.fields.push(Field {
            key,
            access: Box::new(Accessor { get, get_mut }),
        });
        self
    }
}

impl<T: 'static> Default for Prototype<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Prototype<T> {
    /// Iterates over the fields in declaration order.
    pub fn fields(&self) -> std::slice::Iter<'_, Field<T>> {
        self.fields.iter()
    }

    /// Iterates over the field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(Field::key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A type described by a declared field list.
///
/// Implemented by [`record!`](crate::record); the prototype is built on first
/// use and shared for the life of the program.
pub trait Record: Sized + 'static {
    fn prototype() -> &'static Prototype<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn prototype() -> Prototype<Sample> {
        Prototype::new()
            .field("name", |s: &Sample| &s.name, |s: &mut Sample| &mut s.name)
            .field("count", |s: &Sample| &s.count, |s: &mut Sample| &mut s.count)
    }

    #[test]
    fn test_declaration_order() {
        let prototype = prototype();
        assert_eq!(prototype.keys().collect::<Vec<_>>(), vec!["name", "count"]);
        assert!(!prototype.is_empty());
    }

    #[test]
    fn test_field_round_trip() {
        let prototype = prototype();
        let source = Sample {
            name: "x".to_string(),
            count: 7,
        };
        let mut node = Value::object();
        for field in prototype.fields() {
            field.serialize(&source, &mut node).unwrap();
        }
        assert_eq!(node["name"].as_str(), Some("x"));
        assert_eq!(node["count"].as_f64(), Some(7.0));

        let mut target = Sample::default();
        for field in prototype.fields() {
            field.validate(&target, &node).unwrap();
            field.deserialize(&mut target, &node).unwrap();
        }
        assert_eq!(target.name, "x");
        assert_eq!(target.count, 7);
    }
}
