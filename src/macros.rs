/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Keys must be string literals; any other leaf is converted with
/// `Value::from`.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{json, Value};
///
/// let count = 3;
/// let value = json!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "count": count,
///     "extra": null
/// });
///
/// assert_eq!(value["tags"][1].as_str(), Some("b"));
/// assert_eq!(value["count"], Value::Number(3.0));
/// ```
#[macro_export]
macro_rules! json {
    (@array [$($done:expr,)*]) => {
        ::std::vec![$($done,)*]
    };

    (@array [$($done:expr,)*] - $n:literal $(, $($rest:tt)*)?) => {
        $crate::json!(@array [$($done,)* $crate::json!(-$n),] $($($rest)*)?)
    };

    (@array [$($done:expr,)*] $next:tt $(, $($rest:tt)*)?) => {
        $crate::json!(@array [$($done,)* $crate::json!($next),] $($($rest)*)?)
    };

    (@object $object:ident) => {};

    (@object $object:ident $key:literal : - $n:literal $(, $($rest:tt)*)?) => {
        $object.insert($key, $crate::json!(-$n));
        $crate::json!(@object $object $($($rest)*)?);
    };

    (@object $object:ident $key:literal : $value:tt $(, $($rest:tt)*)?) => {
        $object.insert($key, $crate::json!($value));
        $crate::json!(@object $object $($($rest)*)?);
    };

    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([ $($elements:tt)* ]) => {
        $crate::Value::Array($crate::json!(@array [] $($elements)*))
    };

    ({ $($members:tt)* }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::ObjectMap::new();
        $crate::json!(@object object $($members)*);
        $crate::Value::Object(object)
    }};

    // Negative numbers arrive as two tokens.
    (- $n:literal) => {
        $crate::Value::from(-$n)
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

/// Declares the field list of a record type and implements
/// [`Bind`](crate::Bind) on top of it.
///
/// Each entry maps an object key to a field; fields are bound and written in
/// the order given. Every field type must implement `Bind`.
///
/// Use the `@prototype` form to declare only the [`Record`](crate::Record)
/// impl when some of the `Bind` methods are written by hand.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{record, to_string};
///
/// #[derive(Default)]
/// struct TextBox {
///     text: String,
///     width: u32,
///     height: u32,
/// }
///
/// record!(TextBox {
///     "text" => text,
///     "width" => width,
///     "height" => height,
/// });
///
/// let text_box = TextBox { text: "Hi".into(), width: 40, height: 10 };
/// assert_eq!(
///     to_string(&text_box).unwrap(),
///     "{\n  \"text\" : \"Hi\",\n  \"width\" : 40,\n  \"height\" : 10\n}"
/// );
/// ```
#[macro_export]
macro_rules! record {
    (@prototype $ty:ty { $($key:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn prototype() -> &'static $crate::Prototype<Self> {
                static PROTOTYPE: ::std::sync::OnceLock<$crate::Prototype<$ty>> =
                    ::std::sync::OnceLock::new();
                PROTOTYPE.get_or_init(|| {
                    $crate::Prototype::<$ty>::new()
                        $(.field($key, |record| &record.$field, |record| &mut record.$field))*
                })
            }
        }
    };

    ($ty:ty { $($key:literal => $field:ident),* $(,)? }) => {
        $crate::record!(@prototype $ty { $($key => $field),* });

        impl $crate::Bind for $ty {
            fn validate(&self, node: &$crate::Value) -> $crate::Result<()> {
                $crate::bind::validate_record(self, node)
            }

            fn deserialize(&mut self, node: &$crate::Value) -> $crate::Result<()> {
                $crate::bind::deserialize_record(self, node)
            }

            fn serialize(&self, node: &mut $crate::Value) -> $crate::Result<()> {
                $crate::bind::serialize_record(self, node)
            }
        }
    };
}
