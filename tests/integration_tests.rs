use jsondoc::{
    bind::{deserialize_field, serialize_field, validate_field},
    from_str, json, record, to_string, validate, Bind, Document, Error, Null, ParseOptions,
    Position, Result, Value, WriteOptions,
};
use std::collections::{BTreeMap, HashMap};
use std::fs;

#[derive(Debug, Default, PartialEq)]
struct TextBox {
    text: String,
    width: f64,
    height: f64,
}

record!(TextBox {
    "text" => text,
    "width" => width,
    "height" => height,
});

#[derive(Debug, Default, PartialEq)]
struct Scalars {
    str1: String,
    str2: String,
    d: f64,
    b: bool,
    null: Null,
}

record!(Scalars {
    "str1" => str1,
    "str2" => str2,
    "double" => d,
    "bool" => b,
    "null" => null,
});

#[derive(Debug, Default, Clone, PartialEq)]
struct Entry {
    d: f64,
    string: String,
}

record!(Entry { "double" => d, "string" => string });

#[derive(Debug, Default, Clone, PartialEq)]
struct Section {
    entries: Vec<Entry>,
    b: bool,
}

record!(Section { "bool" => b, "objectArray" => entries });

#[derive(Debug, Default, Clone, PartialEq)]
struct RootObject {
    object: Section,
    d: f64,
    doubles: Vec<f64>,
    strings: Vec<String>,
}

record!(RootObject {
    "double" => d,
    "doubleArray" => doubles,
    "stringArray" => strings,
    "object" => object,
});

const NESTED: &str = r#"{
    "double": 2.45e-2,
    "doubleArray": [1, 2.5, -3.75, 4e3, 0.5, 1.9643e-11],
    "stringArray": ["str1", "str2"],
    "object": {
        "bool": false,
        "objectArray": [
            { "double": 1.1, "string": "str5" },
            { "double": 2.2, "string": "str6" },
            { "double": 3.3, "string": "str7" }
        ]
    }
}"#;

#[derive(Debug, Default, PartialEq)]
struct MapExample {
    version: String,
    map: BTreeMap<String, String>,
}

record!(MapExample { "version" => version, "stringMap" => map });

const MAP_TEXT: &str =
    r#"{"version":"1.0.1","stringMap":{"str1":"str1v","str2":"str2v","str3":"str3v"}}"#;

/// Record with private state and hand-written binding for part of it.
#[derive(Debug, Default, PartialEq)]
struct Car {
    make: String,
    price: f64,
    serviced: bool,
}

impl Car {
    fn new(make: &str, price: f64) -> Self {
        Car {
            make: make.to_string(),
            price,
            serviced: false,
        }
    }
}

record!(@prototype Car { "make" => make, "price" => price });

impl Bind for Car {
    fn validate(&self, node: &Value) -> Result<()> {
        jsondoc::bind::validate_record(self, node)
    }

    fn deserialize(&mut self, node: &Value) -> Result<()> {
        jsondoc::bind::deserialize_record(self, node)?;
        self.serviced = node
            .as_object()
            .and_then(|members| members.find_bool("serviced"))
            .unwrap_or(false);
        Ok(())
    }

    fn serialize(&self, node: &mut Value) -> Result<()> {
        jsondoc::bind::serialize_record(self, node)?;
        if self.serviced {
            serialize_field(node, "serviced", &true)?;
        }
        Ok(())
    }
}

#[test]
fn test_record_from_text() {
    let text_box: TextBox = from_str(r#"{"text":"hi","width":1.5,"height":2.5}"#).unwrap();
    assert_eq!(
        text_box,
        TextBox {
            text: "hi".to_string(),
            width: 1.5,
            height: 2.5,
        }
    );
}

#[test]
fn test_scalar_members() {
    let text = r#"{
        "str1": "str1Value",
        "str2": "str2Value",
        "double": 2.36531e-7,
        "bool": true,
        "null": null
    }"#;
    let scalars: Scalars = from_str(text).unwrap();
    assert_eq!(scalars.str1, "str1Value");
    assert_eq!(scalars.str2, "str2Value");
    assert_eq!(scalars.d, 2.36531e-7);
    assert!(scalars.b);
}

#[test]
fn test_trailing_comma_in_object() {
    let mut doc = Document::new();
    let err = doc.parse_str(r#"{"a":1,}"#).unwrap_err();
    assert_eq!(err.error, Error::ExpectedValue);
    assert_eq!(err.position, Some(Position { line: 1, column: 8 }));
    assert!(doc.root().is_none());
}

#[test]
fn test_nested_records_mutate_and_round_trip() {
    let mut doc = Document::new();
    doc.parse_str(NESTED).unwrap();

    let mut root = RootObject::default();
    validate(&doc, &root).unwrap();
    doc.deserialize_to(&mut root).unwrap();
    assert_eq!(root.d, 2.45e-2);
    assert_eq!(root.doubles[5], 1.9643e-11);
    assert_eq!(root.object.entries[2].string, "str7");
    assert!(!root.object.b);

    root.object.entries[2].d = 3.14159e-17;
    doc.serialize_from(&root).unwrap();
    let text = doc.to_string_with(&WriteOptions::default()).unwrap();

    let mut reread = Document::new();
    reread.parse_str(&text).unwrap();
    let mut second = RootObject::default();
    reread.deserialize_to(&mut second).unwrap();

    assert_eq!(second.object.entries[2].d, 3.14159e-17);
    assert_eq!(second, root);
}

#[test]
fn test_serialized_member_order_follows_record() {
    let mut doc = Document::new();
    doc.parse_str(NESTED).unwrap();
    let mut root = RootObject::default();
    doc.deserialize_to(&mut root).unwrap();
    doc.serialize_from(&root).unwrap();

    let keys: Vec<&str> = doc
        .root()
        .and_then(Value::as_object)
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["double", "doubleArray", "stringArray", "object"]);
}

#[test]
fn test_string_map_member() {
    let mut doc = Document::new();
    doc.parse_str(MAP_TEXT).unwrap();

    let mut example = MapExample::default();
    validate(&doc, &example).unwrap();
    doc.deserialize_to(&mut example).unwrap();
    assert_eq!(example.version, "1.0.1");
    assert_eq!(example.map["str1"], "str1v");
    assert_eq!(example.map["str2"], "str2v");
    assert_eq!(example.map["str3"], "str3v");
}

#[test]
fn test_map_deserialize_merges() {
    let node = json!({ "a": 1, "b": 2 });
    let mut map: HashMap<String, u8> = HashMap::new();
    map.insert("a".to_string(), 9);
    map.insert("z".to_string(), 26);
    map.deserialize(&node).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map["a"], 1);
    assert_eq!(map["b"], 2);
    assert_eq!(map["z"], 26);
}

#[test]
fn test_map_rejects_wrong_member_kind() {
    let node = json!({ "a": "x", "b": 2 });
    let map: BTreeMap<String, u8> = BTreeMap::new();
    assert_eq!(map.validate(&node), Err(Error::InvalidValueType));
    assert_eq!(map.validate(&json!([])), Err(Error::InvalidValueType));
}

#[test]
fn test_custom_bind_with_private_state() {
    let mut car = Car::new("Volvo", f64::MIN_POSITIVE);
    car.serviced = true;

    let mut doc = Document::new();
    doc.serialize_from(&car).unwrap();
    let text = doc.to_string_with(&WriteOptions::default()).unwrap();
    assert_eq!(
        text,
        "{\n  \"make\" : \"Volvo\",\n  \"price\" : 2.2250738585072014e-308,\n  \"serviced\" : true\n}"
    );

    let back: Car = from_str(&text).unwrap();
    assert_eq!(back, car);
    assert_eq!(back.price.to_bits(), f64::MIN_POSITIVE.to_bits());

    let plain: Car = from_str(r#"{"make": "Saab", "price": 1}"#).unwrap();
    assert!(!plain.serviced);
}

#[test]
fn test_field_by_field_binding() {
    let node = json!({ "w": 3, "h": 4 });
    let mut w = 0u16;
    validate_field(&node, "w", &w).unwrap();
    deserialize_field(&node, "w", &mut w).unwrap();
    assert_eq!(w, 3);
    assert_eq!(
        deserialize_field(&node, "depth", &mut w),
        Err(Error::NameNotPresent)
    );
}

#[test]
fn test_duplicate_keys_last_write_wins() {
    let mut doc = Document::new();
    doc.parse_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root["a"], Value::Number(3.0));
    assert_eq!(
        doc.to_string_with(&WriteOptions::default()).unwrap(),
        "{\n  \"a\" : 3,\n  \"b\" : 2\n}"
    );
}

#[test]
fn test_validate_leaves_target_unchanged() {
    let mut doc = Document::new();
    doc.parse_str(r#"{"text": "new", "width": "wide", "height": 1}"#)
        .unwrap();

    let original = TextBox {
        text: "old".to_string(),
        width: 7.0,
        height: 8.0,
    };
    assert_eq!(validate(&doc, &original), Err(Error::InvalidValueType));
    assert_eq!(original.text, "old");
    assert_eq!(original.width, 7.0);
}

#[test]
fn test_integer_range_checks() {
    assert_eq!(from_str::<u8>("255").unwrap(), 255);
    assert_eq!(from_str::<u8>("256").unwrap_err().error, Error::InvalidValueType);
    assert_eq!(from_str::<i32>("-1.5").unwrap_err().error, Error::InvalidValueType);
    assert_eq!(from_str::<u32>("-1").unwrap_err().error, Error::InvalidValueType);
}

#[test]
fn test_error_text_includes_position() {
    let mut doc = Document::new();
    let err = doc.parse_str("[\n  1,\n  tru\n]").unwrap_err();
    assert_eq!(err.error, Error::ExpectedTrueOrFalse);
    assert_eq!(
        err.to_string(),
        "Expected 'true' or 'false'. Line: 3, column: 3"
    );

    let err = doc.parse_str("").unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON text");
}

#[test]
fn test_trailing_garbage() {
    let mut doc = Document::new();
    let err = doc.parse_str("{} x").unwrap_err();
    assert_eq!(err.error, Error::ExpectedEndOfFile);
    assert_eq!(err.column(), 4);
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}{}", "[".repeat(20), "]".repeat(20));

    let mut doc = Document::with_options(ParseOptions::new().with_max_depth(Some(10)));
    let err = doc.parse_str(&deep).unwrap_err();
    assert_eq!(err.error, Error::DepthLimitExceeded);
    assert_eq!(err.column(), 12);

    let mut doc = Document::new();
    doc.parse_str(&deep).unwrap();
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.json");

    let mut doc = Document::new();
    doc.parse_str(NESTED).unwrap();
    doc.write_file(&path, &WriteOptions::tabs()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("{\n\t\"double\" : 0.0245,"));

    let mut reread = Document::new();
    reread.parse_file(&path).unwrap();
    assert_eq!(reread.root(), doc.root());
}

#[test]
fn test_write_file_without_root() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    let doc = Document::new();
    assert_eq!(
        doc.write_file(&path, &WriteOptions::default()),
        Err(Error::InvalidStructuredData)
    );
    assert!(!path.exists());
}

#[test]
fn test_write_file_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");
    let mut doc = Document::new();
    doc.set_root(json!([1]));
    assert_eq!(
        doc.write_file(&path, &WriteOptions::default()),
        Err(Error::FileOpen)
    );
}

#[test]
fn test_to_string_of_value_tree() {
    let value = json!({ "list": [1, { "deep": [] }], "empty": {} });
    assert_eq!(
        to_string(&value).unwrap(),
        "{\n  \"list\" : [\n    1,\n    {\n      \"deep\" : [\n      ]\n    }\n  ],\n  \"empty\" : {\n  }\n}"
    );
}
