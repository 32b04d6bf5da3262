//! serde_json adapter
//!
//! `null`, booleans and numbers are atoms, strings are text, arrays are
//! sequences and objects are mappings keyed by text. Objects iterate in
//! insertion order.

use serde_json::{Map, Value};

use crate::core::element::{Children, Element, MappingView, Nested, Pairs, Shape, Text};

struct ObjectView<'a>(&'a Map<String, Value>);

impl<'a> MappingView<'a, Value> for ObjectView<'a> {
    fn items(&self) -> Pairs<'a, Value> {
        let map = self.0;
        Box::new(
            map.iter()
                .map(|(key, value)| (Element::Str(key.as_str()), Element::Node(value))),
        )
    }

    fn keys(&self) -> Children<'a, Value> {
        let map = self.0;
        Box::new(map.keys().map(|key| Element::Str(key.as_str())))
    }

    fn values(&self) -> Children<'a, Value> {
        let map = self.0;
        Box::new(map.values().map(Element::Node))
    }
}

impl Nested for Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Atom,
            Value::String(s) => Shape::Text(Text::Str(s)),
            Value::Array(items) => Shape::Sequence(Box::new(items.iter().map(Element::Node))),
            Value::Object(map) => Shape::Mapping(Box::new(ObjectView(map))),
        }
    }
}

impl From<Element<'_, Value>> for Value {
    fn from(leaf: Element<'_, Value>) -> Self {
        match leaf {
            Element::Node(value) => value.clone(),
            Element::Str(s) => Value::String(s.to_owned()),
            Element::Bytes(b) => Value::Array(b.iter().map(|&byte| Value::from(byte)).collect()),
            Element::Char(c) => Value::String(c.to_string()),
            Element::Byte(byte) => Value::from(byte),
        }
    }
}
