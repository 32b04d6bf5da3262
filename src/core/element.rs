//! Structural classification of nested values
//!
//! Values are never classified by type name. A type takes part in flattening
//! by implementing [`Nested`], which reports the capability a value exposes at
//! the moment it is visited: atom, text, sequence or mapping.

use serde::{Serialize, Serializer};

/// Boxed iterator over the children of a container
pub type Children<'a, N> = Box<dyn Iterator<Item = Element<'a, N>> + 'a>;

/// Boxed iterator over the key/value pairs of a mapping
pub type Pairs<'a, N> = Box<dyn Iterator<Item = (Element<'a, N>, Element<'a, N>)> + 'a>;

/// Capability probe for recursive data types.
///
/// A value that is both a mapping and iterable must report
/// [`Shape::Mapping`]; mapping-ness always wins over plain iteration.
pub trait Nested: Sized {
    fn shape(&self) -> Shape<'_, Self>;
}

/// What a value can do, as reported by [`Nested::shape`]
pub enum Shape<'a, N: 'a> {
    /// No iteration capability
    Atom,
    /// Character or byte string
    Text(Text<'a>),
    /// Ordered or unordered iteration over elements
    Sequence(Children<'a, N>),
    /// Key lookup with key, value and item views
    Mapping(Box<dyn MappingView<'a, N> + 'a>),
}

/// Key/value views over a mapping container.
///
/// Only `items` is required; the other views follow its order.
pub trait MappingView<'a, N: 'a> {
    fn items(&self) -> Pairs<'a, N>;

    fn keys(&self) -> Children<'a, N> {
        Box::new(self.items().map(|(key, _)| key))
    }

    fn values(&self) -> Children<'a, N> {
        Box::new(self.items().map(|(_, value)| value))
    }
}

/// Text-like value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
    Char(char),
    Byte(u8),
}

impl<'a> Text<'a> {
    /// Number of units: Unicode scalar values for strings, bytes otherwise
    pub fn len(&self) -> usize {
        match self {
            Text::Str(s) => s.chars().count(),
            Text::Bytes(b) => b.len(),
            Text::Char(_) | Text::Byte(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Text::Str(s) => s.is_empty(),
            Text::Bytes(b) => b.is_empty(),
            Text::Char(_) | Text::Byte(_) => false,
        }
    }

    /// True when the text is exactly one unit long
    pub fn is_single_unit(&self) -> bool {
        match self {
            Text::Str(s) => {
                let mut chars = s.chars();
                chars.next().is_some() && chars.next().is_none()
            }
            Text::Bytes(b) => b.len() == 1,
            Text::Char(_) | Text::Byte(_) => true,
        }
    }

    /// Single-unit elements in original order
    pub fn units<N: 'a>(self) -> Children<'a, N> {
        match self {
            Text::Str(s) => Box::new(s.chars().map(Element::Char)),
            Text::Bytes(b) => Box::new(b.iter().map(|&byte| Element::Byte(byte))),
            Text::Char(c) => Box::new(std::iter::once(Element::Char(c))),
            Text::Byte(byte) => Box::new(std::iter::once(Element::Byte(byte))),
        }
    }
}

/// A position in the traversal, and the type of every emitted leaf.
///
/// Nodes are borrowed from the input. Text units produced by decomposition
/// are carried by value.
#[derive(Debug, PartialEq)]
pub enum Element<'a, N> {
    Node(&'a N),
    Str(&'a str),
    Bytes(&'a [u8]),
    Char(char),
    Byte(u8),
}

impl<N> Clone for Element<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Element<'_, N> {}

impl<'a, N: Nested> Element<'a, N> {
    pub fn shape(self) -> Shape<'a, N> {
        match self {
            Element::Node(node) => node.shape(),
            Element::Str(s) => Shape::Text(Text::Str(s)),
            Element::Bytes(b) => Shape::Text(Text::Bytes(b)),
            Element::Char(c) => Shape::Text(Text::Char(c)),
            Element::Byte(byte) => Shape::Text(Text::Byte(byte)),
        }
    }

    /// Returns the borrowed input node, if this element is one
    pub fn as_node(&self) -> Option<&'a N> {
        match *self {
            Element::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl<N: Serialize> Serialize for Element<'_, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Element::Node(node) => node.serialize(serializer),
            Element::Str(s) => serializer.serialize_str(s),
            Element::Bytes(b) => b.serialize(serializer),
            Element::Char(c) => serializer.serialize_char(c),
            Element::Byte(byte) => serializer.serialize_u8(byte),
        }
    }
}

/// Classification of one element, computed once before dispatch
pub enum Class<'a, N: 'a> {
    Atom,
    TextAtom,
    Sequence(Children<'a, N>),
    Mapping(Box<dyn MappingView<'a, N> + 'a>),
}

/// Classify an element. Single-unit text, or any text when `flatten_text` is
/// off, is terminal; otherwise text is a sequence of its units, so empty text
/// yields nothing.
pub fn classify<'a, N: Nested + 'a>(element: Element<'a, N>, flatten_text: bool) -> Class<'a, N> {
    match element.shape() {
        Shape::Atom => Class::Atom,
        Shape::Text(text) if !flatten_text || text.is_single_unit() => Class::TextAtom,
        Shape::Text(text) => Class::Sequence(text.units()),
        Shape::Sequence(children) => Class::Sequence(children),
        Shape::Mapping(view) => Class::Mapping(view),
    }
}
