//! The flattener
//!
//! A lazy, pull-based iterator over the leaves of a nested value. Each open
//! container occupies one frame on an explicit work stack; dropping the
//! iterator abandons the traversal.
//!
//! There is no depth limit and no cycle detection. A `Nested` type that
//! reaches itself through shared ownership makes the stack grow without bound.

use crate::core::element::{classify, Children, Class, Element, Nested};
use crate::core::policy::{FlattenOptions, MappingPolicy};
use crate::error::UnknownPolicy;

/// Lazy sequence of leaves
pub struct Flattener<'a, N: 'a> {
    options: FlattenOptions,
    root: Option<Element<'a, N>>,
    stack: Vec<Children<'a, N>>,
    advisory: Option<UnknownPolicy>,
}

impl<'a, N: Nested + 'a> Flattener<'a, N> {
    pub fn new(value: &'a N, options: FlattenOptions) -> Self {
        Self::from_element(Element::Node(value), options)
    }

    /// Start from any element, e.g. a bare string or a text unit
    pub fn from_element(element: Element<'a, N>, options: FlattenOptions) -> Self {
        Self {
            options,
            root: Some(element),
            stack: Vec::new(),
            advisory: None,
        }
    }

    /// Build from an untyped policy name. Unknown names fall back to `drop`
    /// and leave an advisory on the flattener.
    pub fn with_policy_name(value: &'a N, flatten_text: bool, mapping_policy: &str) -> Self {
        let (policy, advisory) = MappingPolicy::resolve(mapping_policy);
        let mut flattener = Self::new(value, FlattenOptions::new(flatten_text, policy));
        flattener.advisory = advisory;
        flattener
    }

    pub fn options(&self) -> FlattenOptions {
        self.options
    }

    /// Advisory raised while resolving the policy name, if any
    pub fn advisory(&self) -> Option<&UnknownPolicy> {
        self.advisory.as_ref()
    }

    /// Number of containers currently open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn next_element(&mut self) -> Option<Element<'a, N>> {
        if let Some(root) = self.root.take() {
            return Some(root);
        }
        loop {
            let frame = self.stack.last_mut()?;
            match frame.next() {
                Some(element) => return Some(element),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<'a, N: Nested + 'a> Iterator for Flattener<'a, N> {
    type Item = Element<'a, N>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let element = self.next_element()?;
            match classify(element, self.options.flatten_text) {
                Class::Atom | Class::TextAtom => return Some(element),
                Class::Sequence(children) => self.stack.push(children),
                Class::Mapping(view) => match self.options.mapping_policy {
                    MappingPolicy::Drop => {}
                    MappingPolicy::Keep => return Some(element),
                    MappingPolicy::FlattenValues => self.stack.push(view.values()),
                    // each pair is a two-element sequence
                    MappingPolicy::FlattenItems => self
                        .stack
                        .push(Box::new(view.items().flat_map(|(key, value)| [key, value]))),
                },
            }
        }
    }
}

/// Flatten `value` lazily with typed options
pub fn flatten<N: Nested>(value: &N, options: FlattenOptions) -> Flattener<'_, N> {
    Flattener::new(value, options)
}

/// Flatten `value` lazily, resolving the mapping policy by name.
///
/// An unrecognized name emits a warning and proceeds as `drop`.
pub fn flatten_with_policy_name<'a, N: Nested>(
    value: &'a N,
    flatten_text: bool,
    mapping_policy: &str,
) -> Flattener<'a, N> {
    Flattener::with_policy_name(value, flatten_text, mapping_policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::{MappingView, Pairs, Shape, Text};

    #[derive(Debug, PartialEq)]
    enum Tree {
        Num(i32),
        Word(&'static str),
        List(Vec<Tree>),
        Map(Vec<(Tree, Tree)>),
    }

    struct MapView<'a>(&'a [(Tree, Tree)]);

    impl<'a> MappingView<'a, Tree> for MapView<'a> {
        fn items(&self) -> Pairs<'a, Tree> {
            let pairs = self.0;
            Box::new(
                pairs
                    .iter()
                    .map(|(k, v)| (Element::Node(k), Element::Node(v))),
            )
        }
    }

    impl Nested for Tree {
        fn shape(&self) -> Shape<'_, Self> {
            match self {
                Tree::Num(_) => Shape::Atom,
                Tree::Word(w) => Shape::Text(Text::Str(w)),
                Tree::List(items) => Shape::Sequence(Box::new(items.iter().map(Element::Node))),
                Tree::Map(pairs) => Shape::Mapping(Box::new(MapView(pairs))),
            }
        }
    }

    fn nums(flattener: Flattener<'_, Tree>) -> Vec<i32> {
        flattener
            .map(|leaf| match leaf {
                Element::Node(Tree::Num(n)) => *n,
                other => panic!("unexpected leaf {:?}", other),
            })
            .collect()
    }

    fn sample() -> Tree {
        Tree::List(vec![
            Tree::Num(0),
            Tree::List(vec![Tree::Num(1), Tree::List(vec![])]),
            Tree::Map(vec![(Tree::Num(2), Tree::List(vec![Tree::Num(3)]))]),
            Tree::Num(4),
        ])
    }

    #[test]
    fn test_flatten_drop_skips_mapping() {
        let tree = sample();
        assert_eq!(nums(flatten(&tree, FlattenOptions::default())), vec![0, 1, 4]);
    }

    #[test]
    fn test_flatten_items_and_values() {
        let tree = sample();
        let items = FlattenOptions::default().with_mapping_policy(MappingPolicy::FlattenItems);
        assert_eq!(nums(flatten(&tree, items)), vec![0, 1, 2, 3, 4]);

        let values = FlattenOptions::default().with_mapping_policy(MappingPolicy::FlattenValues);
        assert_eq!(nums(flatten(&tree, values)), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_keep_returns_the_borrowed_mapping() {
        let tree = sample();
        let keep = FlattenOptions::default().with_mapping_policy(MappingPolicy::Keep);
        let leaves: Vec<_> = flatten(&tree, keep).collect();
        assert_eq!(leaves.len(), 4);
        let Tree::List(items) = &tree else {
            unreachable!()
        };
        assert!(std::ptr::eq(leaves[2].as_node().unwrap(), &items[2]));
    }

    #[test]
    fn test_text_decomposition() {
        let tree = Tree::List(vec![Tree::Word("ab"), Tree::Word("c")]);
        let options = FlattenOptions::default().with_flatten_text(true);
        let leaves: Vec<_> = flatten(&tree, options).collect();
        assert_eq!(
            leaves,
            vec![Element::Char('a'), Element::Char('b'), Element::Node(&Tree::Word("c"))]
        );

        let whole: Vec<_> = flatten(&tree, FlattenOptions::default()).collect();
        assert_eq!(whole.len(), 2);
    }

    #[test]
    fn test_depth_tracks_open_containers() {
        let tree = Tree::List(vec![Tree::List(vec![Tree::Num(7)]), Tree::Num(8)]);
        let mut flattener = flatten(&tree, FlattenOptions::default());
        assert_eq!(flattener.depth(), 0);
        assert_eq!(flattener.next(), Some(Element::Node(&Tree::Num(7))));
        assert_eq!(flattener.depth(), 2);
        assert_eq!(flattener.next(), Some(Element::Node(&Tree::Num(8))));
        assert_eq!(flattener.depth(), 1);
        assert_eq!(flattener.next(), None);
        assert_eq!(flattener.depth(), 0);
    }

    #[test]
    fn test_policy_name_advisory() {
        let tree = sample();
        let flattener = flatten_with_policy_name(&tree, false, "flatten_everything");
        assert_eq!(flattener.options().mapping_policy, MappingPolicy::Drop);
        assert_eq!(
            flattener.advisory(),
            Some(&UnknownPolicy("flatten_everything".to_string()))
        );
        assert_eq!(nums(flattener), vec![0, 1, 4]);

        let flattener = flatten_with_policy_name(&tree, false, "flatten_items");
        assert!(flattener.advisory().is_none());
        assert_eq!(nums(flattener), vec![0, 1, 2, 3, 4]);
    }
}
