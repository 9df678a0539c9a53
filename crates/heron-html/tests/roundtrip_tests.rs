//! Property tests: well-formed markup survives a parse/serialize round trip.

use heron_dom::serialize::serialize_children;
use heron_html::parse_document;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &["div", "span", "em", "b", "section"];

/// A generated node of well-formed markup.
#[derive(Clone, Debug)]
enum Node {
    Text(String),
    Element(&'static str, Vec<Node>),
}

impl Node {
    fn generate(g: &mut Gen, depth: usize) -> Self {
        if depth == 0 || bool::arbitrary(g) {
            let letters: Vec<char> = ('a'..='z').collect();
            let len = usize::arbitrary(g) % 6 + 1;
            let text = (0..len).map(|_| *g.choose(&letters).unwrap()).collect();
            return Self::Text(text);
        }
        let tag = *g.choose(TAGS).unwrap();
        let count = usize::arbitrary(g) % 4;
        let children = (0..count).map(|_| Self::generate(g, depth - 1)).collect();
        Self::Element(tag, children)
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(tag, children) => {
                out.push_str(&format!("<{tag}>"));
                for child in children {
                    child.render(out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }
}

/// The children of `<body>`.
#[derive(Clone, Debug)]
struct Body(Vec<Node>);

impl Arbitrary for Body {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 5;
        Self((0..count).map(|_| Node::generate(g, 4)).collect())
    }
}

impl Body {
    fn render(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.render(&mut out);
        }
        out
    }
}

#[quickcheck]
fn well_formed_markup_round_trips(body: Body) -> bool {
    let markup = body.render();
    let tree = parse_document(&markup);
    let Some(body_element) = tree.body() else {
        return false;
    };
    serialize_children(&tree, body_element) == markup
}

#[quickcheck]
fn serialization_is_stable_under_reparsing(body: Body) -> bool {
    let first = parse_document(&body.render());
    let once = serialize_children(&first, first.root());
    let second = parse_document(&once);
    serialize_children(&second, second.root()) == once
}

#[test]
fn test_escaped_text_round_trips() {
    let markup = "<p title=\"a&amp;&quot;b\">1 &lt; 2 &amp;&amp; 3 &gt; 2&nbsp;</p>";
    let tree = parse_document(markup);
    assert_eq!(serialize_children(&tree, tree.body().unwrap()), markup);
}

#[test]
fn test_raw_text_round_trips() {
    let markup = "<script>if (a < b && c) {}</script><style>p > a {}</style>";
    let tree = parse_document(markup);
    assert_eq!(serialize_children(&tree, tree.head().unwrap()), markup);
}
