#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end rendering through the public API.
//!
//! Templates are assembled node by node over a real source string, so text
//! nodes and error locations point into that source. Each template is also
//! sent through UL4ON and rendered again to check that the dump keeps
//! everything the evaluator needs.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use ul4_eval::{
    evaluate, evaluate_binary, get_slice, init_tracing, render, render_to_string, DictMap,
    ErrorCategory, InterpreterBuilder, Value,
};
use ul4_ir::ast::{Block, KeywordArg, Node, NodeRef, Template, VarTarget};
use ul4_ir::{BinaryOp, Literal, Location, Span};

/// Source text plus helpers that locate fragments in it.
struct Source(Arc<str>);

impl Source {
    fn new(text: &str) -> Self {
        Source(Arc::from(text))
    }

    fn span_of(&self, fragment: &str) -> Span {
        let start = self.0.find(fragment).expect("fragment must occur in the source");
        Span::new(start as u32, (start + fragment.len()) as u32)
    }

    fn text(&self, fragment: &str) -> NodeRef {
        Node::text(Location::text(Arc::clone(&self.0), self.span_of(fragment)))
    }

    /// Location of the tag `<?{tag_type} {code}?>`.
    fn tag(&self, tag_type: &str, code: &str) -> Location {
        let tag = format!("<?{tag_type} {code}?>");
        let tag_span = self.span_of(&tag);
        let code_start = tag_span.start as usize + 3 + tag_type.len();
        Location::new(
            Arc::clone(&self.0),
            Some(tag_type.to_string()),
            tag_span,
            Span::new(code_start as u32, (code_start + code.len()) as u32),
        )
    }

    fn template(&self, name: &str, content: Vec<NodeRef>) -> Template {
        Template::new(None, Arc::clone(&self.0), Some(name.to_string()), "<?", "?>", Block::new(content))
    }
}

fn plain() -> Location {
    Location::text(Arc::from(""), Span::EMPTY)
}

fn int(n: i64) -> NodeRef {
    Node::constant(plain(), Literal::Int(n))
}

fn var(name: &str) -> NodeRef {
    Node::var(plain(), name)
}

fn vars(pairs: &[(&str, Value)]) -> DictMap {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Render `template` directly and after a UL4ON round trip; both must agree.
fn render_both(template: &Template, variables: &DictMap) -> String {
    let direct = render_to_string(template, variables.clone()).unwrap();
    let dumped = ul4on::dumps_template(template).unwrap();
    let reloaded = ul4on::loads_template(&dumped).unwrap();
    let again = render_to_string(&reloaded, variables.clone()).unwrap();
    assert_eq!(direct, again);
    direct
}

#[test]
fn loop_with_text() {
    let src = Source::new("<ul><?for i in range(3)?><li><?print i?></li><?end for?></ul>");
    let body = vec![
        src.text("<li>"),
        Node::print(src.tag("print", "i"), var("i")),
        src.text("</li>"),
    ];
    let template = src.template(
        "list",
        vec![
            src.text("<ul>"),
            Node::for_loop(
                src.tag("for", "i in range(3)"),
                VarTarget::name("i"),
                Node::call_func(plain(), "range", vec![int(3)]),
                Block::new(body),
            ),
            src.text("</ul>"),
        ],
    );
    assert_eq!(
        render_both(&template, &DictMap::new()),
        "<ul><li>0</li><li>1</li><li>2</li></ul>"
    );
}

#[test]
fn output_fragments_are_kept_separate() {
    let src = Source::new("a<?print x?>b");
    let template = src.template(
        "frag",
        vec![src.text("a"), Node::print(src.tag("print", "x"), var("x")), src.text("b")],
    );
    let output = render(&template, vars(&[("x", Value::Int(1))])).unwrap();
    assert_eq!(output, vec!["a".to_string(), "1".to_string(), "b".to_string()]);
}

#[test]
fn nested_template_render() {
    let src = Source::new("<?def row?>[<?print v?>]<?end def?><?for v in data?><?render row.render(v=v)?><?end for?>");
    let row = Arc::new(src.template(
        "row",
        vec![
            src.text("["),
            Node::print(src.tag("print", "v"), var("v")),
            src.text("]"),
        ],
    ));
    let call = Node::call_meth_keywords(
        plain(),
        var("row"),
        "render",
        vec![KeywordArg::Named("v".to_string(), var("v"))],
    );
    let template = src.template(
        "table",
        vec![
            Node::template(src.tag("def", "row"), row),
            Node::for_loop(
                src.tag("for", "v in data"),
                VarTarget::name("v"),
                var("data"),
                Block::new(vec![Node::render(src.tag("render", "row.render(v=v)"), call)]),
            ),
        ],
    );
    let data = Value::list(vec![Value::string("a"), Value::Int(2)]);
    assert_eq!(render_both(&template, &vars(&[("data", data)])), "[a][2]");
}

#[test]
fn errors_point_into_the_source() {
    let src = Source::new("x<?print 1 // zero?>");
    let division = Node::binary(src.tag("print", "1 // zero"), BinaryOp::FloorDiv, int(1), var("zero"));
    let template = src.template("fail", vec![src.text("x"), Node::print(src.tag("print", "1 // zero"), division)]);
    let err = render(&template, vars(&[("zero", Value::Int(0))])).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ZeroDivisionError);
    let location = err.location.clone().unwrap();
    assert_eq!(location.tag(), "<?print 1 // zero?>");
    assert_eq!(location.code(), "1 // zero");
    assert!(err.to_string().starts_with("ZeroDivisionError: division by zero"));
}

#[test]
fn evaluate_single_expressions() {
    let sum = Node::binary(plain(), BinaryOp::Add, var("a"), int(2));
    assert_eq!(evaluate(&sum, vars(&[("a", Value::Int(40))])).unwrap(), Value::Int(42));
    assert_eq!(
        evaluate_binary(Value::string("ab"), Value::Int(2), BinaryOp::Mul).unwrap(),
        Value::string("abab")
    );
    assert_eq!(get_slice(&Value::string("hello"), Some(1), Some(-1)).unwrap(), Value::string("ell"));
}

#[test]
fn interpreter_builder_depth_limit() {
    let src = Source::new("<?render t.render(t=t)?>");
    let call = Node::call_meth_keywords(
        plain(),
        var("t"),
        "render",
        vec![KeywordArg::Named("t".to_string(), var("t"))],
    );
    let template = Arc::new(src.template("loop", vec![Node::render(src.tag("render", "t.render(t=t)"), call)]));
    let mut interpreter = InterpreterBuilder::new()
        .vars(vars(&[("t", Value::template(Arc::clone(&template)))]))
        .max_depth(8)
        .build();
    let err = interpreter.render(&template).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RecursionError);
}

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
