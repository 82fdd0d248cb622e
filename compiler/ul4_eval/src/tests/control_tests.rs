//! Tests for statements and control flow, run through whole templates.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use ul4_ir::ast::{Block, Comprehension, DictItem, KeywordArg, Node, NodeRef, Template, VarTarget};
use ul4_ir::{AugOp, BinaryOp, Location, Span, UnaryOp};
use ul4_patterns::{DictMap, ErrorCategory, Value};

use super::{
    binary, call, eval, int, loc, meth, none, print, render, render_with, string, template, text,
    var,
};

fn store(name: &str, value: NodeRef) -> NodeRef {
    Node::store_var(loc(), VarTarget::name(name), value)
}

fn for_each(name: &str, container: NodeRef, body: Vec<NodeRef>) -> NodeRef {
    Node::for_loop(loc(), VarTarget::name(name), container, Block::new(body))
}

fn range(n: i64) -> NodeRef {
    call("range", vec![int(n)])
}

// Output

#[test]
fn text_and_print() {
    let out = render(vec![text("<p>"), print(int(42)), text("</p>")]).unwrap();
    assert_eq!(out, "<p>42</p>");
}

#[test]
fn print_of_none_is_empty() {
    assert_eq!(render(vec![print(none())]).unwrap(), "");
}

#[test]
fn printx_escapes() {
    let out = render(vec![Node::printx(loc(), string("<&>"))]).unwrap();
    assert_eq!(out, "&lt;&amp;&gt;");
}

// Variables

#[test]
fn store_and_augmented_assignment() {
    let out = render(vec![
        store("x", int(5)),
        Node::aug_assign(loc(), AugOp::Add, "x", int(3)),
        Node::aug_assign(loc(), AugOp::Mul, "x", int(2)),
        Node::aug_assign(loc(), AugOp::FloorDiv, "x", int(3)),
        print(var("x")),
    ])
    .unwrap();
    assert_eq!(out, "5");
}

#[test]
fn augmented_assignment_needs_a_bound_name() {
    let err = render(vec![Node::aug_assign(loc(), AugOp::Add, "missing", int(1))]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
}

#[test]
fn tuple_unpacking() {
    let pair = Node::list(loc(), vec![int(1), Node::list(loc(), vec![int(2), int(3)])]);
    let target = VarTarget::Tuple(vec![VarTarget::name("a"), VarTarget::names(["b", "c"])]);
    let out = render(vec![
        Node::store_var(loc(), target, pair),
        print(var("a")),
        print(var("b")),
        print(var("c")),
    ])
    .unwrap();
    assert_eq!(out, "123");
}

#[test]
fn unpack_mismatch_messages() {
    let too_few = render(vec![Node::store_var(
        loc(),
        VarTarget::names(["a", "b", "c"]),
        string("ab"),
    )])
    .unwrap_err();
    assert_eq!(too_few.category(), ErrorCategory::ValueError);
    assert_eq!(too_few.message, "mismatched variable unpacking: 3 varnames, 2 items");

    let too_many = render(vec![Node::store_var(
        loc(),
        VarTarget::names(["a", "b"]),
        string("abc"),
    )])
    .unwrap_err();
    assert_eq!(too_many.message, "mismatched variable unpacking: 2 varnames, >2 items");
}

#[test]
fn delete_variable() {
    let err = render(vec![store("x", int(1)), Node::del_var(loc(), "x"), print(var("x"))]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
    assert_eq!(err.message, "name 'x' is not defined");
}

#[test]
fn undefined_variable() {
    let err = eval(&var("nope")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
}

// Loops

#[test]
fn for_loop_over_range() {
    let out = render(vec![for_each("i", range(4), vec![print(var("i"))])]).unwrap();
    assert_eq!(out, "0123");
}

#[test]
fn loop_variable_outlives_the_loop() {
    let out = render(vec![for_each("i", range(3), vec![]), print(var("i"))]).unwrap();
    assert_eq!(out, "2");
}

#[test]
fn break_and_continue() {
    let skip_odd = Node::if_chain(
        loc(),
        Block::new(vec![Node::if_block(
            loc(),
            binary(BinaryOp::Mod, var("i"), int(2)),
            Block::new(vec![Node::continue_stmt(loc())]),
        )]),
    );
    let stop_at_six = Node::if_chain(
        loc(),
        Block::new(vec![Node::if_block(
            loc(),
            binary(BinaryOp::Ge, var("i"), int(6)),
            Block::new(vec![Node::break_stmt(loc())]),
        )]),
    );
    let out = render(vec![for_each(
        "i",
        range(10),
        vec![stop_at_six, skip_odd, print(var("i"))],
    )])
    .unwrap();
    assert_eq!(out, "024");
}

#[test]
fn break_only_leaves_the_innermost_loop() {
    let inner = for_each(
        "j",
        range(3),
        vec![
            Node::if_chain(
                loc(),
                Block::new(vec![Node::if_block(
                    loc(),
                    binary(BinaryOp::Eq, var("j"), int(1)),
                    Block::new(vec![Node::break_stmt(loc())]),
                )]),
            ),
            print(var("j")),
        ],
    );
    let out = render(vec![for_each("i", range(2), vec![print(var("i")), inner])]).unwrap();
    assert_eq!(out, "0010");
}

#[test]
fn loop_with_unpacking() {
    let out = render(vec![Node::for_loop(
        loc(),
        VarTarget::names(["i", "c"]),
        call("enumerate", vec![string("ab")]),
        Block::new(vec![print(var("i")), print(var("c"))]),
    )])
    .unwrap();
    assert_eq!(out, "0a1b");
}

#[test]
fn stray_break_is_an_error() {
    let err = render(vec![Node::break_stmt(loc())]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ValueError);
    assert_eq!(err.message, "break outside of loop");
    assert!(!err.is_control_flow());

    let err = render(vec![Node::continue_stmt(loc())]).unwrap_err();
    assert_eq!(err.message, "continue outside of loop");
}

#[test]
fn iterating_a_number_fails() {
    let err = render(vec![for_each("i", int(5), vec![])]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
    assert_eq!(err.message, "'int' object is not iterable");
}

// Conditionals

fn grade(score: i64) -> String {
    let chain = Node::if_chain(
        loc(),
        Block::new(vec![
            Node::if_block(
                loc(),
                binary(BinaryOp::Ge, var("score"), int(90)),
                Block::new(vec![text("A")]),
            ),
            Node::elif_block(
                loc(),
                binary(BinaryOp::Ge, var("score"), int(50)),
                Block::new(vec![text("B")]),
            ),
            Node::else_block(loc(), Block::new(vec![text("C")])),
        ]),
    );
    let mut vars = DictMap::new();
    vars.insert("score".to_string(), Value::Int(score));
    render_with(vec![chain], vars).unwrap()
}

#[test]
fn if_elif_else_takes_one_branch() {
    assert_eq!(grade(95), "A");
    assert_eq!(grade(60), "B");
    assert_eq!(grade(10), "C");
}

// Expressions

#[test]
fn and_or_short_circuit() {
    let never = call("nosuchfunction", vec![]);
    assert_eq!(eval(&binary(BinaryOp::And, int(0), never.clone())).unwrap(), Value::Int(0));
    assert_eq!(eval(&binary(BinaryOp::Or, string("x"), never)).unwrap(), Value::string("x"));
    assert_eq!(eval(&binary(BinaryOp::Or, int(0), string("y"))).unwrap(), Value::string("y"));
}

#[test]
fn not_operator() {
    assert_eq!(eval(&Node::unary(loc(), UnaryOp::Not, int(0))).unwrap(), Value::Bool(true));
}

#[test]
fn comprehensions() {
    let comp = Comprehension {
        target: VarTarget::name("x"),
        container: range(5),
        condition: Some(binary(BinaryOp::Mod, var("x"), int(2))),
    };
    let squares = Node::list_comp(loc(), binary(BinaryOp::Mul, var("x"), var("x")), comp.clone());
    assert_eq!(
        eval(&squares).unwrap(),
        Value::list(vec![Value::Int(1), Value::Int(9)])
    );

    let dict = Node::dict_comp(loc(), call("str", vec![var("x")]), var("x"), comp);
    let Value::Dict(map) = eval(&dict).unwrap() else { panic!("dict comprehension must build a dict") };
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["1", "3"]);
}

#[test]
fn comprehension_variables_do_not_leak() {
    let comp = Comprehension {
        target: VarTarget::name("x"),
        container: range(3),
        condition: None,
    };
    let err = render(vec![
        print(Node::list_comp(loc(), var("x"), comp)),
        print(var("x")),
    ])
    .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
}

#[test]
fn generator_expressions_feed_functions() {
    let comp = Comprehension {
        target: VarTarget::name("x"),
        container: range(4),
        condition: None,
    };
    let gen = Node::gen_expr(loc(), binary(BinaryOp::Mul, var("x"), int(10)), comp);
    assert_eq!(
        eval(&call("list", vec![gen.clone()])).unwrap(),
        Value::list(vec![Value::Int(0), Value::Int(10), Value::Int(20), Value::Int(30)])
    );
    assert_eq!(eval(&call("max", vec![gen])).unwrap(), Value::Int(30));
}

#[test]
fn dict_literals_with_splat() {
    let base = Node::dict(loc(), vec![DictItem::Pair(string("a"), int(1))]);
    let merged = Node::dict(
        loc(),
        vec![
            DictItem::Splat(base),
            DictItem::Pair(string("b"), int(2)),
            DictItem::Pair(string("a"), int(3)),
        ],
    );
    let Value::Dict(map) = eval(&merged).unwrap() else { panic!("dict literal must build a dict") };
    assert_eq!(map.get("a").cloned().unwrap(), Value::Int(3));
    assert_eq!(map.len(), 2);

    let err = eval(&Node::dict(loc(), vec![DictItem::Splat(int(1))])).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

#[test]
fn slices_and_attributes() {
    let sliced = Node::get_slice(loc(), string("abcdef"), Some(int(1)), Some(none()));
    assert_eq!(eval(&sliced).unwrap(), Value::string("bcdef"));

    let dict = Node::dict(loc(), vec![DictItem::Pair(string("name"), string("ul4"))]);
    assert_eq!(eval(&Node::get_attr(loc(), dict.clone(), "name")).unwrap(), Value::string("ul4"));
    let err = eval(&Node::get_attr(loc(), dict, "other")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::KeyError);
    let err = eval(&Node::get_attr(loc(), int(1), "real")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

#[test]
fn method_calls_through_nodes() {
    let upper = meth(string("abc"), "upper", vec![]);
    assert_eq!(eval(&upper).unwrap(), Value::string("ABC"));
}

#[test]
fn errors_carry_the_innermost_location() {
    let source: Arc<str> = Arc::from("<?print 1 // 0?>");
    let inner_loc = Location::new(
        Arc::clone(&source),
        Some("print".to_string()),
        Span::new(0, 16),
        Span::new(8, 14),
    );
    let division = Node::binary(inner_loc, BinaryOp::FloorDiv, int(1), int(0));
    let err = render(vec![print(division)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ZeroDivisionError);
    assert_eq!(err.location.unwrap().code(), "1 // 0");
}

// Templates

fn greeting() -> Arc<Template> {
    template("greet", vec![text("Hello "), print(var("name")), text("!")])
}

#[test]
fn template_definitions_bind_their_name() {
    let out = render(vec![
        Node::template(loc(), greeting()),
        print(Node::get_attr(loc(), var("greet"), "name")),
    ])
    .unwrap();
    assert_eq!(out, "greet");
}

#[test]
fn render_splices_output() {
    let call_render = Node::call_meth_keywords(
        loc(),
        var("greet"),
        "render",
        vec![KeywordArg::Named("name".to_string(), string("World"))],
    );
    let out = render(vec![
        Node::template(loc(), greeting()),
        text("["),
        Node::render(loc(), call_render),
        text("]"),
    ])
    .unwrap();
    assert_eq!(out, "[Hello World!]");
}

#[test]
fn renders_returns_a_string() {
    let mut args = DictMap::new();
    args.insert("name".to_string(), Value::string("you"));
    let call_renders = Node::call_meth_keywords(
        loc(),
        var("greet"),
        "renders",
        vec![KeywordArg::Splat(var("args"))],
    );
    let mut vars = DictMap::new();
    vars.insert("greet".to_string(), Value::template(greeting()));
    vars.insert("args".to_string(), Value::dict(args));
    let out = render_with(vec![print(meth(call_renders, "upper", vec![]))], vars).unwrap();
    assert_eq!(out, "HELLO YOU!");
}

#[test]
fn nested_templates_only_see_their_arguments() {
    let mut vars = DictMap::new();
    vars.insert("greet".to_string(), Value::template(greeting()));
    vars.insert("name".to_string(), Value::string("outer"));
    let call_render = meth(var("greet"), "render", vec![]);
    let err = render_with(vec![Node::render(loc(), call_render)], vars).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NameError);
}

#[test]
fn render_of_a_plain_value_prints_it() {
    let out = render(vec![Node::render(loc(), int(7))]).unwrap();
    assert_eq!(out, "7");
}

#[test]
fn keyword_argument_errors() {
    let mut vars = DictMap::new();
    vars.insert("greet".to_string(), Value::template(greeting()));

    let duplicate = Node::call_meth_keywords(
        loc(),
        var("greet"),
        "renders",
        vec![
            KeywordArg::Named("name".to_string(), string("a")),
            KeywordArg::Named("name".to_string(), string("b")),
        ],
    );
    let err = render_with(vec![print(duplicate)], vars.clone()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ArgumentError);
    assert_eq!(err.message, "duplicate keyword argument name in renders()");

    let on_string = Node::call_meth_keywords(
        loc(),
        string("x"),
        "upper",
        vec![KeywordArg::Named("a".to_string(), int(1))],
    );
    let err = render_with(vec![print(on_string)], vars.clone()).unwrap_err();
    assert_eq!(err.message, "method upper() doesn't support keyword arguments");

    let positional = meth(var("greet"), "renders", vec![int(1)]);
    let err = render_with(vec![print(positional)], vars).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::ArgumentError);
}

#[test]
fn render_on_a_non_template_is_a_type_error() {
    let call_render = Node::call_meth_keywords(
        loc(),
        string("x"),
        "render",
        vec![KeywordArg::Named("a".to_string(), int(1))],
    );
    let err = render(vec![Node::render(loc(), call_render)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::TypeError);
}

#[test]
fn template_attributes() {
    let mut vars = DictMap::new();
    vars.insert("t".to_string(), Value::template(greeting()));
    let out = render_with(
        vec![
            print(Node::get_attr(loc(), var("t"), "startdelim")),
            print(Node::get_attr(loc(), var("t"), "enddelim")),
        ],
        vars,
    )
    .unwrap();
    assert_eq!(out, "<??>");
}

#[test]
fn get_and_vars_see_template_variables() {
    let mut vars = DictMap::new();
    vars.insert("x".to_string(), Value::Int(1));
    let out = render_with(
        vec![
            print(call("get", vec![string("x")])),
            print(call("get", vec![string("y"), string("-")])),
            print(call("len", vec![call("vars", vec![])])),
        ],
        vars,
    )
    .unwrap();
    assert_eq!(out, "1-1");
}
