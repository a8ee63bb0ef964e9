use std::fmt::Write;

use symdiff::{BinaryOp, ExprArena, Renderer, differentiate, render};

#[test]
fn constants_use_one_decimal() {
    let mut arena = ExprArena::new();
    let cases = [(2.0, "2.0"), (0.26, "0.3"), (-3.0, "-3.0"), (1234.56, "1234.6")];
    for (value, expected) in cases {
        let c = arena.constant(value).unwrap();
        assert_eq!(render(&arena, c).unwrap(), expected, "{value}");
    }
}

#[test]
fn every_operation_is_parenthesized() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    let one = arena.constant(1.0).unwrap();
    let two = arena.constant(2.0).unwrap();
    let sum = arena.operation(BinaryOp::Add, x, one).unwrap();
    let product = arena.operation(BinaryOp::Mul, two, sum).unwrap();
    let outer = arena.add(product, x).unwrap();

    assert_eq!(render(&arena, sum).unwrap(), "(x + 1.0)");
    assert_eq!(render(&arena, product).unwrap(), "(2.0 * (x + 1.0))");
    assert_eq!(render(&arena, outer).unwrap(), "((2.0 * (x + 1.0)) + x)");
}

#[test]
fn rendering_is_repeatable_after_aliasing() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    let two = arena.constant(2.0).unwrap();
    let sum = arena.add(x, two).unwrap();
    let f = arena.mul(x, sum).unwrap();

    let first = render(&arena, f).unwrap();
    let df = differentiate(&mut arena, f).unwrap();
    let d_first = render(&arena, df).unwrap();

    assert_eq!(render(&arena, f).unwrap(), first);
    assert_eq!(render(&arena, df).unwrap(), d_first);
}

#[test]
fn custom_symbol_and_precision() {
    let mut arena = ExprArena::new();
    let t = arena.variable().unwrap();
    let half = arena.constant(0.5).unwrap();
    let product = arena.mul(half, t).unwrap();

    let renderer = Renderer::new().symbol("t").precision(3);

    assert_eq!(renderer.render(&arena, product).unwrap(), "(0.500 * t)");
}

#[test]
fn writes_into_an_existing_buffer() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    let square = arena.mul(x, x).unwrap();
    let mut out = String::from("f(x) = ");

    Renderer::new().write_to(&arena, square, &mut out).unwrap();
    write!(out, ";").unwrap();

    assert_eq!(out, "f(x) = (x * x);");
}
