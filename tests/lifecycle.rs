use symdiff::{DiffError, ExprArena, Node, differentiate, render};

#[test]
fn original_can_be_released_before_the_derivative() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    let square = arena.mul(x, x).unwrap();
    let df = differentiate(&mut arena, square).unwrap();

    let kept = arena.retain(&[df]).unwrap();

    // `x` is still reachable through the derivative; `x * x` is not.
    assert_eq!(arena.len(), 6);
    assert_eq!(render(&arena, kept[0]).unwrap(), "((1.0 * x) + (x * 1.0))");
    assert!(matches!(render(&arena, square), Err(DiffError::MalformedTree(_))));
}

#[test]
fn aliased_leaf_survives_once() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    let square = arena.mul(x, x).unwrap();
    let df = differentiate(&mut arena, square).unwrap();

    let roots = arena.retain(&[square, df]).unwrap();

    let counted_separately = roots
        .iter()
        .map(|&root| arena.reachable_count(&[root]).unwrap())
        .sum::<usize>();
    assert!(counted_separately > arena.len());
    let Node::Mul(l, r) = arena.node(roots[0]).unwrap() else {
        panic!("expected the square");
    };
    assert_eq!(l, r);
}

#[test]
fn clear_invalidates_everything() {
    let mut arena = ExprArena::new();
    let x = arena.variable().unwrap();
    arena.clear();

    assert!(arena.is_empty());
    assert!(!arena.contains(x));

    let y = arena.variable().unwrap();
    assert_eq!(render(&arena, y).unwrap(), "x");
}
