use symdiff::prelude::*;

fn main() -> Result<()> {
    let mut arena = ExprArena::new();

    // f(x) = x * (x + 2)
    let x = arena.variable()?;
    let x_again = arena.variable()?;
    let two = arena.constant(2.0)?;
    let sum = arena.add(x_again, two)?;
    let f = arena.mul(x, sum)?;

    let df = differentiate(&mut arena, f)?;

    println!("f(x)  = {}", render(&arena, f)?);
    println!("f'(x) = {}", render(&arena, df)?);
    println!("(unsimplified; equivalent to 2.0*x + 2.0)");

    let shared = arena.reachable_count(&[f])? + arena.reachable_count(&[df])?
        - arena.reachable_count(&[f, df])?;
    println!("{} nodes, {shared} shared between f and f'", arena.len());

    let kept = arena.retain(&[df])?;
    println!("after releasing f: {} nodes, f'(x) = {}", arena.len(), render(&arena, kept[0])?);
    Ok(())
}
