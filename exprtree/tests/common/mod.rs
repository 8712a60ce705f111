#![allow(dead_code)]

use exprtree::{ExprRef, ExpressionFactory};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub const SYMBOLS: &[&str] = &["f", "g", "h", "x", "y", "z", "+", "*", "0", "1", "<=", "a.b", "it's"];

pub fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Random expression of bounded depth, built bottom-up in `factory`.
pub fn random_expression(factory: &ExpressionFactory, rng: &mut ChaCha20Rng, depth: usize) -> ExprRef {
    if depth == 0 || rng.random_bool(0.3) {
        let symbol = SYMBOLS[rng.random_range(0..SYMBOLS.len())];
        return factory.make_atom(symbol).unwrap();
    }
    let arity = rng.random_range(1..=4);
    let children: Vec<ExprRef> = (0..arity)
        .map(|_| random_expression(factory, rng, depth - 1))
        .collect();
    factory.make_operator(children).unwrap()
}

/// Left-nested chain `((((x y) y) y) y)` with `depth` operators.
pub fn deep_chain(factory: &ExpressionFactory, depth: usize) -> ExprRef {
    let mut current = factory.make_atom("x").unwrap();
    for _ in 0..depth {
        current = factory.make_operator([current, factory.make_atom("y").unwrap()]).unwrap();
    }
    current
}
