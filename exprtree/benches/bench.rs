use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use exprtree::{
    ExprRef, ExpressionFactory,
    walker::{TraversalOrder, traverse_expression_nodes},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const SYMBOLS: &[&str] = &["f", "g", "x", "y", "z", "0", "1", "+"];

fn random_expression(factory: &ExpressionFactory, rng: &mut ChaCha20Rng, depth: usize) -> ExprRef {
    if depth == 0 || rng.random_bool(0.25) {
        let symbol = SYMBOLS[rng.random_range(0..SYMBOLS.len())];
        return factory.make_atom(symbol).unwrap();
    }
    let arity = rng.random_range(1..=4);
    let children: Vec<ExprRef> = (0..arity).map(|_| random_expression(factory, rng, depth - 1)).collect();
    factory.make_operator(children).unwrap()
}

fn interning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("interning");

    group.bench_function("build_random", |b| {
        let factory = ExpressionFactory::new();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        b.iter(|| black_box(random_expression(&factory, &mut rng, 6)));
    });

    group.bench_function("rebuild_existing", |b| {
        let factory = ExpressionFactory::new();
        let keep = random_expression(&factory, &mut ChaCha20Rng::seed_from_u64(1), 8);
        b.iter(|| black_box(random_expression(&factory, &mut ChaCha20Rng::seed_from_u64(1), 8)));
        drop(keep);
    });

    group.bench_function("parse", |b| {
        let factory = ExpressionFactory::new();
        let text = random_expression(&factory, &mut ChaCha20Rng::seed_from_u64(2), 8).to_string();
        b.iter(|| black_box(factory.parse(&text).unwrap()));
    });

    group.finish();
}

fn traversal_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let factory = ExpressionFactory::new();
    let expr = random_expression(&factory, &mut ChaCha20Rng::seed_from_u64(3), 10);

    for order in [TraversalOrder::Prefix, TraversalOrder::Postfix, TraversalOrder::BreadthFirst] {
        group.bench_function(order.to_string(), |b| {
            b.iter(|| {
                let mut count = 0usize;
                traverse_expression_nodes(order, &expr, |_| count += 1);
                black_box(count)
            })
        });
    }

    group.finish();
}

fn rewrite_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    let factory = ExpressionFactory::new();
    let expr = random_expression(&factory, &mut ChaCha20Rng::seed_from_u64(4), 10);
    let replacement = factory.make_atom("replacement").unwrap();

    let mut leaves = Vec::new();
    exprtree::walker::traverse_expression(TraversalOrder::Prefix, &expr, |node, path| {
        if node.is_atom() {
            leaves.push(path.to_vec());
        }
    });

    group.bench_function("modify_one_leaf", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % leaves.len();
            black_box(
                factory
                    .modify_expression(&expr, [(leaves[i].as_slice(), replacement.clone())])
                    .unwrap(),
            )
        });
    });

    group.bench_function("reproduce", |b| {
        b.iter_batched(
            ExpressionFactory::new,
            |target| black_box(target.reproduce(&expr)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, interning_benchmark, traversal_benchmark, rewrite_benchmark);
criterion_main!(benches);
