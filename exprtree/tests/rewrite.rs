mod common;

use exprtree::{
    ExprError, ExprRef, ExpressionFactory, follow_path,
    rewrite::{Semantics, evaluate, reproduce},
};

/// Integer arithmetic over `+` and `*`.
struct Arithmetic;

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Op(char),
}

impl Semantics for Arithmetic {
    type Value = Value;
    type Error = String;

    fn evaluate_non_operator_terminal(&mut self, symbol: &str) -> Result<Value, String> {
        symbol.parse().map(Value::Int).map_err(|_| format!("not a number: {symbol}"))
    }

    fn evaluate_operator_terminal(&mut self, symbol: &str) -> Result<Value, String> {
        match symbol {
            "+" => Ok(Value::Op('+')),
            "*" => Ok(Value::Op('*')),
            _ => Err(format!("unknown operator: {symbol}")),
        }
    }

    fn evaluate_operator(&mut self, operator: Value, operands: Vec<Value>) -> Result<Value, String> {
        let ints = operands
            .into_iter()
            .map(|v| match v {
                Value::Int(i) => Ok(i),
                Value::Op(c) => Err(format!("operator {c} used as operand")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        match operator {
            Value::Op('+') => Ok(Value::Int(ints.iter().sum())),
            Value::Op('*') => Ok(Value::Int(ints.iter().product())),
            other => Err(format!("cannot apply {other:?}")),
        }
    }
}

/// Records the order in which the engine calls back.
#[derive(Default)]
struct Trace {
    calls: Vec<String>,
}

impl Semantics for Trace {
    type Value = String;
    type Error = ();

    fn evaluate_non_operator_terminal(&mut self, symbol: &str) -> Result<String, ()> {
        self.calls.push(format!("term {symbol}"));
        Ok(symbol.to_string())
    }

    fn evaluate_operator_terminal(&mut self, symbol: &str) -> Result<String, ()> {
        self.calls.push(format!("head {symbol}"));
        Ok(symbol.to_string())
    }

    fn evaluate_operator(&mut self, operator: String, operands: Vec<String>) -> Result<String, ()> {
        let text = format!("{operator}[{}]", operands.join(","));
        self.calls.push(format!("apply {text}"));
        Ok(text)
    }
}

#[test]
fn evaluates_integer_sums() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(+ 1 2)").unwrap();
    assert_eq!(evaluate(&e, &mut Arithmetic), Ok(Value::Int(3)));

    let nested = factory.parse("(+ 1 (* 2 3) (+ 4))").unwrap();
    assert_eq!(evaluate(&nested, &mut Arithmetic), Ok(Value::Int(11)));

    let lone = factory.parse("42").unwrap();
    assert_eq!(evaluate(&lone, &mut Arithmetic), Ok(Value::Int(42)));
}

#[test]
fn evaluation_is_bottom_up_left_to_right() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(f a (g b) c)").unwrap();
    let mut trace = Trace::default();
    assert_eq!(evaluate(&e, &mut trace), Ok("f[a,g[b],c]".to_string()));
    assert_eq!(
        trace.calls,
        [
            "head f",
            "term a",
            "head g",
            "term b",
            "apply g[b]",
            "term c",
            "apply f[a,g[b],c]"
        ]
    );
}

#[test]
fn operator_position_operators_are_evaluated_first() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("((f x) y)").unwrap();
    let mut trace = Trace::default();
    assert_eq!(evaluate(&e, &mut trace), Ok("f[x][y]".to_string()));
    assert_eq!(trace.calls, ["head f", "term x", "apply f[x]", "term y", "apply f[x][y]"]);
}

#[test]
fn semantic_errors_abort_evaluation() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(+ 1 (- 2 1) oops)").unwrap();
    assert_eq!(evaluate(&e, &mut Arithmetic), Err("unknown operator: -".to_string()));

    let e = factory.parse("(+ 1 two)").unwrap();
    assert_eq!(evaluate(&e, &mut Arithmetic), Err("not a number: two".to_string()));
}

#[test]
fn reproduction_copies_into_another_factory() {
    let source = ExpressionFactory::new();
    let target = ExpressionFactory::new();
    let mut rng = common::rng(11);

    for _ in 0..50 {
        let e = common::random_expression(&source, &mut rng, 5);
        let copy = reproduce(&e, &target);
        assert!(target.owns(&copy));
        assert!(copy.structurally_eq(&e));
        assert_eq!(copy.to_string(), e.to_string());
        // Reproducing again yields the already canonical copy.
        assert_eq!(target.reproduce(&e), copy);
    }
}

#[test]
fn reproduction_into_the_owning_factory_is_identity() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(a (b c))").unwrap();
    assert_eq!(reproduce(&e, &factory), e);
}

#[test]
fn reproduction_reuses_equal_target_nodes() {
    let source = ExpressionFactory::new();
    let target = ExpressionFactory::new();
    let e = source.parse("(p (q r) s)").unwrap();
    let existing = target.parse("(q r)").unwrap();
    let copy = reproduce(&e, &target);
    assert_eq!(copy.children()[1], existing);
}

#[test]
fn modification_replaces_at_paths() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(a (b c) d)").unwrap();
    let x = factory.make_atom("x").unwrap();

    let modified = factory.modify_expression(&e, [([1usize, 0], x.clone())]).unwrap();
    assert_eq!(modified.to_string(), "(a (x c) d)");
    assert_eq!(modified, factory.parse("(a (x c) d)").unwrap());

    // Untouched positions are the original nodes.
    assert_eq!(modified.children()[0], e.children()[0]);
    assert_eq!(modified.children()[2], e.children()[2]);
    assert_eq!(modified.children()[1].children()[1], e.children()[1].children()[1]);

    let two = factory
        .modify_expression(&e, vec![(vec![0usize], x.clone()), (vec![2], factory.parse("(y z)").unwrap())])
        .unwrap();
    assert_eq!(two.to_string(), "(x (b c) (y z))");
    assert_eq!(two.children()[1], e.children()[1]);
}

#[test]
fn modification_edge_cases() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(a (b c) d)").unwrap();
    let x = factory.make_atom("x").unwrap();

    let none: Vec<(Vec<usize>, ExprRef)> = Vec::new();
    assert_eq!(factory.modify_expression(&e, none).unwrap(), e);

    let root = [(Vec::<usize>::new(), x.clone())];
    assert_eq!(factory.modify_expression(&e, root).unwrap(), x);

    // The outer replacement subsumes nested ones.
    let nested = factory
        .modify_expression(&e, [(vec![1usize], x.clone()), (vec![1, 1], factory.make_atom("q").unwrap())])
        .unwrap();
    assert_eq!(nested.to_string(), "(a x d)");

    // Replacing a node by an equal one rebuilds into the same canonical node.
    let same = factory.modify_expression(&e, [([1usize, 0], factory.make_atom("b").unwrap())]).unwrap();
    assert_eq!(same, e);
}

#[test]
fn modification_rejects_invalid_paths() {
    let factory = ExpressionFactory::new();
    let e = factory.parse("(a (b c) d)").unwrap();
    let x = factory.make_atom("x").unwrap();
    let before = factory.len();

    for bad in [vec![3usize], vec![0, 0], vec![1, 2], vec![1, 0, 0]] {
        let result = factory.modify_expression(&e, [(bad.clone(), x.clone()), (vec![2], x.clone())]);
        match result {
            Err(ExprError::InvalidPath { path }) => assert_eq!(path.as_slice(), bad.as_slice()),
            other => panic!("expected an invalid path error, got {other:?}"),
        }
    }
    assert_eq!(factory.len(), before);
}

#[test]
fn modification_of_deep_trees_rebuilds_only_the_spine() {
    let factory = ExpressionFactory::new();
    let deep = common::deep_chain(&factory, 500);
    let path = vec![0usize; 499];
    let target = follow_path(&deep, &path).unwrap().clone();
    assert_eq!(target.to_string(), "(x y)");

    let z = factory.make_atom("z").unwrap();
    let modified = factory.modify_expression(&deep, [(path.clone(), z)]).unwrap();
    assert_eq!(follow_path(&modified, &path).unwrap().to_string(), "z");
    assert_eq!(modified.children()[1], deep.children()[1]);
}
