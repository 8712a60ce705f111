use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use iht::{FactoryConfig, FactoryId, IhtFactory};
use log::trace;

use crate::{
    error::{ExprError, ExprResult},
    expr::{Atom, ExprRef, Expression, OperandContainer, Operator},
};

/// Interning factory for expressions.
///
/// Every node is created through a factory, and within one factory structurally equal
/// expressions are the same node. The factory is cheap to clone (clones share the registry)
/// and safe to use from many threads at once.
#[derive(Clone, Debug, Default)]
pub struct ExpressionFactory {
    nodes: IhtFactory<Expression>,
    fresh_counter: Arc<AtomicU64>,
}

impl ExpressionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FactoryConfig) -> Self {
        Self {
            nodes: IhtFactory::with_config(config),
            fresh_counter: Arc::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> FactoryId {
        self.nodes.id()
    }

    /// Underlying node registry.
    #[inline]
    pub fn nodes(&self) -> &IhtFactory<Expression> {
        &self.nodes
    }

    #[inline]
    pub(crate) fn intern(&self, expression: Expression) -> ExprRef {
        self.nodes.intern_or_create(expression)
    }

    /// Canonical atom for `symbol`.
    pub fn make_atom(&self, symbol: impl Into<String>) -> ExprResult<ExprRef> {
        Ok(self.intern(Expression::Atom(Atom::new(symbol)?)))
    }

    /// Canonical operator over `children`, which must not be empty.
    ///
    /// The first child sits in operator position.
    pub fn make_operator<I>(&self, children: I) -> ExprResult<ExprRef>
    where
        I: IntoIterator<Item = ExprRef>,
    {
        let children: OperandContainer = children.into_iter().collect();
        Ok(self.intern(Expression::Operator(Operator::new(children)?)))
    }

    /// Like [`make_operator`](Self::make_operator), except that a single operand is returned
    /// as is instead of being wrapped in a one-child operator.
    pub fn make_expression<I>(&self, operands: I) -> ExprResult<ExprRef>
    where
        I: IntoIterator<Item = ExprRef>,
    {
        let mut operands: OperandContainer = operands.into_iter().collect();
        match operands.len() {
            0 => Err(ExprError::ConstructionPrecondition(
                "cannot build an expression out of nothing".to_string(),
            )),
            1 => Ok(operands.remove(0)),
            _ => Ok(self.intern(Expression::Operator(Operator::from_validated(operands)))),
        }
    }

    /// Operator whose children are all atoms, e.g. `["f", "x", "y"]` gives `(f x y)`.
    pub fn make_operator_from_symbols<I, S>(&self, symbols: I) -> ExprResult<ExprRef>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children = symbols
            .into_iter()
            .map(|symbol| self.make_atom(symbol))
            .collect::<ExprResult<OperandContainer>>()?;
        self.make_operator(children)
    }

    /// Create the atom only if no live atom with this symbol exists.
    pub fn try_create_new_atom(&self, symbol: impl Into<String>) -> ExprResult<Option<ExprRef>> {
        Ok(self.nodes.try_create_new(Expression::Atom(Atom::new(symbol)?)))
    }

    /// Create the operator only if no structurally equal live operator exists.
    pub fn try_create_new_operator<I>(&self, children: I) -> ExprResult<Option<ExprRef>>
    where
        I: IntoIterator<Item = ExprRef>,
    {
        let children: OperandContainer = children.into_iter().collect();
        Ok(self.nodes.try_create_new(Expression::Operator(Operator::new(children)?)))
    }

    /// Atom named `prefix` followed by a number, guaranteed not to be alive in this factory
    /// when it is returned.
    pub fn fresh_atom(&self, prefix: &str) -> ExprResult<ExprRef> {
        loop {
            let n = self.fresh_counter.fetch_add(1, Ordering::Relaxed);
            if let Some(atom) = self.try_create_new_atom(format!("{prefix}{n}"))? {
                return Ok(atom);
            }
            trace!("{}: fresh candidate {prefix}{n} already alive", self.id());
        }
    }

    /// Live node of this factory structurally equal to `expression`, if any.
    #[inline]
    pub fn find_equivalent(&self, expression: &Expression) -> Option<ExprRef> {
        self.nodes.find_equivalent(expression)
    }

    #[inline]
    pub fn has_equivalent_node(&self, expression: &Expression) -> bool {
        self.nodes.has_equivalent_node(expression)
    }

    /// Whether this exact node is registered in this factory.
    #[inline]
    pub fn has_node(&self, expression: &ExprRef) -> bool {
        self.nodes.has_node(expression)
    }

    #[inline]
    pub fn owns(&self, expression: &ExprRef) -> bool {
        self.nodes.owns(expression)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
