use snafu::ResultExt;

use crate::core::model::Model;

use crate::catalog::{Arity, Label};
use crate::encoding::Vars;
use crate::error::{MalformedModelSnafu, Result};
use crate::formula::Formula;

/// Extract the syntax tree selected by a model, starting at the root node.
///
/// Fails with `MalformedModel` when a node carries zero or several true
/// indicators, which the structural constraints rule out.
pub fn reconstruct(vars: &Vars, model: &Model) -> Result<Formula> {
    node(vars, model, vars.depth() - 1)
}

fn node(vars: &Vars, model: &Model, i: usize) -> Result<Formula> {
    let label = vars.label(i).decode(model).context(MalformedModelSnafu { node: i })?;
    match label.arity() {
        Arity::Zeroary => Ok(match label {
            Label::Prop(p) => Formula::Atom(p),
            _ => Formula::False,
        }),
        Arity::Unary => {
            let child = vars.left(i).decode(model).context(MalformedModelSnafu { node: i })?;
            Ok(Formula::unary(label, node(vars, model, child)?))
        }
        Arity::Binary => {
            let left = vars.left(i).decode(model).context(MalformedModelSnafu { node: i })?;
            let right = vars.right(i).decode(model).context(MalformedModelSnafu { node: i })?;
            Ok(Formula::binary(label, node(vars, model, left)?, node(vars, model, right)?))
        }
    }
}
