//! Statement execution: loops, conditionals, `render` and assignment.

use ul4_ir::ast::{Block, Node, NodeKind, VarTarget};
use ul4_patterns::errors::unpack_mismatch;
use ul4_patterns::{ControlFlow, EvalError, Value};

use super::Interpreter;

impl Interpreter {
    /// `for target in container`.
    ///
    /// The loop variables are bound in the current scope and stay visible
    /// after the loop.
    pub(super) fn exec_for(
        &mut self,
        target: &VarTarget,
        container: &Node,
        block: &Block,
    ) -> Result<(), EvalError> {
        let iter = self.eval(container)?.iter()?;
        while let Some(item) = iter.next()? {
            tracing::trace!("loop iteration");
            self.assign(target, item)?;
            if let Err(err) = self.exec_block(block) {
                match err.control_flow {
                    Some(ControlFlow::Break) => break,
                    Some(ControlFlow::Continue) => {}
                    None => return Err(err),
                }
            }
        }
        Ok(())
    }

    /// Run the first `if`/`elif` branch whose condition holds, else the
    /// `else` branch if there is one.
    pub(super) fn exec_conditional(&mut self, chain: &Block) -> Result<(), EvalError> {
        for branch in &chain.content {
            match &branch.kind {
                NodeKind::If { condition, block } | NodeKind::ElIf { condition, block } => {
                    let taken = self
                        .eval(condition)
                        .map_err(|err| err.with_location(&branch.location))?
                        .is_truthy();
                    if taken {
                        return self.exec_block(block);
                    }
                }
                NodeKind::Else(block) => return self.exec_block(block),
                _ => self.exec(branch)?,
            }
        }
        Ok(())
    }

    /// `<?render ...?>`: a template `render` call writes into this output
    /// directly, anything else is printed.
    pub(super) fn exec_render(&mut self, operand: &Node) -> Result<(), EvalError> {
        let splices = matches!(
            &operand.kind,
            NodeKind::CallMeth { name, .. } | NodeKind::CallMethKeywords { name, .. } if name == "render"
        );
        let value = self.eval(operand)?;
        if !splices {
            self.output.push(value.to_str());
        }
        Ok(())
    }

    /// Bind `value` to `target`, unpacking nested tuples.
    pub(crate) fn assign(&mut self, target: &VarTarget, value: Value) -> Result<(), EvalError> {
        match target {
            VarTarget::Name(name) => {
                self.env.bind(name, value);
                Ok(())
            }
            VarTarget::Tuple(targets) => {
                let iter = value.iter()?;
                let mut items = Vec::with_capacity(targets.len());
                while let Some(item) = iter.next()? {
                    if items.len() == targets.len() {
                        return Err(unpack_mismatch(targets.len(), targets.len(), true));
                    }
                    items.push(item);
                }
                if items.len() < targets.len() {
                    return Err(unpack_mismatch(targets.len(), items.len(), false));
                }
                for (target, item) in targets.iter().zip(items) {
                    self.assign(target, item)?;
                }
                Ok(())
            }
        }
    }
}
