//! Expression evaluation: collection literals, comprehensions, operators,
//! attribute access and calls.

use std::sync::Arc;

use ul4_ir::ast::{Comprehension, DictItem, KeywordArg, Node, NodeRef, Template};
use ul4_ir::{str_repr, BinaryOp};
use ul4_patterns::errors::{
    duplicate_argument, key_not_found, keywords_not_supported, no_attribute, splat_not_dict,
    wrong_arg_count,
};
use ul4_patterns::{CallKind, DictMap, EvalError, EvalResult, IteratorHandle, IteratorValue, Value};

use super::generator::Generator;
use super::Interpreter;
use crate::environment::Environment;
use crate::helpers::{int_arg, Args};
use crate::operators::{evaluate_binary, get_slice};
use crate::{functions, methods};

/// Dict keys are strings; anything else is converted with `str()`.
fn dict_key(key: Value) -> String {
    match key {
        Value::Str(s) => s.to_string(),
        other => other.to_str(),
    }
}

/// Merge a `**splat` operand into `target`.
fn splat_into(target: &mut DictMap, value: &Value) -> Result<(), EvalError> {
    let Value::Dict(map) = value else {
        return Err(splat_not_dict(value.type_name()));
    };
    for (key, item) in map.iter() {
        target.insert(key.clone(), item.clone());
    }
    Ok(())
}

/// `object.attr`: dict keys and template properties.
pub(super) fn get_attr(object: &Value, attr: &str) -> EvalResult {
    match object {
        Value::Dict(map) => map
            .get(attr)
            .cloned()
            .ok_or_else(|| key_not_found(&str_repr(attr))),
        Value::Template(template) => match attr {
            "name" => Ok(template.name.as_deref().map_or(Value::None, Value::string)),
            "source" => Ok(Value::string(&*template.source)),
            "startdelim" => Ok(Value::string(template.start_delim.as_str())),
            "enddelim" => Ok(Value::string(template.end_delim.as_str())),
            _ => Err(no_attribute(object.type_name(), attr)),
        },
        _ => Err(no_attribute(object.type_name(), attr)),
    }
}

fn is_render_method(name: &str) -> bool {
    matches!(name, "render" | "renders")
}

impl Interpreter {
    pub(super) fn eval_list(&mut self, items: &[NodeRef]) -> EvalResult {
        let values = items
            .iter()
            .map(|item| self.eval(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(values))
    }

    pub(super) fn eval_dict(&mut self, items: &[DictItem]) -> EvalResult {
        let mut map = DictMap::with_capacity(items.len());
        for item in items {
            match item {
                DictItem::Pair(key, value) => {
                    let key = dict_key(self.eval(key)?);
                    let value = self.eval(value)?;
                    map.insert(key, value);
                }
                DictItem::Splat(mapping) => {
                    let mapping = self.eval(mapping)?;
                    splat_into(&mut map, &mapping)?;
                }
            }
        }
        Ok(Value::dict(map))
    }

    /// Run `each` once per item of the comprehension that passes its
    /// condition. The loop variables live in a scope of their own.
    fn comprehension<F>(&mut self, comp: &Comprehension, mut each: F) -> Result<(), EvalError>
    where
        F: FnMut(&mut Self) -> Result<(), EvalError>,
    {
        let iter = self.eval(&comp.container)?.iter()?;
        self.env.push_scope();
        let result = self.comprehension_items(&iter, comp, &mut each);
        self.env.pop_scope();
        result
    }

    fn comprehension_items<F>(
        &mut self,
        iter: &IteratorHandle,
        comp: &Comprehension,
        each: &mut F,
    ) -> Result<(), EvalError>
    where
        F: FnMut(&mut Self) -> Result<(), EvalError>,
    {
        while let Some(item) = iter.next()? {
            self.assign(&comp.target, item)?;
            if let Some(condition) = &comp.condition {
                if !self.eval(condition)?.is_truthy() {
                    continue;
                }
            }
            each(self)?;
        }
        Ok(())
    }

    pub(super) fn eval_list_comp(&mut self, item: &Node, comp: &Comprehension) -> EvalResult {
        let mut values = Vec::new();
        self.comprehension(comp, |this| {
            values.push(this.eval(item)?);
            Ok(())
        })?;
        Ok(Value::list(values))
    }

    pub(super) fn eval_dict_comp(
        &mut self,
        key: &Node,
        value: &Node,
        comp: &Comprehension,
    ) -> EvalResult {
        let mut map = DictMap::new();
        self.comprehension(comp, |this| {
            let key = dict_key(this.eval(key)?);
            let value = this.eval(value)?;
            map.insert(key, value);
            Ok(())
        })?;
        Ok(Value::dict(map))
    }

    /// Generator expression: the container is evaluated now, items are
    /// produced on demand by a snapshot of this interpreter.
    pub(super) fn eval_gen_expr(&mut self, item: &NodeRef, comp: &Comprehension) -> EvalResult {
        let iter = self.eval(&comp.container)?.iter()?;
        let mut interpreter = self.clone();
        interpreter.output.clear();
        interpreter.env.push_scope();
        Ok(Value::iterator(IteratorValue::lazy(Generator::new(
            interpreter,
            iter,
            comp,
            Arc::clone(item),
        ))))
    }

    pub(super) fn eval_binary(&mut self, op: BinaryOp, left: &Node, right: &Node) -> EvalResult {
        let left = self.eval(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(left),
            BinaryOp::Or if left.is_truthy() => Ok(left),
            BinaryOp::And | BinaryOp::Or => self.eval(right),
            _ => {
                let right = self.eval(right)?;
                evaluate_binary(left, right, op)
            }
        }
    }

    pub(super) fn eval_slice(
        &mut self,
        object: &Node,
        start: Option<&Node>,
        stop: Option<&Node>,
    ) -> EvalResult {
        let object = self.eval(object)?;
        let start = self.slice_bound(start)?;
        let stop = self.slice_bound(stop)?;
        get_slice(&object, start, stop)
    }

    /// A missing bound and an explicit `None` are the same.
    fn slice_bound(&mut self, bound: Option<&Node>) -> Result<Option<i64>, EvalError> {
        let Some(bound) = bound else {
            return Ok(None);
        };
        match self.eval(bound)? {
            Value::None => Ok(None),
            value => int_arg("slice", &value).map(Some),
        }
    }

    fn eval_args(&mut self, args: &[NodeRef]) -> Result<Args, EvalError> {
        let mut values = Args::with_capacity(args.len());
        for arg in args {
            values.push(self.eval(arg)?);
        }
        Ok(values)
    }

    pub(super) fn call_function(&mut self, name: &str, args: &[NodeRef]) -> EvalResult {
        let args = self.eval_args(args)?;
        functions::call_function(name, &args, &self.env)
    }

    pub(super) fn call_method(&mut self, name: &str, object: &Node, args: &[NodeRef]) -> EvalResult {
        let receiver = self.eval(object)?;
        let args = self.eval_args(args)?;
        match &receiver {
            Value::Template(template) if is_render_method(name) => {
                if !args.is_empty() {
                    return Err(wrong_arg_count(CallKind::Method, name, 0, Some(0), args.len()));
                }
                self.render_template(template, name, DictMap::new())
            }
            _ => methods::call_method(&receiver, name, &args),
        }
    }

    /// Method call with keyword arguments; only `render` and `renders`
    /// accept them.
    pub(super) fn call_method_keywords(
        &mut self,
        name: &str,
        object: &Node,
        args: &[KeywordArg],
    ) -> EvalResult {
        let receiver = self.eval(object)?;
        if !is_render_method(name) {
            return Err(keywords_not_supported(name));
        }
        methods::check_call(&receiver, name, 0)?;
        let Value::Template(template) = &receiver else {
            return Err(keywords_not_supported(name));
        };

        let mut kwargs = DictMap::with_capacity(args.len());
        for arg in args {
            match arg {
                KeywordArg::Named(key, value) => {
                    let value = self.eval(value)?;
                    if kwargs.insert(key.clone(), value).is_some() {
                        return Err(duplicate_argument(name, key));
                    }
                }
                KeywordArg::Splat(mapping) => {
                    let mapping = self.eval(mapping)?;
                    let Value::Dict(map) = &mapping else {
                        return Err(splat_not_dict(mapping.type_name()));
                    };
                    for (key, value) in map.iter() {
                        if kwargs.insert(key.clone(), value.clone()).is_some() {
                            return Err(duplicate_argument(name, key));
                        }
                    }
                }
            }
        }
        self.render_template(template, name, kwargs)
    }

    /// `render` splices the callee's output into ours and returns `None`;
    /// `renders` returns it as a string.
    fn render_template(&mut self, template: &Template, name: &str, vars: DictMap) -> EvalResult {
        let mut child = self.child(Environment::from_vars(&vars))?;
        let output = child.render(template)?;
        if name == "render" {
            self.output.extend(output);
            Ok(Value::None)
        } else {
            Ok(Value::string(output.concat()))
        }
    }
}
