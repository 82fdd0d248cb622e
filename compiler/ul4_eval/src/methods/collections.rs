//! Methods on `list` and `dict`.

use ul4_patterns::errors::unknown_method;
use ul4_patterns::{DictMap, EvalResult, Value};

use super::strings::bounds;
use crate::helpers::len_to_int;
use crate::operators::slice_range;

/// `find`/`rfind` on lists: index of the first (last) equal item.
pub(super) fn call_list(items: &[Value], name: &str, args: &[Value]) -> EvalResult {
    let (start, end) = bounds(name, args)?;
    let range = slice_range(items.len(), start, end);
    let window = &items[range.clone()];
    let found = match name {
        "find" => window.iter().position(|item| *item == args[0]),
        "rfind" => window.iter().rposition(|item| *item == args[0]),
        _ => return Err(unknown_method("list", name)),
    };
    Ok(Value::Int(found.map_or(-1, |index| len_to_int(range.start + index))))
}

pub(super) fn call_dict(map: &DictMap, name: &str, args: &[Value]) -> EvalResult {
    match name {
        "get" => {
            let found = args[0].as_str().and_then(|key| map.get(key));
            Ok(found
                .or_else(|| args.get(1))
                .cloned()
                .unwrap_or(Value::None))
        }
        "items" => Ok(Value::list(
            map.iter()
                .map(|(key, value)| Value::list(vec![Value::string(key.as_str()), value.clone()]))
                .collect(),
        )),
        "values" => Ok(Value::list(map.values().cloned().collect())),
        _ => Err(unknown_method("dict", name)),
    }
}
