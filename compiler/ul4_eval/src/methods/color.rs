//! Methods on `color`.

use ul4_ir::Color;
use ul4_patterns::errors::unknown_method;
use ul4_patterns::{EvalResult, Value};

use crate::helpers::{float_arg, int_arg};

fn floats(values: &[f64]) -> Value {
    Value::list(values.iter().copied().map(Value::Float).collect())
}

pub(super) fn call(color: Color, name: &str, args: &[Value]) -> EvalResult {
    let value = match name {
        "r" => Value::Int(i64::from(color.r)),
        "g" => Value::Int(i64::from(color.g)),
        "b" => Value::Int(i64::from(color.b)),
        "a" => Value::Int(i64::from(color.a)),
        "lum" => Value::Float(color.lum()),
        "hls" => floats(&color.hls()),
        "hlsa" => {
            let [h, l, s] = color.hls();
            floats(&[h, l, s, color.alpha_unit()])
        }
        "hsv" => floats(&color.hsv()),
        "hsva" => {
            let [h, s, v] = color.hsv();
            floats(&[h, s, v, color.alpha_unit()])
        }
        "witha" => {
            let alpha = int_arg(name, &args[0])?.clamp(0, 255);
            Value::Color(color.with_alpha(u8::try_from(alpha).unwrap_or(u8::MAX)))
        }
        "withlum" => Value::Color(color.with_lum(float_arg(name, &args[0])?)),
        _ => return Err(unknown_method("color", name)),
    };
    Ok(value)
}
