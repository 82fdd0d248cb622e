//! Builtin functions.
//!
//! Every function is declared once in [`BUILTIN_FUNCTIONS`] with its arity;
//! the arity is checked before dispatch, so the implementations can index
//! their required arguments directly.
//!
//! # Module Structure
//!
//! - [`conversions`]: `bool`, `str`, `repr`, `type`, `int`, `float`, `list`
//! - [`sequences`]: `len`, `min`/`max`, `sorted`, `range` and the iterator producers
//! - [`text`]: escaping, `chr`/`ord`, radix conversions, URL quoting
//! - [`serialize`]: `asjson`/`fromjson`, `asul4on`/`fromul4on`
//! - [`values`]: `abs` and the calendar and color constructors
//! - [`random`]: `random`, `randrange`, `randchoice`

mod conversions;
mod random;
mod sequences;
mod serialize;
mod text;
mod values;

pub(crate) use text::xmlescape;

use ul4_patterns::errors::unknown_function;
use ul4_patterns::{CallKind, EvalResult, Value};

use crate::environment::Environment;
use crate::format::format_value;
use crate::helpers::{optional, str_arg, Arity};

/// Name and accepted argument count of a builtin function.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FunctionSpec {
    pub name: &'static str,
    pub arity: Arity,
}

const fn function(name: &'static str, arity: Arity) -> FunctionSpec {
    FunctionSpec { name, arity }
}

/// All builtin functions, grouped as in the language reference.
pub(crate) const BUILTIN_FUNCTIONS: &[FunctionSpec] = &[
    // Predicates
    function("isnone", Arity::exact(1)),
    function("isbool", Arity::exact(1)),
    function("isint", Arity::exact(1)),
    function("isfloat", Arity::exact(1)),
    function("isstr", Arity::exact(1)),
    function("isdate", Arity::exact(1)),
    function("iscolor", Arity::exact(1)),
    function("istimedelta", Arity::exact(1)),
    function("ismonthdelta", Arity::exact(1)),
    function("istemplate", Arity::exact(1)),
    function("islist", Arity::exact(1)),
    function("isdict", Arity::exact(1)),
    // Conversions
    function("bool", Arity::range(0, 1)),
    function("str", Arity::range(0, 1)),
    function("repr", Arity::exact(1)),
    function("type", Arity::exact(1)),
    function("int", Arity::range(0, 2)),
    function("float", Arity::range(0, 1)),
    function("list", Arity::range(0, 1)),
    // Sequences
    function("any", Arity::exact(1)),
    function("all", Arity::exact(1)),
    function("len", Arity::exact(1)),
    function("min", Arity::at_least(1)),
    function("max", Arity::at_least(1)),
    function("sorted", Arity::exact(1)),
    function("range", Arity::range(1, 3)),
    function("reversed", Arity::exact(1)),
    function("enumerate", Arity::range(1, 2)),
    function("isfirst", Arity::exact(1)),
    function("islast", Arity::exact(1)),
    function("isfirstlast", Arity::exact(1)),
    function("enumfl", Arity::range(1, 2)),
    function("zip", Arity::at_least(0)),
    // Text
    function("format", Arity::range(2, 3)),
    function("xmlescape", Arity::exact(1)),
    function("csv", Arity::exact(1)),
    function("chr", Arity::exact(1)),
    function("ord", Arity::exact(1)),
    function("hex", Arity::exact(1)),
    function("oct", Arity::exact(1)),
    function("bin", Arity::exact(1)),
    function("urlquote", Arity::exact(1)),
    function("urlunquote", Arity::exact(1)),
    // Serialization
    function("asjson", Arity::exact(1)),
    function("fromjson", Arity::exact(1)),
    function("asul4on", Arity::exact(1)),
    function("fromul4on", Arity::exact(1)),
    // Random
    function("random", Arity::exact(0)),
    function("randrange", Arity::range(1, 3)),
    function("randchoice", Arity::exact(1)),
    // Numbers, dates, colors
    function("abs", Arity::exact(1)),
    function("now", Arity::exact(0)),
    function("utcnow", Arity::exact(0)),
    function("date", Arity::range(3, 7)),
    function("timedelta", Arity::range(0, 3)),
    function("monthdelta", Arity::range(0, 1)),
    function("rgb", Arity::range(3, 4)),
    function("hls", Arity::range(3, 4)),
    function("hsv", Arity::range(3, 4)),
    // Scope
    function("get", Arity::range(1, 2)),
    function("vars", Arity::exact(0)),
];

pub(crate) fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    BUILTIN_FUNCTIONS.iter().find(|spec| spec.name == name)
}

/// Call the builtin `name`.
///
/// `env` is only read by `get` and `vars`.
pub(crate) fn call_function(name: &str, args: &[Value], env: &Environment) -> EvalResult {
    let spec = lookup(name).ok_or_else(|| unknown_function(name))?;
    spec.arity.check(CallKind::Function, name, args.len())?;
    tracing::trace!(function = name, args = args.len(), "builtin call");

    match name {
        // Predicates
        "isnone" => Ok(Value::Bool(matches!(args[0], Value::None))),
        "isbool" => Ok(Value::Bool(matches!(args[0], Value::Bool(_)))),
        "isint" => Ok(Value::Bool(matches!(args[0], Value::Int(_)))),
        "isfloat" => Ok(Value::Bool(matches!(args[0], Value::Float(_)))),
        "isstr" => Ok(Value::Bool(matches!(args[0], Value::Str(_)))),
        "isdate" => Ok(Value::Bool(matches!(args[0], Value::Date(_)))),
        "iscolor" => Ok(Value::Bool(matches!(args[0], Value::Color(_)))),
        "istimedelta" => Ok(Value::Bool(matches!(args[0], Value::TimeDelta(_)))),
        "ismonthdelta" => Ok(Value::Bool(matches!(args[0], Value::MonthDelta(_)))),
        "istemplate" => Ok(Value::Bool(matches!(args[0], Value::Template(_)))),
        "islist" => Ok(Value::Bool(matches!(args[0], Value::List(_)))),
        "isdict" => Ok(Value::Bool(matches!(args[0], Value::Dict(_)))),

        // Conversions
        "bool" => Ok(Value::Bool(args.first().is_some_and(Value::is_truthy))),
        "str" => Ok(Value::string(args.first().map(Value::to_str).unwrap_or_default())),
        "repr" => Ok(Value::string(args[0].repr())),
        "type" => Ok(Value::string(args[0].type_name())),
        "int" => conversions::int(args),
        "float" => conversions::float(args),
        "list" => conversions::list(args),

        // Sequences
        "any" => sequences::any(&args[0]),
        "all" => sequences::all(&args[0]),
        "len" => sequences::len(&args[0]),
        "min" => sequences::extreme(name, args, std::cmp::Ordering::Less),
        "max" => sequences::extreme(name, args, std::cmp::Ordering::Greater),
        "sorted" => sequences::sorted(&args[0]),
        "range" => sequences::range(args),
        "reversed" => sequences::reversed(&args[0]),
        "enumerate" => sequences::enumerate(args),
        "isfirst" => sequences::flagged(&args[0], sequences::FIRST),
        "islast" => sequences::flagged(&args[0], sequences::LAST),
        "isfirstlast" => sequences::flagged(&args[0], sequences::FIRST_LAST),
        "enumfl" => sequences::enumfl(args),
        "zip" => sequences::zip(args),

        // Text
        "format" => {
            let format = str_arg(name, &args[1])?;
            let lang = match optional(args, 2) {
                Some(lang) => Some(str_arg(name, lang)?),
                None => None,
            };
            format_value(&args[0], format, lang).map(Value::string)
        }
        "xmlescape" => Ok(Value::string(xmlescape(&args[0].to_str()))),
        "csv" => Ok(Value::string(text::csv(&args[0]))),
        "chr" => text::chr(&args[0]),
        "ord" => text::ord(&args[0]),
        "hex" => text::radix(name, &args[0], "0x"),
        "oct" => text::radix(name, &args[0], "0o"),
        "bin" => text::radix(name, &args[0], "0b"),
        "urlquote" => text::urlquote(&args[0]),
        "urlunquote" => text::urlunquote(&args[0]),

        // Serialization
        "asjson" => serialize::asjson(&args[0]).map(Value::string),
        "fromjson" => serialize::fromjson(&args[0]),
        "asul4on" => serialize::asul4on(&args[0]),
        "fromul4on" => serialize::fromul4on(&args[0]),

        // Random
        "random" => Ok(random::random()),
        "randrange" => random::randrange(args),
        "randchoice" => random::randchoice(&args[0]),

        // Numbers, dates, colors
        "abs" => values::abs(&args[0]),
        "now" | "utcnow" => Ok(Value::Date(ul4_ir::Date::now())),
        "date" => values::date(args),
        "timedelta" => values::timedelta(args),
        "monthdelta" => values::monthdelta(args),
        "rgb" => values::rgb(args),
        "hls" => values::hls(args),
        "hsv" => values::hsv(args),

        // Scope
        "get" => {
            let var = str_arg(name, &args[0])?;
            Ok(env
                .lookup(var)
                .cloned()
                .or_else(|| args.get(1).cloned())
                .unwrap_or(Value::None))
        }
        "vars" => Ok(Value::dict(env.snapshot())),

        _ => Err(unknown_function(name)),
    }
}
