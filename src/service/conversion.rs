//! # Property Value Conversion
//!
//! Converts typed application property values between representations when a
//! higher layer maps them onto message headers and back.
//!
//! Converters live in a table keyed by `(source kind, target kind)`. The table
//! is built on first use and never modified, so lookups need no locking.
//!
//! | from                     | to          | rule                          |
//! |--------------------------|-------------|-------------------------------|
//! | any primitive            | String      | display form, floats keep `.0`|
//! | String                   | primitives  | parse; `None` on failure      |
//! | Byte, Short, Int, Date   | Long        | widen; dates as epoch millis  |
//! | Byte, Short              | Int         | widen                         |
//! | Byte                     | Short       | widen                         |
//! | Float                    | Double      | widen                         |
//! | String                   | Destination | queue named by the string     |
//!
//! Converting to the value's own kind returns it unchanged. Any other pair has
//! no converter and yields `None`.

use crate::config::{ConversionConfig, DEFAULT_QUEUE_PREFIX};
use crate::utils::metrics::global_metrics;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

/// A message destination produced from a property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    name: String,
    address: String,
}

impl Destination {
    /// Queue called `name`, addressed as `prefix` + `name`.
    pub fn queue(prefix: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            address: format!("{prefix}{name}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified address used on the wire.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Date(SystemTime),
    Destination(Destination),
}

/// Discriminant of [`Value`], used as the conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Date,
    Destination,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Date(_) => ValueKind::Date,
            Value::Destination(_) => ValueKind::Destination,
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_value!(
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    SystemTime => Date,
    Destination => Destination,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// State a converter may need beyond the value itself.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    queue_prefix: String,
}

impl ConversionContext {
    pub fn new(queue_prefix: impl Into<String>) -> Self {
        Self {
            queue_prefix: queue_prefix.into(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.queue_prefix.clone())
    }

    pub fn queue_prefix(&self) -> &str {
        &self.queue_prefix
    }

    pub fn queue(&self, name: &str) -> Destination {
        Destination::queue(&self.queue_prefix, name)
    }
}

impl Default for ConversionContext {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_PREFIX)
    }
}

/// The conversion service offered to layers that attach typed properties.
pub trait ConversionService: Send + Sync {
    /// Convert `value` to `target`, or `None` when no conversion exists.
    fn convert(&self, ctx: &ConversionContext, value: &Value, target: ValueKind) -> Option<Value>;
}

/// Table-driven [`ConversionService`] with the rules listed in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConversions;

impl ConversionService for StandardConversions {
    fn convert(&self, ctx: &ConversionContext, value: &Value, target: ValueKind) -> Option<Value> {
        convert(ctx, value, target)
    }
}

type Converter = fn(&ConversionContext, &Value) -> Option<Value>;

fn to_string(_: &ConversionContext, value: &Value) -> Option<Value> {
    let text = match value {
        Value::Bool(v) => v.to_string(),
        Value::Byte(v) => v.to_string(),
        Value::Short(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => v.to_string(),
        Value::Float(v) => float_text(*v),
        Value::Double(v) => float_text(*v),
        _ => return None,
    };
    Some(Value::String(text))
}

/// Floats always show a fractional part (`1.0`, not `1`).
fn float_text<F>(v: F) -> String
where
    F: Copy + fmt::Debug + Into<f64>,
{
    let wide: f64 = v.into();
    if wide.is_nan() {
        String::from("NaN")
    } else if wide.is_infinite() {
        String::from(if wide > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        // Debug keeps the trailing `.0` that Display drops
        format!("{v:?}")
    }
}

fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn string_to_bool(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value).map(|s| Value::Bool(s.eq_ignore_ascii_case("true")))
}

fn string_to_byte(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Byte)
}

fn string_to_short(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Short)
}

fn string_to_int(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Int)
}

fn string_to_long(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Long)
}

fn string_to_float(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Float)
}

fn string_to_double(_: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value)?.parse().ok().map(Value::Double)
}

fn string_to_destination(ctx: &ConversionContext, value: &Value) -> Option<Value> {
    as_str(value).map(|s| Value::Destination(ctx.queue(s)))
}

fn to_long(_: &ConversionContext, value: &Value) -> Option<Value> {
    let v = match value {
        Value::Byte(v) => i64::from(*v),
        Value::Short(v) => i64::from(*v),
        Value::Int(v) => i64::from(*v),
        Value::Date(d) => epoch_millis(*d),
        _ => return None,
    };
    Some(Value::Long(v))
}

fn to_int(_: &ConversionContext, value: &Value) -> Option<Value> {
    match value {
        Value::Byte(v) => Some(Value::Int(i32::from(*v))),
        Value::Short(v) => Some(Value::Int(i32::from(*v))),
        _ => None,
    }
}

fn byte_to_short(_: &ConversionContext, value: &Value) -> Option<Value> {
    match value {
        Value::Byte(v) => Some(Value::Short(i16::from(*v))),
        _ => None,
    }
}

fn float_to_double(_: &ConversionContext, value: &Value) -> Option<Value> {
    match value {
        Value::Float(v) => Some(Value::Double(f64::from(*v))),
        _ => None,
    }
}

/// Milliseconds since the Unix epoch; negative for earlier instants.
fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_millis() as i64,
        Err(before) => -(before.duration().as_millis() as i64),
    }
}

static CONVERSIONS: Lazy<HashMap<(ValueKind, ValueKind), Converter>> = Lazy::new(|| {
    use ValueKind as K;

    let mut table: HashMap<(ValueKind, ValueKind), Converter> = HashMap::new();

    for from in [K::Bool, K::Byte, K::Short, K::Int, K::Long, K::Float, K::Double] {
        table.insert((from, K::String), to_string);
    }

    table.insert((K::String, K::Bool), string_to_bool);
    table.insert((K::String, K::Byte), string_to_byte);
    table.insert((K::String, K::Short), string_to_short);
    table.insert((K::String, K::Int), string_to_int);
    table.insert((K::String, K::Long), string_to_long);
    table.insert((K::String, K::Float), string_to_float);
    table.insert((K::String, K::Double), string_to_double);
    table.insert((K::String, K::Destination), string_to_destination);

    for from in [K::Byte, K::Short, K::Int, K::Date] {
        table.insert((from, K::Long), to_long);
    }
    table.insert((K::Byte, K::Int), to_int);
    table.insert((K::Short, K::Int), to_int);
    table.insert((K::Byte, K::Short), byte_to_short);
    table.insert((K::Float, K::Double), float_to_double);

    table
});

/// Convert `value` to `target` using the standard table.
pub fn convert(ctx: &ConversionContext, value: &Value, target: ValueKind) -> Option<Value> {
    let from = value.kind();
    if from == target {
        return Some(value.clone());
    }

    let converted = CONVERSIONS
        .get(&(from, target))
        .and_then(|converter| converter(ctx, value));

    global_metrics().conversion(converted.is_some());
    trace!(?from, ?target, converted = converted.is_some(), "Property conversion");
    converted
}
