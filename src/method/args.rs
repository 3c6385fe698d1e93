//! Argument accessors for executor closures

use super::error::MethodFailure;
use serde_json::Value;

fn arg<'a>(args: &'a [Value], idx: usize) -> Result<&'a Value, MethodFailure> {
    args.get(idx)
        .ok_or_else(|| MethodFailure(format!("missing argument #{}", idx + 1)))
}

pub fn arg_str(args: &[Value], idx: usize) -> Result<&str, MethodFailure> {
    arg(args, idx)?
        .as_str()
        .ok_or_else(|| MethodFailure(format!("argument #{} is not a string", idx + 1)))
}

pub fn arg_f64(args: &[Value], idx: usize) -> Result<f64, MethodFailure> {
    arg(args, idx)?
        .as_f64()
        .ok_or_else(|| MethodFailure(format!("argument #{} is not a number", idx + 1)))
}

/// Integer argument; accepts floats with no fractional part (scripting
/// hosts commonly have a single number type).
pub fn arg_i64(args: &[Value], idx: usize) -> Result<i64, MethodFailure> {
    let value = arg(args, idx)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(MethodFailure(format!(
            "argument #{} is not an integer",
            idx + 1
        ))),
    }
}

/// Optional argument: absent and nil both read as `None`
pub fn arg_opt(args: &[Value], idx: usize) -> Option<&Value> {
    args.get(idx).filter(|v| !v.is_null())
}

pub fn arg_bool(args: &[Value], idx: usize) -> Result<bool, MethodFailure> {
    arg(args, idx)?
        .as_bool()
        .ok_or_else(|| MethodFailure(format!("argument #{} is not a boolean", idx + 1)))
}
