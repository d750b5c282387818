//! `bindery call` — construct a demo class and invoke one method.

use anyhow::{bail, Context};
use bindery_core::{InitOptions, NativeValue};
use tracing::debug;

use crate::session::Session;

pub fn execute(
    options: InitOptions,
    class: &str,
    method: &str,
    ctor_args: &[String],
    args: &[String],
) -> anyhow::Result<()> {
    let session = Session::load(options)?;
    let result = run(&session, class, method, ctor_args, args)?;
    println!("{}", result);
    Ok(())
}

/// Construct `class` with `ctor_args`, then call `method` with `args`
pub fn run(
    session: &Session,
    class: &str,
    method: &str,
    ctor_args: &[String],
    args: &[String],
) -> anyhow::Result<NativeValue> {
    let ctor_args = parse_values(ctor_args)?;
    let args = parse_values(args)?;

    let ctor = session.class(class)?;
    let instance = session
        .realm
        .construct(&ctor, &ctor_args)
        .with_context(|| format!("new {}(..) failed", class))?;
    debug!(class, instance = instance.object_id(), "constructed");

    let result = session
        .realm
        .invoke(&instance, method, &args)
        .with_context(|| format!("{}.{}(..) failed", class, method))?;
    Ok(result)
}

fn parse_values(raw: &[String]) -> anyhow::Result<Vec<NativeValue>> {
    raw.iter().map(|s| parse_value(s)).collect()
}

/// Parse a command-line literal: `null`, `true`, `false`, an integer or a float
pub fn parse_value(s: &str) -> anyhow::Result<NativeValue> {
    match s {
        "null" => return Ok(NativeValue::null()),
        "true" => return Ok(NativeValue::bool(true)),
        "false" => return Ok(NativeValue::bool(false)),
        _ => {}
    }
    if let Ok(i) = s.parse::<i32>() {
        return Ok(NativeValue::i32(i));
    }
    if let Ok(i) = s.parse::<i64>() {
        return Ok(NativeValue::i64(i));
    }
    if let Ok(f) = s.parse::<f64>() {
        return Ok(NativeValue::f64(f));
    }
    bail!("cannot parse argument {:?} (expected null, bool, integer or float)", s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("null").unwrap(), NativeValue::null());
        assert_eq!(parse_value("true").unwrap(), NativeValue::bool(true));
        assert_eq!(parse_value("-7").unwrap(), NativeValue::i32(-7));
        assert_eq!(parse_value("5000000000").unwrap(), NativeValue::i64(5_000_000_000));
        assert_eq!(parse_value("2.5").unwrap(), NativeValue::f64(2.5));
        assert!(parse_value("abc").is_err());
    }
}
