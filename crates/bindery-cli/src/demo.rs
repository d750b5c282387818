//! Built-in demo module
//!
//! `Point` and `Counter` show ordinary classes. `Greeting` is registered
//! twice on purpose so the CLI can show which registration a traversal order
//! keeps.

use std::sync::atomic::{AtomicI64, Ordering};

use bindery_core::{ClassDescriptor, ClassRegistry, NativeObject, NativeResult, NativeValue};
use bindery_sdk::{arg, ToNative};

/// Name the demo module is loaded under
pub const MODULE_NAME: &str = "demo";

// ── Point ──────────────────────────────────────────────────────────────────

struct Point {
    x: f64,
    y: f64,
}

fn point_new(args: &[NativeValue]) -> NativeResult<NativeObject> {
    Ok(NativeObject::new(Point {
        x: arg(args, 0)?,
        y: arg(args, 1)?,
    }))
}

fn point_get_x(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    Ok(this.expect_ref::<Point>()?.x.to_native())
}

fn point_get_y(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    Ok(this.expect_ref::<Point>()?.y.to_native())
}

fn point_norm(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    let p = this.expect_ref::<Point>()?;
    Ok(p.x.hypot(p.y).to_native())
}

/// `Point(x, y)` with `getX`, `getY`, `norm`
pub fn point() -> ClassDescriptor {
    ClassDescriptor::new("Point", point_new)
        .method("getX", point_get_x)
        .method("getY", point_get_y)
        .method("norm", point_norm)
}

// ── Counter ────────────────────────────────────────────────────────────────

struct Counter {
    value: AtomicI64,
}

fn counter_new(args: &[NativeValue]) -> NativeResult<NativeObject> {
    let start = match args.first() {
        Some(_) => arg::<i64>(args, 0)?,
        None => 0,
    };
    Ok(NativeObject::new(Counter {
        value: AtomicI64::new(start),
    }))
}

fn counter_increment(this: &NativeObject, args: &[NativeValue]) -> NativeResult<NativeValue> {
    let step = match args.first() {
        Some(_) => arg::<i64>(args, 0)?,
        None => 1,
    };
    let counter = this.expect_ref::<Counter>()?;
    Ok((counter.value.fetch_add(step, Ordering::Relaxed) + step).to_native())
}

fn counter_get(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    Ok(this.expect_ref::<Counter>()?.value.load(Ordering::Relaxed).to_native())
}

fn counter_reset(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    this.expect_ref::<Counter>()?.value.store(0, Ordering::Relaxed);
    Ok(().to_native())
}

/// `Counter([start])` with `increment([step])`, `get`, `reset`
pub fn counter() -> ClassDescriptor {
    ClassDescriptor::new("Counter", counter_new)
        .method("increment", counter_increment)
        .method("get", counter_get)
        .method("reset", counter_reset)
}

// ── Greeting ───────────────────────────────────────────────────────────────

struct Greeting {
    revision: i32,
}

fn greeting_v1_new(_args: &[NativeValue]) -> NativeResult<NativeObject> {
    Ok(NativeObject::new(Greeting { revision: 1 }))
}

fn greeting_v2_new(_args: &[NativeValue]) -> NativeResult<NativeObject> {
    Ok(NativeObject::new(Greeting { revision: 2 }))
}

fn greeting_revision(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    Ok(this.expect_ref::<Greeting>()?.revision.to_native())
}

fn greeting_loud(_this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
    Ok(true.to_native())
}

/// First `Greeting` registration
pub fn greeting_v1() -> ClassDescriptor {
    ClassDescriptor::new("Greeting", greeting_v1_new).method("revision", greeting_revision)
}

/// Second `Greeting` registration, with an extra method
pub fn greeting_v2() -> ClassDescriptor {
    ClassDescriptor::new("Greeting", greeting_v2_new)
        .method("revision", greeting_revision)
        .method("loud", greeting_loud)
}

/// Register every demo class, in declaration order
pub fn register_demo_classes(registry: &mut ClassRegistry) {
    registry.register(point());
    registry.register(counter());
    registry.register(greeting_v1());
    registry.register(greeting_v2());
}

/// Fresh registry holding the demo classes
pub fn demo_registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    register_demo_classes(&mut registry);
    registry
}
