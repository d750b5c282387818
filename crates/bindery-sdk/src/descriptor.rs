//! Class and method descriptors
//!
//! Descriptors are immutable metadata records describing a native class
//! before any host materializes it. They are built once, handed to a
//! registry, and only read afterwards.

use crate::thunk::{ConstructorThunk, MethodThunk};

/// One exposed method: a name and the thunk it forwards to.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    name: String,
    thunk: MethodThunk,
}

impl MethodDescriptor {
    /// Create a method descriptor
    pub fn new(name: impl Into<String>, thunk: MethodThunk) -> Self {
        Self {
            name: name.into(),
            thunk,
        }
    }

    /// Method name as it appears on the prototype
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Native entry point
    pub fn thunk(&self) -> MethodThunk {
        self.thunk
    }
}

/// One exposed class: name, constructor thunk and methods in declared order.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    name: String,
    constructor: ConstructorThunk,
    methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Create a class descriptor with no methods
    pub fn new(name: impl Into<String>, constructor: ConstructorThunk) -> Self {
        Self {
            name: name.into(),
            constructor,
            methods: Vec::new(),
        }
    }

    /// Append a method. Declaration order is preserved.
    pub fn method(mut self, name: impl Into<String>, thunk: MethodThunk) -> Self {
        self.methods.push(MethodDescriptor::new(name, thunk));
        self
    }

    /// Append several methods in iteration order
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.methods.extend(methods);
        self
    }

    /// Class name, used as the namespace key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructor entry point
    pub fn constructor(&self) -> ConstructorThunk {
        self.constructor
    }

    /// Methods in declared order
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Number of methods
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NativeResult;
    use crate::thunk::same_method;
    use crate::value::{NativeObject, NativeValue};

    fn ctor(_args: &[NativeValue]) -> NativeResult<NativeObject> {
        Ok(NativeObject::new(0i64))
    }

    fn first(_this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
        Ok(NativeValue::i32(1))
    }

    fn second(_this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
        Ok(NativeValue::i32(2))
    }

    #[test]
    fn test_methods_keep_declared_order() {
        let class = ClassDescriptor::new("Pair", ctor)
            .method("first", first)
            .method("second", second)
            .with_methods([MethodDescriptor::new("again", first)]);

        let names: Vec<&str> = class.methods().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["first", "second", "again"]);
        assert_eq!(class.method_count(), 3);
        assert!(same_method(class.methods()[1].thunk(), second));
    }

    #[test]
    fn test_class_without_methods() {
        let class = ClassDescriptor::new("Empty", ctor);
        assert_eq!(class.name(), "Empty");
        assert!(class.methods().is_empty());
    }
}
