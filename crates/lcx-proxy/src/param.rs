//! Runtime parameter types and type-erased parameter values.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The declared type of one parameter slot.
///
/// Compared by [`TypeId`] only: two `ParamType`s are equal exactly when
/// they describe the same concrete Rust type. There is no notion of
/// subtyping or widening (`i32` never matches `i64`).
#[derive(Clone, Copy)]
pub struct ParamType {
    id: TypeId,
    name: &'static str,
}

impl ParamType {
    /// Returns the parameter type for `T`.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the underlying [`TypeId`].
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the type name, for diagnostics only.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this is the type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamType {}

impl Hash for ParamType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased parameter value.
///
/// Remembers the concrete type it was built from, so a view can check it
/// against the declared slot type.
pub struct ParamValue {
    inner: Box<dyn Any + Send>,
    ty: ParamType,
}

impl ParamValue {
    /// Boxes `value`.
    #[must_use]
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            ty: ParamType::of::<T>(),
        }
    }

    /// Returns the runtime type of the boxed value.
    #[must_use]
    pub fn param_type(&self) -> ParamType {
        self.ty
    }

    /// Returns `true` if the boxed value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Mutably borrows the value as `T`.
    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut::<T>()
    }

    /// Unboxes the value as `T`, handing it back unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let ty = self.ty;
        self.inner
            .downcast::<T>()
            .map(|b| *b)
            .map_err(|inner| Self { inner, ty })
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamValue")
            .field("type", &self.ty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_type_equality_is_exact() {
        assert_eq!(ParamType::of::<i32>(), ParamType::of::<i32>());
        assert_ne!(ParamType::of::<i32>(), ParamType::of::<i64>());
        assert_ne!(ParamType::of::<String>(), ParamType::of::<&'static str>());
        assert!(ParamType::of::<String>().is::<String>());
    }

    #[test]
    fn param_type_display() {
        assert_eq!(ParamType::of::<i32>().to_string(), "i32");
        assert_eq!(format!("{:?}", ParamType::of::<u8>()), "u8");
    }

    #[test]
    fn value_reports_runtime_type() {
        let v = ParamValue::new(5_i32);
        assert_eq!(v.param_type(), ParamType::of::<i32>());
        assert!(v.is::<i32>());
        assert!(!v.is::<u32>());
    }

    #[test]
    fn value_downcasts() {
        let mut v = ParamValue::new(String::from("a"));
        assert_eq!(v.downcast_ref::<String>().map(String::as_str), Some("a"));
        assert!(v.downcast_ref::<i32>().is_none());

        if let Some(s) = v.downcast_mut::<String>() {
            s.push('b');
        }

        let v = v.downcast::<i32>().unwrap_err();
        assert_eq!(v.param_type(), ParamType::of::<String>());
        assert_eq!(v.downcast::<String>().unwrap(), "ab");
    }
}
