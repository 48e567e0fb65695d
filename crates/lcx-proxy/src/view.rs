//! Parameter view: typed, mutable snapshot of an intercepted call's arguments.
//!
//! A [`ParameterView`] is built once per intercepted call, handed by
//! `&mut` to each interceptor in priority order, and finally turned back
//! into the argument list of the real call.
//!
//! # Invariants
//!
//! - The number of slots is fixed at construction.
//! - A present value always has exactly the declared slot type. There is
//!   no subtype or widening match: a slot declared `i64` rejects an `i32`.
//! - An absent value (`None`) is legal in any slot.
//!
//! # Example
//!
//! ```
//! use lcx_proxy::{ParamType, ParamValue, ParameterView};
//!
//! let mut view = ParameterView::new(
//!     vec![ParamType::of::<String>(), ParamType::of::<i32>()],
//!     Some(vec![Some(ParamValue::new("a".to_string())), Some(ParamValue::new(5_i32))]),
//! )
//! .unwrap();
//!
//! view.set(1, 10_i32).unwrap();
//! assert_eq!(view.get::<i32>(1).unwrap(), Some(&10));
//!
//! // Wrong type: rejected, prior value kept.
//! assert!(view.set(1, "x".to_string()).is_err());
//! assert_eq!(view.get::<i32>(1).unwrap(), Some(&10));
//! ```

use std::any::Any;
use std::fmt;

use crate::{ParamType, ParamValue, ProxyError};

/// Typed, mutable view over the parameters of one intercepted call.
pub struct ParameterView {
    types: Vec<ParamType>,
    values: Vec<Option<ParamValue>>,
}

impl ParameterView {
    /// Creates a view from declared types and actual values.
    ///
    /// `values == None` is treated as an empty argument list.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::InvalidArgument`] if the lengths differ
    /// - [`ProxyError::TypeMismatch`] if a present value does not have
    ///   exactly the declared type of its slot
    pub fn new(
        types: Vec<ParamType>,
        values: Option<Vec<Option<ParamValue>>>,
    ) -> Result<Self, ProxyError> {
        let values = values.unwrap_or_default();
        if types.len() != values.len() {
            return Err(ProxyError::invalid_argument(format!(
                "The length of param types ({}) does not match the length of the params ({}).",
                types.len(),
                values.len()
            )));
        }

        for (pos, (ty, value)) in types.iter().zip(&values).enumerate() {
            if let Some(value) = value {
                check_type(pos, *ty, value)?;
            }
        }

        Ok(Self { types, values })
    }

    /// Creates a view with every slot absent.
    #[must_use]
    pub fn empty_slots(types: Vec<ParamType>) -> Self {
        let values = types.iter().map(|_| None).collect();
        Self { types, values }
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// Alias of [`ParameterView::size`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Returns `true` if the call takes no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns all declared types.
    #[must_use]
    pub fn types(&self) -> &[ParamType] {
        &self.types
    }

    /// Returns the declared type at `pos`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::InvalidArgument`] if `pos` is out of range.
    pub fn type_at(&self, pos: usize) -> Result<ParamType, ProxyError> {
        self.check_pos(pos)?;
        Ok(self.types[pos])
    }

    /// Returns the value at `pos` (`None` if absent).
    ///
    /// # Errors
    ///
    /// [`ProxyError::InvalidArgument`] if `pos` is out of range.
    pub fn value_at(&self, pos: usize) -> Result<Option<&ParamValue>, ProxyError> {
        self.check_pos(pos)?;
        Ok(self.values[pos].as_ref())
    }

    /// Replaces the value at `pos`.
    ///
    /// On error the stored value is left untouched.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::InvalidArgument`] if `pos` is out of range
    /// - [`ProxyError::TypeMismatch`] if `value` is present and its type
    ///   is not exactly the declared type at `pos`
    pub fn set_value_at(
        &mut self,
        pos: usize,
        value: Option<ParamValue>,
    ) -> Result<(), ProxyError> {
        self.check_pos(pos)?;
        if let Some(ref value) = value {
            check_type(pos, self.types[pos], value)?;
        }
        self.values[pos] = value;
        Ok(())
    }

    /// Borrows the value at `pos` as `T`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::InvalidArgument`] if `pos` is out of range
    /// - [`ProxyError::TypeMismatch`] if `T` is not the declared type
    pub fn get<T: Any>(&self, pos: usize) -> Result<Option<&T>, ProxyError> {
        let declared = self.type_at(pos)?;
        if !declared.is::<T>() {
            return Err(mismatch(pos, declared, ParamType::of::<T>()));
        }
        Ok(self.values[pos]
            .as_ref()
            .and_then(ParamValue::downcast_ref::<T>))
    }

    /// Stores `value` at `pos`. Shorthand for
    /// `set_value_at(pos, Some(ParamValue::new(value)))`.
    ///
    /// # Errors
    ///
    /// Same as [`ParameterView::set_value_at`].
    pub fn set<T: Any + Send>(&mut self, pos: usize, value: T) -> Result<(), ProxyError> {
        self.set_value_at(pos, Some(ParamValue::new(value)))
    }

    /// Clears the value at `pos`.
    ///
    /// # Errors
    ///
    /// [`ProxyError::InvalidArgument`] if `pos` is out of range.
    pub fn clear(&mut self, pos: usize) -> Result<(), ProxyError> {
        self.set_value_at(pos, None)
    }

    /// Takes the value at `pos`, leaving the slot absent.
    ///
    /// # Errors
    ///
    /// [`ProxyError::InvalidArgument`] if `pos` is out of range.
    pub fn take_value(&mut self, pos: usize) -> Result<Option<ParamValue>, ProxyError> {
        self.check_pos(pos)?;
        Ok(self.values[pos].take())
    }

    /// Consumes the view, returning the values in parameter order.
    #[must_use]
    pub fn into_values(self) -> Vec<Option<ParamValue>> {
        self.values
    }

    fn check_pos(&self, pos: usize) -> Result<(), ProxyError> {
        if pos >= self.types.len() {
            return Err(ProxyError::invalid_argument(format!(
                "Illegal parameter position {pos} (size {}).",
                self.types.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ParameterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for (ty, value) in self.types.iter().zip(&self.values) {
            let state = if value.is_some() { "set" } else { "absent" };
            list.entry(&format_args!("{ty}: {state}"));
        }
        list.finish()
    }
}

fn check_type(pos: usize, declared: ParamType, value: &ParamValue) -> Result<(), ProxyError> {
    let actual = value.param_type();
    if actual != declared {
        return Err(mismatch(pos, declared, actual));
    }
    Ok(())
}

fn mismatch(pos: usize, expected: ParamType, actual: ParamType) -> ProxyError {
    ProxyError::TypeMismatch {
        pos,
        expected: expected.name(),
        actual: actual.name(),
    }
}
