//! Type-erased parameter lists
//!
//! [`ParamList`] is a fixed-arity, positionally addressed container of
//! values plus an optional return slot, committed to one [`Shape`] for its
//! whole lifetime. One generic container keyed by the shape's ordered type
//! codes replaces per-arity code generation; the position-based, type-erased
//! access contract is unchanged: out-of-range indices answer with sentinels,
//! never errors.
//!
//! A list lives for one synchronous call: built by the caller, read and
//! written by the callee, discarded at scope exit.

use lumen_types::{Reflected, Shape, TypeCode, TypeError, Value};

use crate::parser::TextParamParser;
use crate::xml::{XmlElement, XmlParamParser};

/// An ordered tuple of [`Reflected`] native values, arity 0 to 16.
///
/// Implemented for tuples; the compile-time checked entry into type-erased
/// storage (one conversion per slot).
pub trait ParamPack {
    /// Type codes of the pack, in order
    fn type_codes() -> Vec<TypeCode>;

    /// Convert every element into its storage representation, in order
    fn into_values(self) -> Vec<Value>;
}

macro_rules! impl_param_pack {
    ($($name:ident),*) => {
        impl<$($name: Reflected),*> ParamPack for ($($name,)*) {
            fn type_codes() -> Vec<TypeCode> {
                vec![$($name::TYPE_CODE),*]
            }

            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)*) = self;
                vec![$($name.into_value()),*]
            }
        }
    };
}

impl ParamPack for () {
    fn type_codes() -> Vec<TypeCode> {
        Vec::new()
    }

    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl_param_pack!(T0);
impl_param_pack!(T0, T1);
impl_param_pack!(T0, T1, T2);
impl_param_pack!(T0, T1, T2, T3);
impl_param_pack!(T0, T1, T2, T3, T4);
impl_param_pack!(T0, T1, T2, T3, T4, T5);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14);
impl_param_pack!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15);

/// Fixed-arity, type-erased parameter container with optional return slot.
#[derive(Debug, PartialEq)]
pub struct ParamList {
    shape: Shape,
    slots: Vec<Value>,
    ret: Option<Value>,
}

impl ParamList {
    /// Create a list with every slot at its type's default.
    pub fn new(shape: Shape) -> ParamList {
        let slots = shape.params().iter().map(|&c| Value::default_of(c)).collect();
        let ret = shape.has_return().then(|| Value::default_of(shape.ret()));
        ParamList { shape, slots, ret }
    }

    /// Create a list from typed native values.
    ///
    /// The shape is derived from the return type `R` and the argument
    /// tuple; tuples are bounded at 16 elements so the only failure mode
    /// is a hand-built oversized shape elsewhere.
    pub fn of<R: Reflected, A: ParamPack>(args: A) -> Result<ParamList, TypeError> {
        let shape = Shape::new(R::TYPE_CODE, A::type_codes())?;
        let ret = shape.has_return().then(|| Value::default_of(shape.ret()));
        Ok(ParamList {
            slots: args.into_values(),
            shape,
            ret,
        })
    }

    /// Build a list of the given shape from textual `name=value` pairs.
    ///
    /// Binding is positional: pair *i* binds to slot *i* regardless of its
    /// name. Slots beyond the parsed pairs keep their defaults, pairs
    /// beyond the arity are never requested, and a value that fails typed
    /// conversion becomes the slot type's default.
    pub fn from_text(shape: Shape, text: &str) -> ParamList {
        let mut parser = TextParamParser::new();
        let mut list = ParamList::new(shape);
        let mut positioned = parser.parse_str(text);
        for index in 0..list.arity() {
            if !positioned {
                break;
            }
            let code = list.shape.parameter(index);
            list.slots[index] = Value::from_text(code, parser.value());
            positioned = parser.next();
        }
        list
    }

    /// Build a list of the given shape from an XML element's attributes.
    ///
    /// Identical semantics to [`from_text`](ParamList::from_text), pairs
    /// sourced from the attribute list in document order.
    pub fn from_xml(shape: Shape, element: &XmlElement) -> ParamList {
        let mut parser = XmlParamParser::new();
        let mut list = ParamList::new(shape);
        let mut positioned = parser.parse_xml(element);
        for index in 0..list.arity() {
            if !positioned {
                break;
            }
            let code = list.shape.parameter(index);
            list.slots[index] = Value::from_text(code, parser.value());
            positioned = parser.next();
        }
        list
    }

    /// The shape this list committed to
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of parameter slots (fixed arity)
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Type code of parameter `index`, `TypeCode::Invalid` out of range.
    pub fn parameter_type(&self, index: usize) -> TypeCode {
        self.shape.parameter(index)
    }

    /// Borrow slot `index`'s storage, `None` out of range.
    ///
    /// The reference is stable for the list's lifetime.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)
    }

    /// Mutably borrow slot `index`'s storage, `None` out of range.
    pub fn value_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.slots.get_mut(index)
    }

    /// Typed read of slot `index`; `None` out of range or on a type
    /// mismatch.
    pub fn get<T: Reflected>(&self, index: usize) -> Option<T> {
        self.slots.get(index).and_then(T::from_value)
    }

    /// Typed write of slot `index`; `false` out of range or on a type
    /// mismatch (the slot is left unchanged).
    pub fn set<T: Reflected>(&mut self, index: usize, value: T) -> bool {
        if self.shape.parameter(index) != T::TYPE_CODE {
            return false;
        }
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = value.into_value();
                true
            }
            None => false,
        }
    }

    /// Return type code, `TypeCode::Void` when the shape has none.
    pub fn return_type(&self) -> TypeCode {
        self.shape.ret()
    }

    /// Whether this list carries a return slot
    pub fn has_return(&self) -> bool {
        self.ret.is_some()
    }

    /// Borrow the return slot; `None` for void shapes.
    pub fn return_value(&self) -> Option<&Value> {
        self.ret.as_ref()
    }

    /// Mutably borrow the return slot; `None` for void shapes.
    pub fn return_value_mut(&mut self) -> Option<&mut Value> {
        self.ret.as_mut()
    }

    /// Store a return value; `false` for void shapes or on a type
    /// mismatch.
    pub fn set_return(&mut self, value: Value) -> bool {
        if value.type_code() != self.shape.ret() {
            return false;
        }
        match &mut self.ret {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Typed read of the return slot.
    pub fn get_return<T: Reflected>(&self) -> Option<T> {
        self.ret.as_ref().and_then(T::from_value)
    }

    /// Canonical signature fingerprint of the shape.
    pub fn signature(&self) -> String {
        self.shape.fingerprint()
    }

    /// Copy every slot, including the return slot, from a list of the
    /// identical shape. Returns `false` (leaving `self` unchanged) on a
    /// shape mismatch.
    ///
    /// Note the asymmetry with [`Clone`]: cloning re-defaults the return
    /// slot, assignment copies it. This mirrors long-observed behavior the
    /// engine's serialization relies on and is pinned by a regression test.
    pub fn assign_from(&mut self, other: &ParamList) -> bool {
        if self.shape != other.shape {
            return false;
        }
        self.slots.clone_from(&other.slots);
        self.ret.clone_from(&other.ret);
        true
    }
}

impl Clone for ParamList {
    /// Deep-copies the parameter slots; the return slot of the copy starts
    /// back at its default (see [`assign_from`](ParamList::assign_from)).
    fn clone(&self) -> ParamList {
        ParamList {
            shape: self.shape.clone(),
            slots: self.slots.clone(),
            ret: self
                .ret
                .as_ref()
                .map(|_| Value::default_of(self.shape.ret())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_construction_reads_back() {
        let list = ParamList::of::<i32, _>((true, 7i32, "hi".to_string())).unwrap();
        assert_eq!(list.arity(), 3);
        assert_eq!(list.get::<bool>(0), Some(true));
        assert_eq!(list.get::<i32>(1), Some(7));
        assert_eq!(list.get::<String>(2), Some("hi".to_string()));
        assert_eq!(list.signature(), "int32(bool,int32,string)");
    }

    #[test]
    fn void_shape_has_no_return_capability() {
        let mut list = ParamList::of::<(), _>((1i32,)).unwrap();
        assert!(!list.has_return());
        assert_eq!(list.return_type(), TypeCode::Void);
        assert_eq!(list.return_value(), None);
        assert!(!list.set_return(Value::Int32(5)));
    }

    #[test]
    fn out_of_range_answers_with_sentinels() {
        let list = ParamList::of::<(), _>((1i32,)).unwrap();
        assert_eq!(list.parameter_type(1), TypeCode::Invalid);
        assert_eq!(list.value(1), None);
        assert_eq!(list.get::<i32>(9), None);
    }

    #[test]
    fn set_is_type_strict() {
        let mut list = ParamList::of::<(), _>((1i32,)).unwrap();
        assert!(list.set(0, 5i32));
        assert!(!list.set(0, 5i64));
        assert_eq!(list.get::<i32>(0), Some(5));
    }
}
