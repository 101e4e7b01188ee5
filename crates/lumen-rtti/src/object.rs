//! Reflective object dispatch
//!
//! [`Reflectable`] is the minimal hook a concrete type implements (its
//! class table plus `Any` access); [`ObjectExt`] layers the whole
//! name-based dispatch surface on top of it: attribute access, method
//! calls, signal/slot lookup and bulk attribute (de)serialization over the
//! textual and XML encodings.
//!
//! Absence of a named member is never escalated: every name-based
//! operation is an inert, debug-logged no-op on a miss, so tooling and
//! scripting callers can probe optional members freely.

use std::any::Any;

use log::debug;

use lumen_types::Value;

use crate::class::{AttributeDesc, ClassInfo, ClassRegistry, MethodDesc, SignalDesc, SlotDesc};
use crate::params::ParamList;
use crate::signal::SlotFn;
use crate::xml::XmlElement;

/// Controls whether bulk serialization emits attributes that currently
/// hold their default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
    /// Emit every attribute
    WithDefault,
    /// Skip attributes equal to their default (smaller output)
    SkipDefault,
}

/// A type with a registered class descriptor table.
pub trait Reflectable: Any {
    /// The class's descriptor table
    fn class_info(&self) -> &'static ClassInfo;

    /// Borrow as `Any` for descriptor-side downcasts
    fn as_any(&self) -> &dyn Any;

    /// Mutably borrow as `Any` for descriptor-side downcasts
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Implement [`Reflectable`] for a concrete type from an expression
/// yielding its `&'static ClassInfo`.
#[macro_export]
macro_rules! impl_reflectable {
    ($ty:ty, $class:expr) => {
        impl $crate::Reflectable for $ty {
            fn class_info(&self) -> &'static $crate::ClassInfo {
                $class
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

/// Name-based dispatch over any [`Reflectable`] instance.
pub trait ObjectExt: Reflectable {
    /// Look up an attribute descriptor; `None` is the not-found sentinel.
    fn attribute(&self, name: &str) -> Option<&'static AttributeDesc> {
        self.class_info().attribute(name)
    }

    /// Look up a method descriptor.
    fn method(&self, name: &str) -> Option<&'static MethodDesc> {
        self.class_info().method(name)
    }

    /// Look up a signal descriptor.
    fn signal(&self, name: &str) -> Option<&'static SignalDesc> {
        self.class_info().signal(name)
    }

    /// Look up a slot descriptor.
    fn slot(&self, name: &str) -> Option<&'static SlotDesc> {
        self.class_info().slot(name)
    }

    /// Read an attribute's current value by name.
    fn get_attribute(&self, name: &str) -> Option<Value> {
        self.attribute(name).map(|desc| desc.get(self.as_any()))
    }

    /// Set an attribute from its textual form; no-op on a miss.
    fn set_attribute(&mut self, name: &str, text: &str) {
        match self.attribute(name) {
            Some(desc) => desc.set_text(self.as_any_mut(), text),
            None => debug!(
                "set_attribute: no attribute {name:?} on {}",
                self.class_info().name()
            ),
        }
    }

    /// Set an attribute from a typed value; no-op on a miss.
    fn set_attribute_value(&mut self, name: &str, value: Value) {
        match self.attribute(name) {
            Some(desc) => desc.set(self.as_any_mut(), value),
            None => debug!(
                "set_attribute_value: no attribute {name:?} on {}",
                self.class_info().name()
            ),
        }
    }

    /// Reset an attribute to its default; no-op on a miss.
    fn set_attribute_default(&mut self, name: &str) {
        if let Some(desc) = self.attribute(name) {
            desc.set_default(self.as_any_mut());
        }
    }

    /// Call a method with prepared dynamic parameters; no-op on a miss.
    ///
    /// Shape correctness is the parameter list's contract; the bound
    /// method's glue verifies the fingerprint and drops mismatched calls.
    fn call_method(&mut self, name: &str, params: &mut ParamList) {
        match self.method(name) {
            Some(desc) => desc.invoke(self.as_any_mut(), params),
            None => debug!(
                "call_method: no method {name:?} on {}",
                self.class_info().name()
            ),
        }
    }

    /// Call a method with parameters given in textual form.
    fn call_method_text(&mut self, name: &str, text: &str) {
        if let Some(desc) = self.method(name) {
            let mut params = ParamList::from_text(desc.shape().clone(), text);
            desc.invoke(self.as_any_mut(), &mut params);
        }
    }

    /// Call a method with parameters given as an XML element.
    fn call_method_xml(&mut self, name: &str, element: &XmlElement) {
        if let Some(desc) = self.method(name) {
            let mut params = ParamList::from_xml(desc.shape().clone(), element);
            desc.invoke(self.as_any_mut(), &mut params);
        }
    }

    /// Call a method with textual parameters and return the textual form
    /// of its return value; empty string on a miss or for void methods.
    fn call_method_with_return(&mut self, name: &str, text: &str) -> String {
        match self.method(name) {
            Some(desc) => {
                let mut params = ParamList::from_text(desc.shape().clone(), text);
                desc.invoke(self.as_any_mut(), &mut params);
                params.return_value().map(Value::to_text).unwrap_or_default()
            }
            None => String::new(),
        }
    }

    /// XML-sourced variant of
    /// [`call_method_with_return`](ObjectExt::call_method_with_return).
    fn call_method_with_return_xml(&mut self, name: &str, element: &XmlElement) -> String {
        match self.method(name) {
            Some(desc) => {
                let mut params = ParamList::from_xml(desc.shape().clone(), element);
                desc.invoke(self.as_any_mut(), &mut params);
                params.return_value().map(Value::to_text).unwrap_or_default()
            }
            None => String::new(),
        }
    }

    /// Emit a signal by name; no-op on a miss.
    fn emit_signal(&mut self, name: &str, params: &mut ParamList) {
        if let Some(desc) = self.signal(name) {
            desc.emit(self.as_any_mut(), params);
        }
    }

    /// Connect a handler to a signal by name; no-op on a miss.
    fn connect_signal(&mut self, name: &str, slot: SlotFn) {
        if let Some(desc) = self.signal(name) {
            desc.connect(self.as_any_mut(), slot);
        }
    }

    /// Invoke a slot by name; no-op on a miss.
    fn call_slot(&mut self, name: &str, params: &mut ParamList) {
        if let Some(desc) = self.slot(name) {
            desc.invoke(self.as_any_mut(), params);
        }
    }

    /// Serialize every attribute as space-separated `name="value"` pairs.
    fn get_values(&self, mode: ValueMode) -> String {
        let mut out = String::new();
        for desc in self.class_info().attributes() {
            let value = desc.get(self.as_any());
            if mode == ValueMode::WithDefault || value != *desc.default() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(desc.name());
                out.push_str("=\"");
                out.push_str(&value.to_text());
                out.push('"');
            }
        }
        out
    }

    /// Apply `name=value` pairs to attributes by name; unknown names are
    /// skipped.
    fn set_values(&mut self, text: &str) {
        let mut parser = crate::parser::TextParamParser::new();
        let mut positioned = parser.parse_str(text);
        while positioned {
            self.set_attribute(parser.name(), parser.value());
            positioned = parser.next();
        }
    }

    /// Write every attribute onto an XML element.
    fn get_values_xml(&self, element: &mut XmlElement, mode: ValueMode) {
        for desc in self.class_info().attributes() {
            let value = desc.get(self.as_any());
            if mode == ValueMode::WithDefault || value != *desc.default() {
                element.set_attribute(desc.name(), value.to_text());
            }
        }
    }

    /// Apply an XML element's attributes by name.
    fn set_values_xml(&mut self, element: &XmlElement) {
        let mut parser = crate::xml::XmlParamParser::new();
        let mut positioned = parser.parse_xml(element);
        while positioned {
            self.set_attribute(parser.name(), parser.value());
            positioned = parser.next();
        }
    }

    /// Reset every attribute to its default value.
    fn set_defaults(&mut self) {
        for desc in self.class_info().attributes() {
            desc.set_default(self.as_any_mut());
        }
    }

    /// Full textual form of the object (all attributes, defaults included).
    fn to_text(&self) -> String {
        self.get_values(ValueMode::WithDefault)
    }

    /// Restore the object from its textual form.
    fn from_text(&mut self, text: &str) {
        self.set_values(text);
    }

    /// Full XML form of the object, element named after the class.
    fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new(self.class_info().name());
        self.get_values_xml(&mut element, ValueMode::WithDefault);
        element
    }

    /// Restore the object from XML; applies only when the element carries
    /// this class's name.
    fn from_xml(&mut self, element: &XmlElement) {
        if element.name() == self.class_info().name() {
            self.set_values_xml(element);
        }
    }

    /// Whether this object is an instance of the named class or one of its
    /// derived classes.
    fn is_instance_of(&self, name: &str) -> bool {
        match ClassRegistry::global().get(name) {
            Some(class) => self.is_instance_of_class(class),
            None => false,
        }
    }

    /// Reference-based variant of [`is_instance_of`](ObjectExt::is_instance_of).
    fn is_instance_of_class(&self, class: &ClassInfo) -> bool {
        self.class_info().derives_from(class)
    }
}

impl<T: Reflectable + ?Sized> ObjectExt for T {}
