//! Class descriptor tables
//!
//! Per-class metadata: one descriptor per attribute, method, signal and
//! slot, each carrying type-erased accessors that bind to a concrete
//! instance through `Any` downcasts. Tables are built once through
//! [`ClassBuilder`] at registration time and are read-only afterward;
//! lookups walk the parent chain so inherited members are always visible.

use std::any::Any;
use std::fmt;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use lumen_types::{Reflected, Shape, TypeCode, Value};

use crate::object::Reflectable;
use crate::params::ParamList;
use crate::signal::{Signal, SlotFn};

type GetFn = Box<dyn Fn(&dyn Any) -> Value + Send + Sync>;
type SetFn = Box<dyn Fn(&mut dyn Any, Value) + Send + Sync>;
type InvokeFn = Box<dyn Fn(&mut dyn Any, &mut ParamList) + Send + Sync>;
type ConnectFn = Box<dyn Fn(&mut dyn Any, SlotFn) + Send + Sync>;
type ConstructFn = Box<dyn Fn() -> Box<dyn Reflectable> + Send + Sync>;

/// Descriptor of one named attribute: type, default and bound accessors.
pub struct AttributeDesc {
    name: &'static str,
    description: &'static str,
    type_code: TypeCode,
    default: Value,
    get: GetFn,
    set: SetFn,
}

impl AttributeDesc {
    /// Attribute name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Type code of the attribute's values
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// The attribute's default value
    pub fn default(&self) -> &Value {
        &self.default
    }

    /// Read the attribute from an instance.
    ///
    /// An instance of the wrong concrete type reads as the default.
    pub fn get(&self, instance: &dyn Any) -> Value {
        (self.get)(instance)
    }

    /// Write the attribute on an instance; a type-mismatched value or a
    /// wrong concrete type is a no-op.
    pub fn set(&self, instance: &mut dyn Any, value: Value) {
        (self.set)(instance, value)
    }

    /// Write the attribute from its textual form.
    pub fn set_text(&self, instance: &mut dyn Any, text: &str) {
        self.set(instance, Value::from_text(self.type_code, text));
    }

    /// Reset the attribute to its default value.
    pub fn set_default(&self, instance: &mut dyn Any) {
        self.set(instance, self.default.clone());
    }

    /// Whether the instance currently holds the default value.
    pub fn is_default(&self, instance: &dyn Any) -> bool {
        self.get(instance) == self.default
    }
}

impl fmt::Debug for AttributeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDesc")
            .field("name", &self.name)
            .field("type_code", &self.type_code)
            .field("default", &self.default)
            .finish()
    }
}

/// Descriptor of one named callable method.
pub struct MethodDesc {
    name: &'static str,
    description: &'static str,
    shape: Shape,
    invoke: InvokeFn,
}

impl MethodDesc {
    /// Method name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The method's call shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Canonical signature fingerprint
    pub fn signature(&self) -> String {
        self.shape.fingerprint()
    }

    /// Invoke on an instance; the method reads and writes the list's slots
    /// directly. A fingerprint mismatch or wrong concrete type is a logged
    /// no-op.
    pub fn invoke(&self, instance: &mut dyn Any, params: &mut ParamList) {
        (self.invoke)(instance, params)
    }
}

impl fmt::Debug for MethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDesc")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Descriptor of one named signal.
pub struct SignalDesc {
    name: &'static str,
    description: &'static str,
    shape: Shape,
    emit: InvokeFn,
    connect: ConnectFn,
}

impl SignalDesc {
    /// Signal name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The signal's call shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Emit the instance's signal with the given parameters.
    pub fn emit(&self, instance: &mut dyn Any, params: &mut ParamList) {
        (self.emit)(instance, params)
    }

    /// Connect a handler to the instance's signal.
    pub fn connect(&self, instance: &mut dyn Any, slot: SlotFn) {
        (self.connect)(instance, slot)
    }
}

impl fmt::Debug for SignalDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDesc")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Descriptor of one named slot (an event handler callable like a method).
pub struct SlotDesc {
    name: &'static str,
    description: &'static str,
    shape: Shape,
    invoke: InvokeFn,
}

impl SlotDesc {
    /// Slot name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The slot's call shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Invoke the slot on an instance.
    pub fn invoke(&self, instance: &mut dyn Any, params: &mut ParamList) {
        (self.invoke)(instance, params)
    }
}

impl fmt::Debug for SlotDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDesc")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Read-only descriptor table of one class.
pub struct ClassInfo {
    name: &'static str,
    parent: Option<&'static ClassInfo>,
    attributes: Vec<AttributeDesc>,
    methods: Vec<MethodDesc>,
    signals: Vec<SignalDesc>,
    slots: Vec<SlotDesc>,
    constructor: Option<ConstructFn>,
    attribute_index: FxHashMap<&'static str, usize>,
    method_index: FxHashMap<&'static str, usize>,
    signal_index: FxHashMap<&'static str, usize>,
    slot_index: FxHashMap<&'static str, usize>,
}

impl ClassInfo {
    /// Class name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parent class, if any
    pub fn parent(&self) -> Option<&'static ClassInfo> {
        self.parent
    }

    /// Whether this class is `other` or derives from it.
    pub fn derives_from(&self, other: &ClassInfo) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, other) {
                return true;
            }
            current = class.parent;
        }
        false
    }

    /// Look up an attribute by name; derived classes shadow their parents.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDesc> {
        match self.attribute_index.get(name) {
            Some(&index) => Some(&self.attributes[index]),
            None => self.parent.and_then(|p| p.attribute(name)),
        }
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDesc> {
        match self.method_index.get(name) {
            Some(&index) => Some(&self.methods[index]),
            None => self.parent.and_then(|p| p.method(name)),
        }
    }

    /// Look up a signal by name.
    pub fn signal(&self, name: &str) -> Option<&SignalDesc> {
        match self.signal_index.get(name) {
            Some(&index) => Some(&self.signals[index]),
            None => self.parent.and_then(|p| p.signal(name)),
        }
    }

    /// Look up a slot by name.
    pub fn slot(&self, name: &str) -> Option<&SlotDesc> {
        match self.slot_index.get(name) {
            Some(&index) => Some(&self.slots[index]),
            None => self.parent.and_then(|p| p.slot(name)),
        }
    }

    /// Attributes declared directly on this class
    pub fn own_attributes(&self) -> &[AttributeDesc] {
        &self.attributes
    }

    /// Methods declared directly on this class
    pub fn own_methods(&self) -> &[MethodDesc] {
        &self.methods
    }

    /// Signals declared directly on this class
    pub fn own_signals(&self) -> &[SignalDesc] {
        &self.signals
    }

    /// Slots declared directly on this class
    pub fn own_slots(&self) -> &[SlotDesc] {
        &self.slots
    }

    /// All attributes, inherited tables aggregated.
    ///
    /// Order is base-first; a derived attribute with the same name replaces
    /// its parent's entry in place.
    pub fn attributes(&self) -> Vec<&AttributeDesc> {
        let mut aggregated: Vec<&AttributeDesc> = match self.parent {
            Some(parent) => parent.attributes(),
            None => Vec::new(),
        };
        for desc in &self.attributes {
            match aggregated.iter().position(|d| d.name == desc.name) {
                Some(index) => aggregated[index] = desc,
                None => aggregated.push(desc),
            }
        }
        aggregated
    }

    /// All methods, inherited tables aggregated (base-first).
    pub fn methods(&self) -> Vec<&MethodDesc> {
        let mut aggregated: Vec<&MethodDesc> = match self.parent {
            Some(parent) => parent.methods(),
            None => Vec::new(),
        };
        for desc in &self.methods {
            match aggregated.iter().position(|d| d.name == desc.name) {
                Some(index) => aggregated[index] = desc,
                None => aggregated.push(desc),
            }
        }
        aggregated
    }

    /// Construct a fresh default instance, when the class registered a
    /// constructor.
    pub fn create(&self) -> Option<Box<dyn Reflectable>> {
        self.constructor.as_ref().map(|construct| construct())
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("parent", &self.parent.map(|p| p.name))
            .field("attributes", &self.attributes)
            .field("methods", &self.methods)
            .field("signals", &self.signals)
            .field("slots", &self.slots)
            .finish()
    }
}

/// Builder assembling one class's descriptor table at registration time.
pub struct ClassBuilder {
    name: &'static str,
    parent: Option<&'static ClassInfo>,
    attributes: Vec<AttributeDesc>,
    methods: Vec<MethodDesc>,
    signals: Vec<SignalDesc>,
    slots: Vec<SlotDesc>,
    constructor: Option<ConstructFn>,
}

impl ClassBuilder {
    /// Start a builder for the named class.
    pub fn new(name: &'static str) -> ClassBuilder {
        ClassBuilder {
            name,
            parent: None,
            attributes: Vec::new(),
            methods: Vec::new(),
            signals: Vec::new(),
            slots: Vec::new(),
            constructor: None,
        }
    }

    /// Declare the parent class.
    pub fn parent(mut self, parent: &'static ClassInfo) -> ClassBuilder {
        self.parent = Some(parent);
        self
    }

    /// Declare an attribute with typed field accessors.
    pub fn attribute<O, T>(
        mut self,
        name: &'static str,
        description: &'static str,
        default: T,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
    ) -> ClassBuilder
    where
        O: Reflectable + 'static,
        T: Reflected + 'static,
    {
        let default = default.into_value();
        let fallback = default.clone();
        self.attributes.push(AttributeDesc {
            name,
            description,
            type_code: T::TYPE_CODE,
            default,
            get: Box::new(move |instance| match instance.downcast_ref::<O>() {
                Some(object) => get(object).into_value(),
                None => fallback.clone(),
            }),
            set: Box::new(move |instance, value| {
                match (instance.downcast_mut::<O>(), T::from_value(&value)) {
                    (Some(object), Some(value)) => set(object, value),
                    _ => debug!("attribute write dropped: type mismatch on {name:?}"),
                }
            }),
        });
        self
    }

    /// Declare a method.
    ///
    /// The generated glue verifies the parameter list's fingerprint against
    /// the declared shape before forwarding; a mismatch never reaches the
    /// body.
    pub fn method<O>(
        mut self,
        name: &'static str,
        description: &'static str,
        shape: Shape,
        body: fn(&mut O, &mut ParamList),
    ) -> ClassBuilder
    where
        O: Reflectable + 'static,
    {
        let fingerprint = shape.fingerprint();
        self.methods.push(MethodDesc {
            name,
            description,
            shape,
            invoke: Box::new(move |instance, params| {
                if params.signature() != fingerprint {
                    debug!(
                        "call to {name:?} dropped: expected {fingerprint}, got {}",
                        params.signature()
                    );
                    return;
                }
                match instance.downcast_mut::<O>() {
                    Some(object) => body(object, params),
                    None => debug!("call to {name:?} dropped: foreign instance"),
                }
            }),
        });
        self
    }

    /// Declare a signal backed by a [`Signal`] field of the object.
    pub fn signal<O>(
        mut self,
        name: &'static str,
        description: &'static str,
        shape: Shape,
        access: fn(&mut O) -> &mut Signal,
    ) -> ClassBuilder
    where
        O: Reflectable + 'static,
    {
        self.signals.push(SignalDesc {
            name,
            description,
            shape,
            emit: Box::new(move |instance, params| {
                if let Some(object) = instance.downcast_mut::<O>() {
                    access(object).emit(params);
                }
            }),
            connect: Box::new(move |instance, slot| {
                if let Some(object) = instance.downcast_mut::<O>() {
                    access(object).connect(slot);
                }
            }),
        });
        self
    }

    /// Declare a slot (an event handler invocable by name).
    pub fn slot<O>(
        mut self,
        name: &'static str,
        description: &'static str,
        shape: Shape,
        body: fn(&mut O, &mut ParamList),
    ) -> ClassBuilder
    where
        O: Reflectable + 'static,
    {
        let fingerprint = shape.fingerprint();
        self.slots.push(SlotDesc {
            name,
            description,
            shape,
            invoke: Box::new(move |instance, params| {
                if params.signature() != fingerprint {
                    debug!(
                        "slot {name:?} dropped: expected {fingerprint}, got {}",
                        params.signature()
                    );
                    return;
                }
                if let Some(object) = instance.downcast_mut::<O>() {
                    body(object, params);
                }
            }),
        });
        self
    }

    /// Register a default constructor so the class can be created by name
    /// through the registry.
    pub fn constructor<O>(mut self) -> ClassBuilder
    where
        O: Reflectable + Default + 'static,
    {
        self.constructor = Some(Box::new(|| Box::new(O::default()) as Box<dyn Reflectable>));
        self
    }

    /// Finish the table, intern it for the process lifetime and publish it
    /// in the global registry.
    pub fn register(self) -> &'static ClassInfo {
        fn index_of<D>(descs: &[D], name: fn(&D) -> &'static str) -> FxHashMap<&'static str, usize> {
            descs
                .iter()
                .enumerate()
                .map(|(index, desc)| (name(desc), index))
                .collect()
        }

        let info: &'static ClassInfo = Box::leak(Box::new(ClassInfo {
            attribute_index: index_of(&self.attributes, |d| d.name),
            method_index: index_of(&self.methods, |d| d.name),
            signal_index: index_of(&self.signals, |d| d.name),
            slot_index: index_of(&self.slots, |d| d.name),
            name: self.name,
            parent: self.parent,
            attributes: self.attributes,
            methods: self.methods,
            signals: self.signals,
            slots: self.slots,
            constructor: self.constructor,
        }));
        ClassRegistry::global().publish(info);
        info
    }
}

/// Process-wide name → class table.
///
/// Written only while classes register (startup/plugin load); read-mostly
/// afterward. The lock covers registration-time interning, it is not a
/// general concurrency facility.
pub struct ClassRegistry {
    classes: RwLock<FxHashMap<&'static str, &'static ClassInfo>>,
}

static REGISTRY: Lazy<ClassRegistry> = Lazy::new(|| ClassRegistry {
    classes: RwLock::new(FxHashMap::default()),
});

impl ClassRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static ClassRegistry {
        &REGISTRY
    }

    fn publish(&self, info: &'static ClassInfo) {
        let previous = self.classes.write().insert(info.name, info);
        if previous.is_some() {
            warn!("class {:?} registered twice, replacing", info.name);
        } else {
            info!("registered class {:?}", info.name);
        }
    }

    /// Look up a class by name.
    pub fn get(&self, name: &str) -> Option<&'static ClassInfo> {
        self.classes.read().get(name).copied()
    }

    /// Create a fresh default instance of a registered class; `None` for
    /// unknown names or classes without a constructor.
    pub fn create(&self, name: &str) -> Option<Box<dyn Reflectable>> {
        self.get(name).and_then(|info| info.create())
    }

    /// Names of every registered class.
    pub fn names(&self) -> Vec<&'static str> {
        self.classes.read().keys().copied().collect()
    }
}
