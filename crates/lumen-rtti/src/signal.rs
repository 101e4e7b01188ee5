//! Signals and slot handlers
//!
//! A [`Signal`] is an event source an object exposes as a field. Slot
//! handlers are plain functions over a [`ParamList`]; emission forwards the
//! list to every connected handler, and only when the list's fingerprint
//! matches the signal's declared shape. A mismatch is a logged no-op, in
//! line with the runtime's silent-miss policy.

use log::debug;

use lumen_types::Shape;

use crate::params::ParamList;

/// A connectable slot handler.
pub type SlotFn = fn(&mut ParamList);

/// Event source with a fixed call shape and a connection list.
#[derive(Debug)]
pub struct Signal {
    shape: Shape,
    connections: Vec<SlotFn>,
}

impl Signal {
    /// Create a signal with the given call shape.
    pub fn new(shape: Shape) -> Signal {
        Signal {
            shape,
            connections: Vec::new(),
        }
    }

    /// The signal's call shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Connect a handler. Connecting the same handler twice invokes it
    /// twice per emission.
    pub fn connect(&mut self, slot: SlotFn) {
        self.connections.push(slot);
    }

    /// Disconnect the first matching connection of `slot`; `false` when it
    /// was not connected.
    pub fn disconnect(&mut self, slot: SlotFn) -> bool {
        match self
            .connections
            .iter()
            .position(|&connected| std::ptr::fn_addr_eq(connected, slot))
        {
            Some(index) => {
                self.connections.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of connected handlers
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Forward `params` to every connected handler, in connection order.
    ///
    /// No-op when the list's shape does not match the signal's.
    pub fn emit(&self, params: &mut ParamList) {
        if params.shape() != &self.shape {
            debug!(
                "signal emit dropped: expected {}, got {}",
                self.shape.fingerprint(),
                params.signature()
            );
            return;
        }
        for slot in &self.connections {
            slot(params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_types::TypeCode;

    fn double_slot(params: &mut ParamList) {
        let value = params.get::<i32>(0).unwrap_or_default();
        params.set(0, value * 2);
    }

    fn bump_slot(params: &mut ParamList) {
        let value = params.get::<i32>(0).unwrap_or_default();
        params.set(0, value + 1);
    }

    fn shape() -> Shape {
        Shape::procedure(vec![TypeCode::Int32]).unwrap()
    }

    #[test]
    fn emit_runs_handlers_in_connection_order() {
        let mut signal = Signal::new(shape());
        signal.connect(double_slot);
        signal.connect(bump_slot);
        let mut params = ParamList::of::<(), _>((3i32,)).unwrap();
        signal.emit(&mut params);
        assert_eq!(params.get::<i32>(0), Some(7));
    }

    #[test]
    fn emit_with_mismatched_shape_is_a_no_op() {
        let mut signal = Signal::new(shape());
        signal.connect(bump_slot);
        let mut params = ParamList::of::<(), _>((3i64,)).unwrap();
        signal.emit(&mut params);
        assert_eq!(params.get::<i64>(0), Some(3));
    }

    #[test]
    fn disconnect_removes_one_connection() {
        let mut signal = Signal::new(shape());
        signal.connect(bump_slot);
        signal.connect(bump_slot);
        assert_eq!(signal.connection_count(), 2);
        assert!(signal.disconnect(bump_slot));
        assert_eq!(signal.connection_count(), 1);
        assert!(signal.disconnect(bump_slot));
        assert!(!signal.disconnect(bump_slot));
    }
}
