//! Signal Module - Listener registries for controller notifications
//!
//! Each notification a controller emits has its own [`Listeners`] registry
//! with a typed handler signature. Handlers are identified by a [`HandlerId`]
//! so they can be disconnected later; ids are never reused within a registry.
//!
//! Emission is done by the owner iterating the registry under a shared
//! borrow, so handlers may re-enter the controller (e.g. to forward the
//! current event). Boolean-returning notifications aggregate with
//! "first `true` wins": once a handler reports handled, the rest are
//! not invoked.

/// Identifies a connected handler within one registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

/// An ordered set of handlers for one notification.
pub struct Listeners<F> {
    handlers: Vec<(HandlerId, F)>,
    next_id: usize,
}

impl<F> Listeners<F> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Connect a handler. Handlers fire in connection order.
    pub fn add(&mut self, handler: F) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Disconnect a handler. Returns false if the id was already removed.
    pub fn remove(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Iterate handlers in connection order.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.handlers.iter().map(|(_, handler)| handler)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<F> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
