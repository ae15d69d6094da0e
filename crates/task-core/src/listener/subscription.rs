use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::TaskListener;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Rc<dyn TaskListener>)>,
}

/// Conjunto de listeners registrados. Monohilo: el motor no hace locking.
#[derive(Default, Clone)]
pub struct ListenerSet {
    registry: Rc<RefCell<Registry>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Rc<dyn TaskListener>) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        Subscription { registry: Rc::downgrade(&self.registry),
                       id }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoca `f` sobre una copia de la lista, de modo que un listener puede
    /// suscribir o soltar suscripciones durante la notificación.
    pub fn notify(&self, f: impl Fn(&dyn TaskListener)) {
        let listeners: Vec<Rc<dyn TaskListener>> =
            self.registry.borrow().listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            f(listener.as_ref());
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}

/// Guardia de suscripción: al soltarse desregistra su listener.
#[must_use = "dropping the subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    /// `false` si el conjunto de listeners ya no existe.
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else { return false };
        let active = registry.borrow().listeners.iter().any(|(id, _)| *id == self.id);
        active
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
