//! Reactive state cell holding one module.

use std::sync::{Arc, RwLock, Weak};

use serde_json::Value;

use crate::error::StatehubError;
use crate::store::module::{ModuleHandle, StateModule};
use crate::Result;

type Subscriber<M> = Box<dyn Fn(&M) + Send + Sync>;

/// Thread-safe container for a single module's state.
///
/// Reads go through [`ModuleCell::read`]; mutations go through
/// [`ModuleCell::update`] or [`ModuleCell::try_update`], which notify
/// subscribers after the write lock is released.
pub struct ModuleCell<M> {
    state: Arc<RwLock<M>>,
    subscribers: Arc<RwLock<Vec<Subscriber<M>>>>,
}

impl<M: StateModule> ModuleCell<M> {
    /// Create a cell with the given initial module state.
    pub fn new(initial: M) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Read the state through a closure without cloning.
    pub fn read<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&M) -> R,
    {
        let state = self.state.read().map_err(|_| StatehubError::LockPoisoned)?;
        Ok(f(&state))
    }

    /// Mutate the state through a closure.
    ///
    /// Subscribers are notified after the mutation completes.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut M),
    {
        {
            let mut state = self.state.write().map_err(|_| StatehubError::LockPoisoned)?;
            f(&mut state);
        }
        self.notify()
    }

    /// Mutate the state through a fallible closure.
    ///
    /// The closure's value is passed through on success. Subscribers are
    /// only notified when the mutation succeeds.
    pub fn try_update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut M) -> Result<R>,
    {
        let out = {
            let mut state = self.state.write().map_err(|_| StatehubError::LockPoisoned)?;
            f(&mut state)?
        };
        self.notify()?;
        Ok(out)
    }

    /// Subscribe to state changes.
    ///
    /// The callback runs with the new state after every mutation.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&M) + Send + Sync + 'static,
    {
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.push(Box::new(callback));
        }
    }

    /// Downgrade to a handle that does not keep the cell alive.
    ///
    /// Subscriber callbacks that snapshot a sibling cell must hold a
    /// [`WeakCell`] rather than a clone, so that cells subscribed to
    /// each other can still be dropped.
    pub fn downgrade(&self) -> WeakCell<M> {
        WeakCell {
            state: Arc::downgrade(&self.state),
        }
    }

    fn notify(&self) -> Result<()> {
        let state = self.state.read().map_err(|_| StatehubError::LockPoisoned)?;
        let subscribers = self
            .subscribers
            .read()
            .map_err(|_| StatehubError::LockPoisoned)?;
        for subscriber in subscribers.iter() {
            subscriber(&state);
        }
        Ok(())
    }
}

/// Non-owning handle to a [`ModuleCell`].
pub struct WeakCell<M> {
    state: Weak<RwLock<M>>,
}

impl<M: StateModule> WeakCell<M> {
    /// Snapshot the module's state, or `Null` if the cell was dropped.
    pub fn snapshot(&self) -> Value {
        match self.state.upgrade() {
            Some(state) => state
                .read()
                .map(|state| state.snapshot())
                .unwrap_or(Value::Null),
            None => Value::Null,
        }
    }
}

impl<M> Clone for WeakCell<M> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
        }
    }
}

impl<M: StateModule> ModuleHandle for ModuleCell<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn snapshot(&self) -> Value {
        self.state
            .read()
            .map(|state| state.snapshot())
            .unwrap_or(Value::Null)
    }
}

impl<M> Clone for ModuleCell<M> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}
