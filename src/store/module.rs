//! Module registration contract.

use serde_json::{Map, Value};

/// Contract a state module satisfies to be registered into a store.
///
/// A module owns its state, mutation operations, and derived values.
/// The store only relies on the module's unique name and its ability
/// to serialize the current state.
pub trait StateModule: Send + Sync + 'static {
    /// Name the module's state is exposed under. Must be unique within
    /// a store.
    const NAME: &'static str;

    /// Serialize the module's current state.
    fn snapshot(&self) -> Value;
}

/// Object-safe view of a registered module.
///
/// Implemented by the store's module cells so composed-state assembly
/// does not depend on the concrete module types.
pub trait ModuleHandle: Send + Sync {
    /// The name the module was registered under.
    fn name(&self) -> &'static str;

    /// The module's current state as JSON.
    fn snapshot(&self) -> Value;
}

/// Compose the state of several modules into a single JSON object keyed
/// by module name.
pub fn compose_state<'a, I>(modules: I) -> Value
where
    I: IntoIterator<Item = &'a dyn ModuleHandle>,
{
    let mut composed = Map::new();
    for module in modules {
        composed.insert(module.name().to_string(), module.snapshot());
    }
    Value::Object(composed)
}
