//! The composed application store.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use tracing::info;

use crate::config::Config;
use crate::drawer::DrawerState;
use crate::session::SessionState;
use crate::store::cell::ModuleCell;
use crate::store::module::{compose_state, ModuleHandle, StateModule};

/// One-time global activation: install the tracing subscriber.
///
/// Safe to call any number of times; only the first call has an effect.
pub fn activate() {
    let _ = crate::logging::try_init();
}

/// Application-wide state container.
///
/// One cell per registered module; the composed state is the union of
/// the modules' snapshots keyed by module name. The container itself
/// holds no state beyond its modules.
pub struct AppStore {
    /// User accounts and authenticated sessions.
    pub session: ModuleCell<SessionState>,
    /// Navigation drawer UI state.
    pub drawer: ModuleCell<DrawerState>,
}

impl AppStore {
    /// Build a store from configuration.
    pub fn new(config: &Config) -> Self {
        let session = SessionState::new(config.session.ttl())
            .with_kdf_rounds(config.session.kdf_rounds);
        let drawer = DrawerState::new(config.drawer.start_open, config.drawer.start_pinned);

        info!("state container initialized");
        Self {
            session: ModuleCell::new(session),
            drawer: ModuleCell::new(drawer),
        }
    }

    /// The process-wide store instance.
    ///
    /// The store is constructed on first call, after activation, from
    /// defaults overlaid with environment variables. Every call returns
    /// a handle to the same instance.
    pub fn global() -> Arc<AppStore> {
        static STORE: OnceLock<Arc<AppStore>> = OnceLock::new();

        STORE
            .get_or_init(|| {
                let mut config = Config::default();
                config.apply_env();
                let _ = crate::logging::try_init_with(config.log_filter());
                Arc::new(AppStore::new(&config))
            })
            .clone()
    }

    fn modules(&self) -> [&dyn ModuleHandle; 2] {
        [&self.session, &self.drawer]
    }

    /// Names of the registered modules, in registration order.
    pub fn namespaces(&self) -> Vec<&'static str> {
        self.modules().iter().map(|m| m.name()).collect()
    }

    /// The composed application state, keyed by module name.
    pub fn state(&self) -> Value {
        compose_state(self.modules())
    }

    /// Subscribe to the composed state.
    ///
    /// The callback runs with the full composed state after any module
    /// mutation.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);

        // Each cell's notifier snapshots the sibling through a weak
        // handle; a clone here would tie the two cells' lifetimes
        // together through their subscriber lists.
        let drawer = self.drawer.downgrade();
        let on_session = Arc::clone(&callback);
        self.session.subscribe(move |session| {
            let mut composed = Map::new();
            composed.insert(SessionState::NAME.to_string(), session.snapshot());
            composed.insert(DrawerState::NAME.to_string(), drawer.snapshot());
            on_session(&Value::Object(composed));
        });

        let session = self.session.downgrade();
        let on_drawer = Arc::clone(&callback);
        self.drawer.subscribe(move |drawer| {
            let mut composed = Map::new();
            composed.insert(SessionState::NAME.to_string(), session.snapshot());
            composed.insert(DrawerState::NAME.to_string(), drawer.snapshot());
            on_drawer(&Value::Object(composed));
        });
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.session.kdf_rounds = 64;
        config
    }

    #[test]
    fn test_namespaces() {
        let store = AppStore::new(&test_config());
        assert_eq!(store.namespaces(), ["session", "drawer"]);
    }

    #[test]
    fn test_state_is_union_of_modules() {
        let store = AppStore::new(&test_config());
        let state = store.state();

        let keys: Vec<&String> = state.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(state.get("session").is_some());
        assert!(state.get("drawer").is_some());

        assert_eq!(state["drawer"], json!({"open": false, "pinned": false}));
        assert!(state["session"]["users"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_config_shapes_initial_state() {
        let mut config = test_config();
        config.drawer.start_open = true;
        config.drawer.start_pinned = true;

        let store = AppStore::new(&config);
        assert_eq!(store.state()["drawer"]["open"], true);
        assert_eq!(store.state()["drawer"]["pinned"], true);
    }

    #[test]
    fn test_mutations_visible_in_composed_state() {
        let store = AppStore::new(&test_config());

        store.drawer.update(|d| d.toggle()).unwrap();
        assert_eq!(store.state()["drawer"]["open"], true);
    }

    #[test]
    fn test_global_returns_same_instance() {
        let a = AppStore::global();
        let b = AppStore::global();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_activate_idempotent() {
        activate();
        activate();

        // Store still behaves normally after repeat activation
        let store = AppStore::new(&test_config());
        assert_eq!(store.namespaces(), ["session", "drawer"]);
    }
}
