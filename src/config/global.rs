//! Process-wide default configuration.
//!
//! Clients built without an explicit configuration deep-clone whatever is
//! stored here at construction time. Later changes to the default never reach
//! existing clients.

use arc_swap::ArcSwapOption;
use std::sync::Arc;

use crate::config::schema::AutologConfig;

static GLOBAL_CONFIGURATION: ArcSwapOption<AutologConfig> = ArcSwapOption::const_empty();

pub fn set_global_configuration(config: AutologConfig) {
    GLOBAL_CONFIGURATION.store(Some(Arc::new(config)));
}

pub fn clear_global_configuration() {
    GLOBAL_CONFIGURATION.store(None);
}

pub fn global_configuration() -> Option<Arc<AutologConfig>> {
    GLOBAL_CONFIGURATION.load_full()
}

/// A private copy of the global default, or the built-in default.
pub fn configuration_from_global() -> AutologConfig {
    global_configuration()
        .map(|config| config.as_ref().clone())
        .unwrap_or_default()
}
