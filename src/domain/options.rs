//! Facade construction options

use serde::{Deserialize, Serialize};

/// Sentinel uri meaning "let the backend pick its default path".
pub const DEFAULT_URI: &str = "DEFAULT";

/// Options accepted when constructing the facade.
/// All fields are optional to support partial configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Audio resource identifier used by subsequent start commands.
    pub uri: Option<String>,
}

impl PlayerOptions {
    /// Resolve the configured uri, falling back to [`DEFAULT_URI`]
    pub fn uri_or_default(&self) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| DEFAULT_URI.to_string())
    }
}
