//! Rendering visibility toggles.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

/// `[render]` section. Every toggle defaults to shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderOptions {
    #[serde(default = "enabled")]
    pub show_description: bool,

    /// Macro values and variable initializers.
    #[serde(default = "enabled")]
    pub show_initializer: bool,

    #[serde(default = "enabled")]
    pub show_preconditions: bool,

    #[serde(default = "enabled")]
    pub show_postconditions: bool,

    #[serde(default = "enabled")]
    pub show_return: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_description: true,
            show_initializer: true,
            show_preconditions: true,
            show_postconditions: true,
            show_return: true,
        }
    }
}

impl RenderOptions {
    /// Whether nothing is hidden.
    #[must_use]
    pub const fn shows_everything(&self) -> bool {
        self.show_description
            && self.show_initializer
            && self.show_preconditions
            && self.show_postconditions
            && self.show_return
    }
}
