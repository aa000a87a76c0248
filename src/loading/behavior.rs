use serde::{Deserialize, Serialize};

/// Which intents the list controller generates on its own.
///
/// Configured once by the owner, but may be changed at runtime through
/// `ListController::set_behavior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingBehavior {
    /// Issue `Initial` on first appearance.
    #[serde(default = "default_true")]
    pub initial: bool,
    /// Issue `Page` when the last cell scrolls into view.
    #[serde(default = "default_true")]
    pub paging: bool,
    /// Issue `Appearance` on every subsequent appearance.
    #[serde(default)]
    pub appearance: bool,
    /// Run a recurring timer issuing `Autoupdate` while visible.
    #[serde(default)]
    pub autoupdate: bool,
    /// Keep the auto-update timer running after the list disappears.
    #[serde(default)]
    pub autoupdate_background: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoadingBehavior {
    fn default() -> Self {
        Self {
            initial: true,
            paging: true,
            appearance: false,
            autoupdate: false,
            autoupdate_background: false,
        }
    }
}

impl LoadingBehavior {
    /// No self-generated intents at all.
    pub fn none() -> Self {
        Self {
            initial: false,
            paging: false,
            appearance: false,
            autoupdate: false,
            autoupdate_background: false,
        }
    }

    pub fn with_appearance(mut self) -> Self {
        self.appearance = true;
        self
    }

    pub fn with_autoupdate(mut self) -> Self {
        self.autoupdate = true;
        self
    }

    pub fn with_autoupdate_background(mut self) -> Self {
        self.autoupdate = true;
        self.autoupdate_background = true;
        self
    }

    pub fn without_paging(mut self) -> Self {
        self.paging = false;
        self
    }
}
