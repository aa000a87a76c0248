use serde::{Deserialize, Serialize};

/// Why a list wants to (re)load its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingIntent {
    /// First load after the list appeared.
    Initial,
    /// The list re-appeared on screen.
    Appearance,
    PullToRefresh,
    /// Explicit reload. With `keep_existing_data: false` the list is cleared first.
    Force { keep_existing_data: bool },
    /// Append the given page.
    Page { page_number: u32 },
    /// Periodic refresh from the auto-update timer.
    Autoupdate,
}

impl LoadingIntent {
    pub fn is_page(&self) -> bool {
        matches!(self, LoadingIntent::Page { .. })
    }

    /// Whether results for this intent replace the whole section list
    /// instead of being merged page by page.
    pub fn replaces_content(&self) -> bool {
        matches!(
            self,
            LoadingIntent::Initial | LoadingIntent::Force { .. } | LoadingIntent::PullToRefresh
        )
    }

    /// Whether this intent cancels any in-flight load unconditionally.
    pub fn preempts(&self) -> bool {
        matches!(
            self,
            LoadingIntent::PullToRefresh
                | LoadingIntent::Force {
                    keep_existing_data: false
                }
        )
    }

    /// Whether accepting this intent clears the visible sections before fetching.
    pub fn clears_existing_data(&self) -> bool {
        matches!(
            self,
            LoadingIntent::Force {
                keep_existing_data: false
            }
        )
    }
}
