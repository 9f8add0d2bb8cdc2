//! Asset-load bookkeeping and the loading-screen state.
//!
//! The external loader reports each resource through this tracker. A failed
//! resource only degrades visuals: it counts as settled, is logged, and the
//! map keeps running.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// What the loading overlay should be doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingScreen {
    /// Shown while resources are outstanding.
    #[default]
    Visible,
    /// Every resource settled; the fade-out transition is running.
    FadingOut,
    /// The fade-out finished and the element is gone.
    Removed,
}

/// Per-resource load status.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceStatus {
    /// Still loading; `loaded` / `total` bytes as last reported.
    Pending {
        /// Bytes received.
        loaded: u64,
        /// Expected size, 0 if unknown.
        total: u64,
    },
    /// Finished successfully.
    Loaded,
    /// Failed with the loader's message.
    Failed(String),
}

impl ResourceStatus {
    fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending { .. })
    }
}

/// Counts outstanding loads and drives the loading screen.
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    resources: FxHashMap<String, ResourceStatus>,
    screen: LoadingScreen,
}

impl LoadingTracker {
    /// Tracker with nothing registered and the loading screen visible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource the loader has started fetching.
    pub fn begin(&mut self, resource: &str) {
        log::debug!("loading '{resource}'");
        let _ = self.resources.insert(
            resource.to_owned(),
            ResourceStatus::Pending {
                loaded: 0,
                total: 0,
            },
        );
    }

    /// Record download progress. Unknown resources are registered on the
    /// fly.
    pub fn progress(&mut self, resource: &str, loaded: u64, total: u64) {
        let status = self
            .resources
            .entry(resource.to_owned())
            .or_insert(ResourceStatus::Pending { loaded, total });
        if let ResourceStatus::Pending {
            loaded: l,
            total: t,
        } = status
        {
            *l = loaded;
            *t = total;
        }
    }

    /// Mark a resource as loaded.
    pub fn complete(&mut self, resource: &str) {
        log::info!("loaded '{resource}'");
        let _ = self
            .resources
            .insert(resource.to_owned(), ResourceStatus::Loaded);
        self.check_settled();
    }

    /// Mark a resource as failed. The scene keeps whatever already loaded.
    pub fn fail(&mut self, resource: &str, reason: &str) {
        log::warn!("failed to load '{resource}': {reason}");
        let _ = self.resources.insert(
            resource.to_owned(),
            ResourceStatus::Failed(reason.to_owned()),
        );
        self.check_settled();
    }

    /// The fade-out transition ended.
    pub fn transition_end(&mut self) {
        if self.screen == LoadingScreen::FadingOut {
            self.screen = LoadingScreen::Removed;
        }
    }

    /// Current loading-screen state.
    #[must_use]
    pub fn screen(&self) -> LoadingScreen {
        self.screen
    }

    /// Status of one resource.
    #[must_use]
    pub fn status(&self, resource: &str) -> Option<&ResourceStatus> {
        self.resources.get(resource)
    }

    /// Number of resources still loading.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.resources.values().filter(|s| !s.is_settled()).count()
    }

    /// Resources that failed, with their messages.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.resources.iter().filter_map(|(name, s)| match s {
            ResourceStatus::Failed(reason) => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Overall byte progress over resources with a known size, in [0, 1].
    #[must_use]
    pub fn fraction(&self) -> f32 {
        let (mut loaded, mut total) = (0_u64, 0_u64);
        for status in self.resources.values() {
            match status {
                ResourceStatus::Pending { loaded: l, total: t } if *t > 0 => {
                    loaded = loaded.saturating_add((*l).min(*t));
                    total = total.saturating_add(*t);
                }
                ResourceStatus::Pending { .. } => {}
                ResourceStatus::Loaded | ResourceStatus::Failed(_) => {
                    loaded = loaded.saturating_add(1);
                    total = total.saturating_add(1);
                }
            }
        }
        if total == 0 {
            0.0
        } else {
            loaded as f32 / total as f32
        }
    }

    fn check_settled(&mut self) {
        if self.screen == LoadingScreen::Visible && self.outstanding() == 0 {
            let failed = self.failures().count();
            log::info!(
                "all {} resources settled ({failed} failed), hiding loading screen",
                self.resources.len()
            );
            self.screen = LoadingScreen::FadingOut;
        }
    }
}
