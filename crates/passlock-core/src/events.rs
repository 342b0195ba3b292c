use serde::{Deserialize, Serialize};

/// Lifecycle events delivered to [`LockPresenter::handle`], one at a time.
///
/// [`LockPresenter::handle`]: crate::presenter::LockPresenter::handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    EnteredBackground,
    FinishedLaunching,
    BecameActive,
    /// The lock UI accepted the entered secret.
    SecretAccepted,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnteredBackground => "background",
            Self::FinishedLaunching => "launch",
            Self::BecameActive => "active",
            Self::SecretAccepted => "accept",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "background" => Some(Self::EnteredBackground),
            "launch" => Some(Self::FinishedLaunching),
            "active" => Some(Self::BecameActive),
            "accept" => Some(Self::SecretAccepted),
            _ => None,
        }
    }
}

impl std::fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
