use crate::shared::errors::AppError;
use serde::Serialize;

/// Lifecycle of one async resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::Idle => write!(f, "idle"),
            ResourceStatus::Loading => write!(f, "loading"),
            ResourceStatus::Succeeded => write!(f, "succeeded"),
            ResourceStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Observable snapshot of a resource
///
/// `data` survives a refresh and a failure so consumers can keep rendering
/// the last good value; only `reset` clears it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub status: ResourceStatus,
    pub error: Option<AppError>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: ResourceStatus::Idle,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == ResourceStatus::Loading
    }

    pub(crate) fn begin_loading(&mut self) {
        self.status = ResourceStatus::Loading;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.status = ResourceStatus::Succeeded;
    }

    pub(crate) fn fail(&mut self, error: AppError) {
        self.error = Some(error);
        self.status = ResourceStatus::Failed;
    }

    /// Leave `Loading` without a result (the run was abandoned)
    pub(crate) fn abandon(&mut self) {
        if self.is_loading() {
            self.status = if self.data.is_some() {
                ResourceStatus::Succeeded
            } else {
                ResourceStatus::Idle
            };
        }
    }
}
