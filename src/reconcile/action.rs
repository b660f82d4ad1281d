// ABOUTME: Chooses the Marathon operation(s) for a requested state.
// ABOUTME: Pure decision over the requested state and the looked-up remote app.

use std::fmt;

use super::state::TargetState;
use crate::marathon::RemoteApp;

/// What the reconciler will do to reach the requested state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// POST a new app built from the full spec.
    Create,
    /// PUT the merged spec onto the existing app.
    Update,
    /// DELETE the app, then POST it again.
    ///
    /// Chosen when the app has in-flight deployments, which are assumed stuck.
    /// A deployment started between the lookup and the delete is destroyed as
    /// well; Marathon offers no compare-and-swap to close that window.
    Replace,
    /// DELETE the app.
    Destroy,
    /// POST the restart action.
    Restart,
    /// DELETE the app's running tasks.
    Kill,
}

impl Action {
    /// Select the action for `state`.
    ///
    /// `remote` is only consulted for `present`; the other states act on the
    /// app id directly without a lookup.
    pub fn select(state: TargetState, remote: Option<&RemoteApp>) -> Self {
        match state {
            TargetState::Present => match remote {
                None => Action::Create,
                Some(app) if app.is_mid_deployment() => Action::Replace,
                Some(_) => Action::Update,
            },
            TargetState::Absent => Action::Destroy,
            TargetState::Restart => Action::Restart,
            TargetState::Kill => Action::Kill,
        }
    }

    /// Whether selecting this action needs the current remote app.
    pub fn needs_lookup(state: TargetState) -> bool {
        state == TargetState::Present
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Replace => "replace",
            Action::Destroy => "destroy",
            Action::Restart => "restart",
            Action::Kill => "kill",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marathon::DeploymentRef;
    use crate::types::DeploymentId;

    fn remote(deployments: &[&str]) -> RemoteApp {
        RemoteApp {
            id: "/web".to_string(),
            deployments: deployments
                .iter()
                .map(|id| DeploymentRef {
                    id: DeploymentId::new(*id),
                })
                .collect(),
            instances: Some(1),
            tasks_running: Some(1),
            tasks_healthy: None,
            version: None,
        }
    }

    #[test]
    fn present_without_app_creates() {
        assert_eq!(Action::select(TargetState::Present, None), Action::Create);
    }

    #[test]
    fn present_with_idle_app_updates() {
        let app = remote(&[]);
        assert_eq!(
            Action::select(TargetState::Present, Some(&app)),
            Action::Update
        );
    }

    #[test]
    fn present_with_deploying_app_replaces() {
        let app = remote(&["d-1"]);
        assert_eq!(
            Action::select(TargetState::Present, Some(&app)),
            Action::Replace
        );
    }

    #[test]
    fn other_states_ignore_remote() {
        let app = remote(&["d-1"]);
        for remote in [None, Some(&app)] {
            assert_eq!(Action::select(TargetState::Absent, remote), Action::Destroy);
            assert_eq!(Action::select(TargetState::Restart, remote), Action::Restart);
            assert_eq!(Action::select(TargetState::Kill, remote), Action::Kill);
        }
    }

    #[test]
    fn only_present_needs_lookup() {
        assert!(Action::needs_lookup(TargetState::Present));
        assert!(!Action::needs_lookup(TargetState::Absent));
        assert!(!Action::needs_lookup(TargetState::Restart));
        assert!(!Action::needs_lookup(TargetState::Kill));
    }
}
