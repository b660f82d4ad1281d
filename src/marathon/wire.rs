// ABOUTME: Response shapes returned by the Marathon REST API.
// ABOUTME: Remote app state, deployment references and mutating-call results.

use nonempty::NonEmpty;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{DeploymentId, TaskId};

/// A deployment as it appears embedded in an app or in `/v2/deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentRef {
    pub id: DeploymentId,
}

/// Marathon's current view of an app.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteApp {
    pub id: String,

    #[serde(default)]
    pub deployments: Vec<DeploymentRef>,

    #[serde(default)]
    pub instances: Option<u32>,

    #[serde(default)]
    pub tasks_running: Option<u32>,

    #[serde(default)]
    pub tasks_healthy: Option<u32>,

    #[serde(default)]
    pub version: Option<String>,
}

impl RemoteApp {
    /// An app with in-flight deployments cannot be updated in place.
    pub fn is_mid_deployment(&self) -> bool {
        !self.deployments.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppEnvelope {
    #[serde(default)]
    pub app: Option<RemoteApp>,
}

/// Response to a mutating call.
///
/// Keeps the raw JSON so it can be handed back to the caller verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    raw: Value,
}

impl OperationResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// The single `deploymentId` returned by update and delete.
    pub fn deployment_id(&self) -> Option<DeploymentId> {
        self.raw
            .get("deploymentId")
            .and_then(Value::as_str)
            .map(DeploymentId::new)
    }

    /// The `deployments[].id` list returned by create, restart and kill.
    pub fn deployment_ids(&self) -> Option<NonEmpty<DeploymentId>> {
        let ids = self
            .raw
            .get("deployments")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|d| d.get("id").and_then(Value::as_str))
                    .map(DeploymentId::new)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        NonEmpty::from_vec(ids)
    }

    /// The deployment to wait on, whichever shape the server used.
    pub fn first_deployment(&self) -> Option<DeploymentId> {
        self.deployment_ids()
            .map(|ids| ids.head)
            .or_else(|| self.deployment_id())
    }

    /// Tasks listed in a kill response.
    pub fn tasks(&self) -> Vec<TaskId> {
        self.raw
            .get("tasks")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|t| t.get("id").and_then(Value::as_str))
                    .map(TaskId::new)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionList {
    #[serde(default)]
    pub versions: Vec<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deployment_id_reads_single_id() {
        let result = OperationResult::new(json!({"deploymentId": "d-1", "version": "v"}));
        assert_eq!(result.deployment_id(), Some(DeploymentId::new("d-1")));
        assert!(result.deployment_ids().is_none());
        assert_eq!(result.first_deployment(), Some(DeploymentId::new("d-1")));
    }

    #[test]
    fn deployment_ids_reads_list_in_order() {
        let result = OperationResult::new(json!({
            "deployments": [{"id": "d-1"}, {"id": "d-2"}]
        }));
        let ids = result.deployment_ids().unwrap();
        assert_eq!(ids.head, DeploymentId::new("d-1"));
        assert_eq!(ids.len(), 2);
        assert_eq!(result.first_deployment(), Some(DeploymentId::new("d-1")));
    }

    #[test]
    fn empty_result_has_no_deployment() {
        let result = OperationResult::new(json!({}));
        assert!(result.first_deployment().is_none());
        assert!(result.tasks().is_empty());

        let result = OperationResult::new(json!({"deployments": []}));
        assert!(result.first_deployment().is_none());
    }

    #[test]
    fn remote_app_mid_deployment() {
        let app: RemoteApp = serde_json::from_value(json!({
            "id": "/web",
            "instances": 2,
            "tasksRunning": 1,
            "deployments": [{"id": "d-9"}]
        }))
        .unwrap();
        assert!(app.is_mid_deployment());
        assert_eq!(app.tasks_running, Some(1));

        let idle: RemoteApp = serde_json::from_value(json!({"id": "/web"})).unwrap();
        assert!(!idle.is_mid_deployment());
    }
}
