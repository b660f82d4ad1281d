// ABOUTME: Typed calls for the Marathon endpoints stride consumes.
// ABOUTME: Builds request paths, checks statuses and decodes response bodies.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use super::error::ApiError;
use super::transport::{Method, Response, Transport};
use super::wire::{AppEnvelope, DeploymentRef, OperationResult, RemoteApp, VersionList};
use crate::types::AppId;

const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone)]
pub struct MarathonClient<T> {
    transport: T,
}

impl<T: Transport> MarathonClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        Ok(self.transport.send(method, path, body).await?)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let response = self.send(method, path, body).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(status_error(response))
        }
    }

    /// Fetch an app. `None` when Marathon has no app at this id.
    pub async fn get_app(&self, id: &AppId) -> Result<Option<RemoteApp>, ApiError> {
        let response = self.send(Method::Get, &app_path(id), None).await?;
        if response.status == NOT_FOUND {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(status_error(response));
        }
        let envelope: AppEnvelope = serde_json::from_value(response.body)
            .map_err(|e| ApiError::UnexpectedBody(e.to_string()))?;
        Ok(envelope.app)
    }

    pub async fn create_app(&self, payload: &Map<String, Value>) -> Result<OperationResult, ApiError> {
        let body = Value::Object(payload.clone());
        let response = self.call(Method::Post, "/apps", Some(&body)).await?;
        Ok(OperationResult::new(response.body))
    }

    pub async fn update_app(
        &self,
        id: &AppId,
        payload: &Map<String, Value>,
        force: bool,
    ) -> Result<OperationResult, ApiError> {
        let body = Value::Object(payload.clone());
        let path = format!("{}?force={force}", app_path(id));
        let response = self.call(Method::Put, &path, Some(&body)).await?;
        Ok(OperationResult::new(response.body))
    }

    /// Destroy an app. `None` when it was already gone.
    pub async fn delete_app(&self, id: &AppId) -> Result<Option<OperationResult>, ApiError> {
        let response = self.send(Method::Delete, &app_path(id), None).await?;
        if response.status == NOT_FOUND {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(status_error(response));
        }
        Ok(Some(OperationResult::new(response.body)))
    }

    pub async fn restart_app(&self, id: &AppId, force: bool) -> Result<OperationResult, ApiError> {
        let body = json!({ "force": force });
        let path = format!("{}/restart", app_path(id));
        let response = self.call(Method::Post, &path, Some(&body)).await?;
        Ok(OperationResult::new(response.body))
    }

    pub async fn kill_tasks(&self, id: &AppId) -> Result<OperationResult, ApiError> {
        let path = format!("{}/tasks", app_path(id));
        let response = self.call(Method::Delete, &path, None).await?;
        Ok(OperationResult::new(response.body))
    }

    /// Deployments currently in flight across the cluster.
    pub async fn list_deployments(&self) -> Result<Vec<DeploymentRef>, ApiError> {
        let response = self.call(Method::Get, "/deployments", None).await?;
        let body = response.body;
        // An empty body is normalized to `{}` by the transport.
        if body.as_object().is_some_and(Map::is_empty) {
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|e| ApiError::UnexpectedBody(e.to_string()))
    }

    /// Stored versions of an app, newest first.
    pub async fn app_versions(&self, id: &AppId) -> Result<Vec<DateTime<Utc>>, ApiError> {
        let path = format!("{}/versions", app_path(id));
        let response = self.call(Method::Get, &path, None).await?;
        let list: VersionList = serde_json::from_value(response.body)
            .map_err(|e| ApiError::UnexpectedBody(e.to_string()))?;
        let mut versions = list.versions;
        versions.sort_unstable_by(|a, b| b.cmp(a));
        Ok(versions)
    }

    /// Redeploy a stored version of an app.
    pub async fn rollback_app(
        &self,
        id: &AppId,
        version: &str,
        force: bool,
    ) -> Result<OperationResult, ApiError> {
        let body = json!({ "version": version });
        let path = format!("{}?force={force}", app_path(id));
        let response = self.call(Method::Put, &path, Some(&body)).await?;
        Ok(OperationResult::new(response.body))
    }
}

fn status_error(response: Response) -> ApiError {
    ApiError::Status {
        status: response.status,
        message: response.message,
    }
}

/// `/apps/<segments>` with each segment percent-encoded.
pub fn app_path(id: &AppId) -> String {
    let encoded: Vec<_> = id
        .segments()
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/apps/{}", encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_path_strips_leading_slash() {
        let id = AppId::new("/postgres").unwrap();
        assert_eq!(app_path(&id), "/apps/postgres");
    }

    #[test]
    fn app_path_keeps_group_segments() {
        let id = AppId::new("/prod/web/api").unwrap();
        assert_eq!(app_path(&id), "/apps/prod/web/api");

        let relative = AppId::new("worker").unwrap();
        assert_eq!(app_path(&relative), "/apps/worker");
    }
}
