//! REST client for the workflow backend.
//!
//! `BackendApi` is the seam the controller talks through; `HttpApiClient`
//! is the real implementation over `ureq`. Every call carries the bearer
//! token handed in by the session; the client itself holds no auth state.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use super::config::ApiConfig;
use crate::models::{ActionType, FormTrigger, StoredCredential, WorkflowDocument, WorkflowSummary};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// User-facing wording for a toast, keyed off the HTTP status.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Please sign in and try again.".to_string(),
            ApiError::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Http { status, .. } => match status {
                409 => "That name is already taken. Please choose a different name.".to_string(),
                400 | 422 => "Invalid input. Please check your data and try again.".to_string(),
                403 => "You don't have permission to perform this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                500..=599 => "Server error. Please try again later.".to_string(),
                _ => "An unexpected error occurred. Please try again.".to_string(),
            },
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response.into_string().unwrap_or_default();
            ApiError::Http { status, message }
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
    response
        .into_json::<T>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Backend contract consumed by the editor core. Implementations must not
/// retry internally; the reconciliation policy lives in the controller.
pub trait BackendApi {
    fn fetch_trigger_types(&self, token: &str) -> Result<Vec<ActionType>, ApiError>;
    fn fetch_action_types(&self, token: &str) -> Result<Vec<ActionType>, ApiError>;

    fn fetch_workflow(&self, token: &str, workflow_id: &str)
        -> Result<WorkflowDocument, ApiError>;
    fn create_workflow(&self, token: &str, document: &WorkflowDocument)
        -> Result<String, ApiError>;
    fn update_workflow(
        &self,
        token: &str,
        workflow_id: &str,
        document: &WorkflowDocument,
    ) -> Result<(), ApiError>;
    fn delete_workflow(&self, token: &str, workflow_id: &str) -> Result<(), ApiError>;
    fn execute_workflow(&self, token: &str, workflow_id: &str) -> Result<(), ApiError>;
    fn list_workflows(&self, token: &str) -> Result<Vec<WorkflowSummary>, ApiError>;

    fn list_credentials(&self, token: &str) -> Result<Vec<StoredCredential>, ApiError>;
    fn save_credential(
        &self,
        token: &str,
        platform: &str,
        title: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<(), ApiError>;
    fn delete_credential(&self, token: &str, credential_id: &str) -> Result<(), ApiError>;

    fn oauth_authorize_url(&self, token: &str, platform: &str) -> Result<String, ApiError>;
    fn create_form_trigger(
        &self,
        token: &str,
        workflow_id: Option<&str>,
        trigger_type: &str,
    ) -> Result<FormTrigger, ApiError>;
}

pub struct HttpApiClient {
    config: ApiConfig,
}

#[derive(Deserialize)]
struct CreatedOut {
    id: String,
}

#[derive(Deserialize)]
struct AuthUrlOut {
    auth_url: String,
}

#[derive(Deserialize)]
struct FormTriggerOut {
    #[serde(rename = "formId")]
    form_id: String,
    #[serde(rename = "webhookUrl")]
    webhook_url: String,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        HttpApiClient { config }
    }

    fn get(&self, token: &str, path: &str) -> Result<ureq::Response, ApiError> {
        ureq::get(&self.config.api_url(path))
            .set("Authorization", &format!("Bearer {token}"))
            .call()
            .map_err(map_ureq_error)
    }

    fn send_json(
        &self,
        method: &str,
        token: &str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<ureq::Response, ApiError> {
        ureq::request(method, &self.config.api_url(path))
            .set("Authorization", &format!("Bearer {token}"))
            .send_json(body)
            .map_err(map_ureq_error)
    }

    fn delete(&self, token: &str, path: &str) -> Result<(), ApiError> {
        ureq::delete(&self.config.api_url(path))
            .set("Authorization", &format!("Bearer {token}"))
            .call()
            .map_err(map_ureq_error)?;
        Ok(())
    }
}

impl BackendApi for HttpApiClient {
    fn fetch_trigger_types(&self, token: &str) -> Result<Vec<ActionType>, ApiError> {
        decode(self.get(token, "/workflow/trigger-types")?)
    }

    fn fetch_action_types(&self, token: &str) -> Result<Vec<ActionType>, ApiError> {
        decode(self.get(token, "/workflow/action-types")?)
    }

    fn fetch_workflow(
        &self,
        token: &str,
        workflow_id: &str,
    ) -> Result<WorkflowDocument, ApiError> {
        decode(self.get(token, &format!("/workflow/{workflow_id}"))?)
    }

    fn create_workflow(
        &self,
        token: &str,
        document: &WorkflowDocument,
    ) -> Result<String, ApiError> {
        let response = self.send_json(
            "POST",
            token,
            "/workflow/create",
            serde_json::to_value(document).map_err(|e| ApiError::Decode(e.to_string()))?,
        )?;
        Ok(decode::<CreatedOut>(response)?.id)
    }

    fn update_workflow(
        &self,
        token: &str,
        workflow_id: &str,
        document: &WorkflowDocument,
    ) -> Result<(), ApiError> {
        self.send_json(
            "PUT",
            token,
            &format!("/workflow/{workflow_id}"),
            serde_json::to_value(document).map_err(|e| ApiError::Decode(e.to_string()))?,
        )?;
        Ok(())
    }

    fn delete_workflow(&self, token: &str, workflow_id: &str) -> Result<(), ApiError> {
        self.delete(token, &format!("/workflow/{workflow_id}"))
    }

    fn execute_workflow(&self, token: &str, workflow_id: &str) -> Result<(), ApiError> {
        self.send_json(
            "POST",
            token,
            &format!("/workflow/{workflow_id}/execute"),
            json!({}),
        )?;
        Ok(())
    }

    fn list_workflows(&self, token: &str) -> Result<Vec<WorkflowSummary>, ApiError> {
        decode(self.get(token, "/workflow?skip=0&limit=100")?)
    }

    fn list_credentials(&self, token: &str) -> Result<Vec<StoredCredential>, ApiError> {
        decode(self.get(token, "/creds")?)
    }

    fn save_credential(
        &self,
        token: &str,
        platform: &str,
        title: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        self.send_json(
            "POST",
            token,
            "/creds/save",
            json!({
                "title": title,
                "platform": platform,
                "data": data,
            }),
        )?;
        Ok(())
    }

    fn delete_credential(&self, token: &str, credential_id: &str) -> Result<(), ApiError> {
        self.delete(token, &format!("/creds/{credential_id}"))
    }

    fn oauth_authorize_url(&self, token: &str, platform: &str) -> Result<String, ApiError> {
        let response = self.get(token, &format!("/oauth/{platform}/authorize"))?;
        Ok(decode::<AuthUrlOut>(response)?.auth_url)
    }

    fn create_form_trigger(
        &self,
        token: &str,
        workflow_id: Option<&str>,
        trigger_type: &str,
    ) -> Result<FormTrigger, ApiError> {
        let response = self.send_json(
            "POST",
            token,
            "/create-form-trigger",
            json!({
                "workflowId": workflow_id,
                "triggerType": trigger_type,
            }),
        )?;
        let out: FormTriggerOut = decode(response)?;
        let form_url = self.config.form_url(&out.form_id);
        Ok(FormTrigger {
            form_id: out.form_id,
            webhook_url: out.webhook_url,
            form_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_follow_status_classes() {
        let conflict = ApiError::Http {
            status: 409,
            message: String::new(),
        };
        assert!(conflict.user_message().contains("already taken"));

        let server = ApiError::Http {
            status: 503,
            message: String::new(),
        };
        assert!(server.user_message().contains("Server error"));

        let offline = ApiError::Transport("dns".into());
        assert!(offline.user_message().contains("Could not reach"));
    }
}
