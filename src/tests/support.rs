//! Fakes shared by the controller tests: an in-memory backend that records
//! every call and a shell that records every request.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::catalog::{default_action_types, default_trigger_types};
use crate::command_executors::EditorController;
use crate::models::{
    ActionType, FormTrigger, StoredCredential, WorkflowDocument, WorkflowSummary,
};
use crate::network::{ApiError, BackendApi};
use crate::session::Session;
use crate::shell::{Shell, ToastKind};

#[derive(Debug, Clone)]
pub enum ApiCall {
    FetchCatalog,
    FetchWorkflow(String),
    FetchCredentials,
    CreateWorkflow(WorkflowDocument),
    UpdateWorkflow {
        workflow_id: String,
        document: WorkflowDocument,
    },
    Execute(String),
    SaveCredential {
        platform: String,
        title: String,
    },
    OAuthAuthorize(String),
    CreateFormTrigger {
        workflow_id: Option<String>,
    },
}

#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<ApiCall>>,
    /// Document served for `fetch_workflow`.
    pub stored_workflow: RefCell<Option<WorkflowDocument>>,
    pub credentials: RefCell<Vec<StoredCredential>>,
    pub fail_saves: Cell<bool>,
    created: Cell<u32>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ApiCall::CreateWorkflow(_)))
            .count()
    }

    pub fn update_calls(&self) -> Vec<(String, WorkflowDocument)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ApiCall::UpdateWorkflow {
                    workflow_id,
                    document,
                } => Some((workflow_id.clone(), document.clone())),
                _ => None,
            })
            .collect()
    }

    fn fail_if_requested(&self) -> Result<(), ApiError> {
        if self.fail_saves.get() {
            Err(ApiError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl BackendApi for FakeApi {
    fn fetch_trigger_types(&self, _token: &str) -> Result<Vec<ActionType>, ApiError> {
        self.calls.borrow_mut().push(ApiCall::FetchCatalog);
        Ok(default_trigger_types())
    }

    fn fetch_action_types(&self, _token: &str) -> Result<Vec<ActionType>, ApiError> {
        Ok(default_action_types())
    }

    fn fetch_workflow(
        &self,
        _token: &str,
        workflow_id: &str,
    ) -> Result<WorkflowDocument, ApiError> {
        self.calls
            .borrow_mut()
            .push(ApiCall::FetchWorkflow(workflow_id.to_string()));
        self.stored_workflow
            .borrow()
            .clone()
            .ok_or(ApiError::Http {
                status: 404,
                message: "no such workflow".to_string(),
            })
    }

    fn create_workflow(
        &self,
        _token: &str,
        document: &WorkflowDocument,
    ) -> Result<String, ApiError> {
        self.calls
            .borrow_mut()
            .push(ApiCall::CreateWorkflow(document.clone()));
        self.fail_if_requested()?;
        let n = self.created.get() + 1;
        self.created.set(n);
        Ok(format!("wf-{n}"))
    }

    fn update_workflow(
        &self,
        _token: &str,
        workflow_id: &str,
        document: &WorkflowDocument,
    ) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(ApiCall::UpdateWorkflow {
            workflow_id: workflow_id.to_string(),
            document: document.clone(),
        });
        self.fail_if_requested()
    }

    fn delete_workflow(&self, _token: &str, _workflow_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn execute_workflow(&self, _token: &str, workflow_id: &str) -> Result<(), ApiError> {
        self.calls
            .borrow_mut()
            .push(ApiCall::Execute(workflow_id.to_string()));
        Ok(())
    }

    fn list_workflows(&self, _token: &str) -> Result<Vec<WorkflowSummary>, ApiError> {
        Ok(Vec::new())
    }

    fn list_credentials(&self, _token: &str) -> Result<Vec<StoredCredential>, ApiError> {
        self.calls.borrow_mut().push(ApiCall::FetchCredentials);
        Ok(self.credentials.borrow().clone())
    }

    fn save_credential(
        &self,
        _token: &str,
        platform: &str,
        title: &str,
        _data: &BTreeMap<String, String>,
    ) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(ApiCall::SaveCredential {
            platform: platform.to_string(),
            title: title.to_string(),
        });
        self.fail_if_requested()?;
        self.credentials.borrow_mut().push(StoredCredential {
            id: format!("cred-{platform}"),
            platform: platform.to_string(),
            title: title.to_string(),
            created_at: None,
        });
        Ok(())
    }

    fn delete_credential(&self, _token: &str, _credential_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn oauth_authorize_url(&self, _token: &str, platform: &str) -> Result<String, ApiError> {
        self.calls
            .borrow_mut()
            .push(ApiCall::OAuthAuthorize(platform.to_string()));
        Ok(format!("https://accounts.example/{platform}/consent"))
    }

    fn create_form_trigger(
        &self,
        _token: &str,
        workflow_id: Option<&str>,
        _trigger_type: &str,
    ) -> Result<FormTrigger, ApiError> {
        self.calls.borrow_mut().push(ApiCall::CreateFormTrigger {
            workflow_id: workflow_id.map(str::to_string),
        });
        Ok(FormTrigger {
            form_id: "form-7".to_string(),
            webhook_url: "https://api.example/webhooks/form-7".to_string(),
            form_url: "https://app.example/forms/form-7".to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingShell {
    pub toasts: Vec<(ToastKind, String)>,
    pub urls: Vec<String>,
    pub navigations: Vec<String>,
    pub form_urls: Vec<String>,
}

impl Shell for RecordingShell {
    fn toast(&mut self, kind: ToastKind, message: &str) {
        self.toasts.push((kind, message.to_string()));
    }

    fn set_workflow_url(&mut self, workflow_id: &str) {
        self.urls.push(workflow_id.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn show_form_url(&mut self, url: &str) {
        self.form_urls.push(url.to_string());
    }
}

pub fn controller() -> EditorController<FakeApi, RecordingShell> {
    EditorController::new(
        Session::with_token("test-token"),
        FakeApi::default(),
        RecordingShell::default(),
    )
}

/// Look up a built-in catalog descriptor by type id.
pub fn descriptor(type_id: &str) -> ActionType {
    default_trigger_types()
        .into_iter()
        .chain(default_action_types())
        .find(|t| t.id == type_id)
        .unwrap_or_else(|| panic!("unknown built-in type {type_id}"))
}
