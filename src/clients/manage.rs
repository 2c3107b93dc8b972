//! Project management (`/v1/projects`).

use std::sync::Arc;

use crate::defaults::paths;
use crate::error::DeepgramError;
use crate::execution::{RequestBody, RestClient};
use crate::models::manage::{
    CreatedKey, KeyResponse, KeySchema, KeysResponse, MemberScopeSchema, MembersResponse,
    MessageResponse, Project, ProjectSchema, ProjectsResponse, ScopesResponse, UsageRequest,
};
use crate::query::QueryString;
use crate::types::CallOptions;

#[derive(Debug, Clone)]
pub struct ManageClient {
    rest: Arc<RestClient>,
}

/// `/v1/projects/{project_id}/{tail...}` with the id percent-encoded.
fn project_path(project_id: &str, tail: &[&str]) -> Result<String, DeepgramError> {
    let mut path = format!("{}/{}", paths::PROJECTS, encode_id("project_id", project_id)?);
    for segment in tail {
        path.push('/');
        path.push_str(segment);
    }
    Ok(path)
}

impl ManageClient {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    pub async fn get_projects(&self, call: &CallOptions) -> Result<ProjectsResponse, DeepgramError> {
        self.rest.get(paths::PROJECTS, &QueryString::new(), call).await
    }

    pub async fn get_project(
        &self,
        project_id: &str,
        call: &CallOptions,
    ) -> Result<Project, DeepgramError> {
        let path = project_path(project_id, &[])?;
        self.rest.get(&path, &QueryString::new(), call).await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        schema: &ProjectSchema,
        call: &CallOptions,
    ) -> Result<MessageResponse, DeepgramError> {
        let path = project_path(project_id, &[])?;
        self.rest
            .patch(&path, &QueryString::new(), RequestBody::json(schema)?, call)
            .await
    }

    pub async fn delete_project(&self, project_id: &str, call: &CallOptions) -> Result<(), DeepgramError> {
        let path = project_path(project_id, &[])?;
        self.rest.delete(&path, &QueryString::new(), call).await?;
        tracing::info!(target: "deepgram::manage", project_id, "project deleted");
        Ok(())
    }

    /// Remove the authenticated member from a project.
    pub async fn leave_project(
        &self,
        project_id: &str,
        call: &CallOptions,
    ) -> Result<MessageResponse, DeepgramError> {
        let path = project_path(project_id, &["leave"])?;
        self.rest.delete_json(&path, &QueryString::new(), call).await
    }

    pub async fn get_keys(
        &self,
        project_id: &str,
        call: &CallOptions,
    ) -> Result<KeysResponse, DeepgramError> {
        let path = project_path(project_id, &["keys"])?;
        self.rest.get(&path, &QueryString::new(), call).await
    }

    pub async fn get_key(
        &self,
        project_id: &str,
        key_id: &str,
        call: &CallOptions,
    ) -> Result<KeyResponse, DeepgramError> {
        let path = format!(
            "{}/{}",
            project_path(project_id, &["keys"])?,
            encode_id("key_id", key_id)?
        );
        self.rest.get(&path, &QueryString::new(), call).await
    }

    /// Create an API key. The schema is validated before anything is sent.
    pub async fn create_key(
        &self,
        project_id: &str,
        schema: &KeySchema,
        call: &CallOptions,
    ) -> Result<CreatedKey, DeepgramError> {
        schema.validate()?;
        let path = project_path(project_id, &["keys"])?;
        let key: CreatedKey = self
            .rest
            .post(&path, &QueryString::new(), RequestBody::json(schema)?, call)
            .await?;
        tracing::info!(target: "deepgram::manage", project_id, api_key_id = %key.api_key_id, "api key created");
        Ok(key)
    }

    pub async fn delete_key(
        &self,
        project_id: &str,
        key_id: &str,
        call: &CallOptions,
    ) -> Result<MessageResponse, DeepgramError> {
        let path = format!(
            "{}/{}",
            project_path(project_id, &["keys"])?,
            encode_id("key_id", key_id)?
        );
        self.rest.delete_json(&path, &QueryString::new(), call).await
    }

    pub async fn get_members(
        &self,
        project_id: &str,
        call: &CallOptions,
    ) -> Result<MembersResponse, DeepgramError> {
        let path = project_path(project_id, &["members"])?;
        self.rest.get(&path, &QueryString::new(), call).await
    }

    pub async fn remove_member(
        &self,
        project_id: &str,
        member_id: &str,
        call: &CallOptions,
    ) -> Result<MessageResponse, DeepgramError> {
        let path = member_path(project_id, member_id, None)?;
        self.rest.delete_json(&path, &QueryString::new(), call).await
    }

    pub async fn get_member_scopes(
        &self,
        project_id: &str,
        member_id: &str,
        call: &CallOptions,
    ) -> Result<ScopesResponse, DeepgramError> {
        let path = member_path(project_id, member_id, Some("scopes"))?;
        self.rest.get(&path, &QueryString::new(), call).await
    }

    pub async fn update_member_scope(
        &self,
        project_id: &str,
        member_id: &str,
        schema: &MemberScopeSchema,
        call: &CallOptions,
    ) -> Result<MessageResponse, DeepgramError> {
        let path = member_path(project_id, member_id, Some("scopes"))?;
        self.rest
            .put(&path, &QueryString::new(), RequestBody::json(schema)?, call)
            .await
    }

    /// A logged request, including its callback delivery record if any.
    pub async fn get_usage_request(
        &self,
        project_id: &str,
        request_id: &str,
        call: &CallOptions,
    ) -> Result<UsageRequest, DeepgramError> {
        let path = format!(
            "{}/{}",
            project_path(project_id, &["requests"])?,
            encode_id("request_id", request_id)?
        );
        self.rest.get(&path, &QueryString::new(), call).await
    }
}

fn encode_id(name: &str, id: &str) -> Result<String, DeepgramError> {
    if id.trim().is_empty() {
        return Err(DeepgramError::validation(format!("{name} must not be empty")));
    }
    Ok(urlencoding::encode(id).into_owned())
}

fn member_path(project_id: &str, member_id: &str, tail: Option<&str>) -> Result<String, DeepgramError> {
    let mut path = format!(
        "{}/{}",
        project_path(project_id, &["members"])?,
        encode_id("member_id", member_id)?
    );
    if let Some(tail) = tail {
        path.push('/');
        path.push_str(tail);
    }
    Ok(path)
}
