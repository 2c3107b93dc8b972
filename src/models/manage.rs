//! Project management models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeepgramError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub project_id: String,
    pub name: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Fields to change on a project; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Generic `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: String,
}

/// Body for creating an API key.
///
/// `expiration_date` and `time_to_live_in_seconds` are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    pub comment: String,
    pub scopes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live_in_seconds: Option<u64>,
}

impl KeySchema {
    pub fn new<I, S>(comment: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            comment: comment.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
            tags: None,
            expiration_date: None,
            time_to_live_in_seconds: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_time_to_live(mut self, seconds: u64) -> Self {
        self.time_to_live_in_seconds = Some(seconds);
        self
    }

    pub fn validate(&self) -> Result<(), DeepgramError> {
        if self.expiration_date.is_some() && self.time_to_live_in_seconds.is_some() {
            return Err(DeepgramError::validation(
                "set either expiration_date or time_to_live_in_seconds, not both",
            ));
        }
        if self.scopes.is_empty() {
            return Err(DeepgramError::validation("an API key needs at least one scope"));
        }
        Ok(())
    }
}

/// A freshly created key. `key` is only ever returned here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedKey {
    pub api_key_id: String,
    pub key: String,
    pub comment: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
    pub tags: Option<Vec<String>>,
    pub expiration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKey {
    pub api_key_id: String,
    pub comment: Option<String>,
    pub scopes: Vec<String>,
    pub tags: Option<Vec<String>>,
    pub created: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMember {
    pub member_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyWithMember {
    pub member: KeyMember,
    pub api_key: ApiKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysResponse {
    pub api_keys: Vec<KeyWithMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyResponse {
    pub item: KeyWithMember,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    pub member_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopesResponse {
    pub scopes: Vec<String>,
}

/// Body for replacing a member's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberScopeSchema {
    pub scope: String,
}

impl MemberScopeSchema {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

/// Delivery record of a callback request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Callback {
    pub attempts: Option<u32>,
    pub code: Option<u16>,
    pub completed: Option<String>,
}

/// A single logged request of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRequest {
    pub request_id: String,
    pub project_uuid: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub path: Option<String>,
    pub api_key_id: Option<String>,
    pub code: Option<u16>,
    pub deployment: Option<String>,
    pub response: Option<serde_json::Value>,
    pub callback: Option<Callback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_schema_rejects_expiration_and_ttl_together() {
        let schema = KeySchema::new("ci", ["member"])
            .with_expiration_date(Utc::now())
            .with_time_to_live(3600);
        assert!(matches!(schema.validate(), Err(DeepgramError::Validation(_))));

        assert!(KeySchema::new("ci", ["member"]).with_time_to_live(3600).validate().is_ok());
    }

    #[test]
    fn key_schema_requires_a_scope() {
        let schema = KeySchema::new("ci", Vec::<String>::new());
        assert!(schema.validate().is_err());
    }

    #[test]
    fn key_schema_omits_unset_fields() {
        let json = serde_json::to_value(KeySchema::new("ci", ["member"]).with_time_to_live(60)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"comment": "ci", "scopes": ["member"], "time_to_live_in_seconds": 60})
        );
    }

    #[test]
    fn usage_request_with_callback() {
        let json = serde_json::json!({
            "request_id": "r1",
            "created": "2024-01-02T03:04:05Z",
            "path": "/v1/listen",
            "code": 200,
            "callback": {"attempts": 1, "code": 200, "completed": "2024-01-02T03:04:09Z"}
        });
        let request: UsageRequest = serde_json::from_value(json).unwrap();
        let callback = request.callback.unwrap();
        assert_eq!(callback.attempts, Some(1));
        assert_eq!(callback.code, Some(200));
        assert_eq!(request.created.map(|c| c.to_rfc3339()).as_deref(), Some("2024-01-02T03:04:05+00:00"));
    }
}
