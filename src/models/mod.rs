//! Request options and response payloads, grouped by API area.

pub mod listen;
pub mod manage;
pub mod speak;

pub use listen::{AsyncResponse, PrerecordedSchema, SyncResponse};
pub use manage::{
    Callback, CreatedKey, KeyResponse, KeySchema, KeysResponse, Member, MemberScopeSchema,
    MembersResponse, MessageResponse, Project, ProjectSchema, ProjectsResponse, ScopesResponse,
    UsageRequest,
};
pub use speak::{SpeakMetadata, SpeakSchema, SpeakStream, TextSource};
