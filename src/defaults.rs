//! Default Configuration Values
//!
//! Defaults used throughout the client, kept in one place.

use std::time::Duration;

/// Production API host.
pub const BASE_URL: &str = "https://api.deepgram.com";

/// Environment variable consulted when no API key is given to the builder.
pub const API_KEY_ENV: &str = "DEEPGRAM_API_KEY";

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout.
    ///
    /// Pre-recorded transcription of long audio with many features enabled
    /// can take minutes, so this is far above a typical API timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

    /// Default connection timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("deepgram-rest/", env!("CARGO_PKG_VERSION"));
}

/// Path segments for the REST endpoints.
pub mod paths {
    pub const LISTEN: &str = "/v1/listen";
    pub const SPEAK: &str = "/v1/speak";
    pub const PROJECTS: &str = "/v1/projects";
}
