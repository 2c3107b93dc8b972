//! Settings for the pooled HTTP client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::defaults::http as defaults;

/// Connection settings applied when a `DeepgramClient` is built.
///
/// Durations serialize as whole seconds. `timeout` is only the starting
/// per-call timeout; `DeepgramClient::set_timeout` replaces it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(with = "secs")]
    pub timeout: Option<Duration>,
    #[serde(with = "secs")]
    pub connect_timeout: Option<Duration>,
    pub headers: HashMap<String, String>,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(defaults::USER_AGENT.to_string()),
        }
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}
