//! Per-call options.

use std::collections::BTreeMap;

use tokio_util::sync::CancellationToken;

/// Options that apply to a single call rather than to the client.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Aborts the call when cancelled.
    pub cancellation: Option<CancellationToken>,
    /// Extra query parameters appended after the request's own options.
    pub addons: Option<BTreeMap<String, String>>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn with_addon(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.addons
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_addons(mut self, addons: BTreeMap<String, String>) -> Self {
        self.addons.get_or_insert_with(BTreeMap::new).extend(addons);
        self
    }
}
