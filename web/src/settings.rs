use serde::{Deserialize, Serialize};
use twinflip_core::Tier;

use crate::storage::StorageKey;

/// Preferences remembered between visits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub tier: Tier,
}

impl StorageKey for Settings {
    const KEY: &'static str = "twinflip:settings";
}
