//! Player toggles, each persisted as a JSON boolean under its own key.

use serde::Serialize;

use crate::codec::decode_bool;
use crate::error::Result;
use crate::keys;
use crate::store::SharedStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub music: bool,
    pub vibration: bool,
    pub notifications: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Music,
    Vibration,
    Notifications,
}

impl Toggle {
    fn key(&self) -> &'static str {
        match self {
            Toggle::Music => keys::PREF_MUSIC,
            Toggle::Vibration => keys::PREF_VIBRATION,
            Toggle::Notifications => keys::PREF_NOTIFICATIONS,
        }
    }
}

pub struct PreferenceStore {
    store: SharedStore,
}

impl PreferenceStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Missing or non-boolean values read as off
    pub async fn load(&self) -> Result<Preferences> {
        let (music, vibration, notifications) = tokio::try_join!(
            self.store.get(keys::PREF_MUSIC),
            self.store.get(keys::PREF_VIBRATION),
            self.store.get(keys::PREF_NOTIFICATIONS),
        )?;
        Ok(Preferences {
            music: decode_bool(music.as_deref()).unwrap_or(false),
            vibration: decode_bool(vibration.as_deref()).unwrap_or(false),
            notifications: decode_bool(notifications.as_deref()).unwrap_or(false),
        })
    }

    pub async fn set(&self, toggle: Toggle, enabled: bool) -> Result<()> {
        self.store
            .set(toggle.key(), if enabled { "true" } else { "false" })
            .await
    }
}
