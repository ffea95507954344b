use std::collections::HashMap;
use serde::Serialize;
use crate::api::types::TextureId;
use crate::assets::manifest::TextureManifest;

/// Load state of one texture. `Failed` is terminal for the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

/// What the host needs to fetch a texture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureRequest {
    pub id: u32,
    pub key: String,
    pub path: String,
    pub state: TextureState,
}

#[derive(Debug, Clone)]
struct TextureEntry {
    key: String,
    path: String,
    state: TextureState,
}

/// Registry of named textures requested by the scene.
///
/// Keys get stable ids in request order. The host fetches each path and
/// reports back with `mark_loaded` / `mark_failed`; until a texture is
/// ready, meshes render with their flat material.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_key: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `key`, registering it with `default_path` on first request.
    /// Later requests for the same key return the same id and keep the
    /// existing path.
    pub fn request(&mut self, key: &str, default_path: &str) -> TextureId {
        if let Some(&id) = self.by_key.get(key) {
            return id;
        }
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            key: key.to_string(),
            path: default_path.to_string(),
            state: TextureState::Pending,
        });
        self.by_key.insert(key.to_string(), id);
        id
    }

    pub fn id(&self, key: &str) -> Option<TextureId> {
        self.by_key.get(key).copied()
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    pub fn is_ready(&self, id: TextureId) -> bool {
        self.state(id) == Some(TextureState::Ready)
    }

    /// The host finished decoding the texture. Returns `false` for an
    /// unknown id or a texture that already failed on its current path.
    pub fn mark_loaded(&mut self, id: TextureId) -> bool {
        let Some(entry) = self.entries.get_mut(id.0 as usize) else {
            log::warn!("textures: loaded report for unknown id {}", id.0);
            return false;
        };
        if entry.state == TextureState::Failed {
            log::debug!("textures: ignoring late load of failed '{}'", entry.key);
            return false;
        }
        entry.state = TextureState::Ready;
        true
    }

    /// The host could not fetch or decode the texture. Logged once per path.
    pub fn mark_failed(&mut self, id: TextureId) -> bool {
        let Some(entry) = self.entries.get_mut(id.0 as usize) else {
            log::warn!("textures: failure report for unknown id {}", id.0);
            return false;
        };
        if entry.state != TextureState::Failed {
            log::warn!("textures: '{}' failed to load from {}", entry.key, entry.path);
            entry.state = TextureState::Failed;
        }
        true
    }

    /// Rebind paths from a manifest. Rebinding resets the key to `Pending`
    /// so the host fetches the new path. Keys the scene never requested are
    /// ignored. Returns the number of rebound textures.
    pub fn apply_manifest(&mut self, manifest: &TextureManifest) -> usize {
        let mut rebound = 0;
        for (key, path) in &manifest.textures {
            let Some(&id) = self.by_key.get(key) else {
                log::debug!("textures: manifest key '{}' not used by the scene", key);
                continue;
            };
            let entry = &mut self.entries[id.0 as usize];
            if entry.path != *path {
                entry.path = path.clone();
                entry.state = TextureState::Pending;
                rebound += 1;
            }
        }
        log::debug!("textures: manifest rebound {} path(s)", rebound);
        rebound
    }

    /// Snapshot for the host, in id order.
    pub fn requests(&self) -> Vec<TextureRequest> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| TextureRequest {
                id: i as u32,
                key: e.key.clone(),
                path: e.path.clone(),
                state: e.state,
            })
            .collect()
    }

    pub fn requests_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.requests())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
