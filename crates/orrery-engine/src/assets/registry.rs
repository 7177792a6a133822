use crate::api::types::TextureId;
use crate::assets::manifest::{AssetManifest, TextureDescriptor};

/// Load state of one texture. The host loads images asynchronously and
/// reports back; until then the texture is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed,
}

struct TextureEntry {
    descriptor: TextureDescriptor,
    state: LoadState,
}

/// Registry of texture slots and their load states.
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a texture, returning its slot. Re-registering a path returns the existing slot.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>) -> TextureId {
        let path = path.into();
        if let Some(idx) = self.entries.iter().position(|e| e.descriptor.path == path) {
            return TextureId(idx as u32);
        }
        self.entries.push(TextureEntry {
            descriptor: TextureDescriptor { name: name.into(), path },
            state: LoadState::Pending,
        });
        TextureId(self.entries.len() as u32 - 1)
    }

    pub fn state(&self, id: TextureId) -> Option<LoadState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    /// Slot to sample when drawing, or `None` while the texture is unusable.
    pub fn ready_slot(&self, id: TextureId) -> Option<u32> {
        match self.state(id)? {
            LoadState::Ready => Some(id.0),
            LoadState::Pending | LoadState::Failed => None,
        }
    }

    /// Host reports a decoded image. Returns false for unknown slots.
    pub fn mark_ready(&mut self, id: TextureId) -> bool {
        self.set_state(id, LoadState::Ready)
    }

    /// Host reports a failed fetch or decode. Returns false for unknown slots.
    pub fn mark_failed(&mut self, id: TextureId) -> bool {
        self.set_state(id, LoadState::Failed)
    }

    fn set_state(&mut self, id: TextureId, state: LoadState) -> bool {
        let Some(entry) = self.entries.get_mut(id.0 as usize) else {
            log::warn!("texture slot {} is not registered", id.0);
            return false;
        };
        match state {
            LoadState::Failed => log::warn!(
                "texture '{}' ({}) failed to load; rendering untextured",
                entry.descriptor.name,
                entry.descriptor.path
            ),
            _ => log::debug!("texture '{}' is {:?}", entry.descriptor.name, state),
        }
        entry.state = state;
        true
    }

    /// Manifest describing every registered slot, for the host loader.
    pub fn manifest(&self) -> AssetManifest {
        AssetManifest {
            textures: self.entries.iter().map(|e| e.descriptor.clone()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
