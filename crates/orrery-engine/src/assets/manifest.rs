use serde::{Deserialize, Serialize};

/// Asset manifest describing the textures a game needs.
/// Serialized to JSON for the host, which fetches and decodes the images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures in slot order: slot `i` is `textures[i]`.
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

/// Describes a single texture image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Human-readable name (e.g., "earth").
    pub name: String,
    /// Relative path to the image file (e.g., "images/earth.png").
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
