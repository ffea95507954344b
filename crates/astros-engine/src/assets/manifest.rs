use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Asset manifest rebinding texture keys to paths.
/// Loaded from a JSON file at runtime.
///
/// ```json
/// { "textures": { "earth": "assets/texturas/earth.jpg" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureManifest {
    /// Texture key → relative path. Sorted so applying it is deterministic.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_texture_manifest() {
        let json = r#"{
            "textures": {
                "earth": "hd/earth.jpg",
                "rings": "hd/rings.png"
            }
        }"#;
        let manifest = TextureManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures["earth"], "hd/earth.jpg");
    }

    #[test]
    fn empty_object_is_an_empty_manifest() {
        let manifest = TextureManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TextureManifest::from_json("{\"textures\": [1, 2]").is_err());
        assert!(TextureManifest::from_json("not json").is_err());
    }
}
