//! Upload draft types
//!
//! The shop has no upload pipeline; drafts are validated and then
//! dropped. The types here are plain records with an explicit
//! validation function, independent of any UI binding.

use serde::{Deserialize, Serialize};

use crate::error::{ShopError, ShopResult};
use crate::model::Category;

/// File extensions accepted for the primary asset
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["obj", "fbx", "gltf", "glb", "dae", "3ds"];

/// Metadata about one file attached to an upload draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFile {
    /// File name including extension
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl UploadFile {
    /// Whether the extension is one of the accepted 3D formats
    pub fn has_accepted_extension(&self) -> bool {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|a| ext.eq_ignore_ascii_case(a))
            })
            .unwrap_or(false)
    }
}

/// A model submission awaiting validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDraft {
    /// Display name for the model
    pub name: String,
    /// Catalog category
    pub category: Category,
    /// Price in USD; zero means free
    #[serde(default)]
    pub price: f64,
    /// Optional long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Attached files
    pub files: Vec<UploadFile>,
}

impl UploadDraft {
    /// Validate the draft, collecting every problem into one message
    pub fn validate(&self) -> ShopResult<()> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }
        if self.price < 0.0 {
            problems.push("price must not be negative".to_string());
        }
        if self.files.is_empty() {
            problems.push("at least one model file is required".to_string());
        }
        for file in &self.files {
            if !file.has_accepted_extension() {
                problems.push(format!(
                    "'{}' is not an accepted format ({})",
                    file.name,
                    ACCEPTED_EXTENSIONS.join(", ")
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ShopError::InvalidDraft(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UploadDraft {
        UploadDraft {
            name: "Medieval Sword".to_string(),
            category: Category::Weapons,
            price: 15.99,
            description: None,
            tags: vec!["medieval".to_string()],
            files: vec![UploadFile {
                name: "sword.glb".to_string(),
                size: 2 * 1024 * 1024,
            }],
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_draft_requires_files() {
        let mut d = draft();
        d.files.clear();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("at least one model file"));
    }

    #[test]
    fn test_draft_rejects_unknown_extension() {
        let mut d = draft();
        d.files[0].name = "sword.stl".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_draft_collects_all_problems() {
        let mut d = draft();
        d.name = "  ".to_string();
        d.price = -1.0;
        let err = d.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name must not be empty"));
        assert!(msg.contains("price must not be negative"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let file = UploadFile {
            name: "robot.GLB".to_string(),
            size: 1,
        };
        assert!(file.has_accepted_extension());
    }
}
