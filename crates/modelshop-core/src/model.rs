//! Model record and category type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ShopError;

/// A single catalog entry for a 3D model asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Opaque unique identifier, immutable once created
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Author display name
    pub author: String,
    /// Price in USD; zero means free
    pub price: f64,
    /// Catalog category
    pub category: Category,
    /// Community rating in [0, 5]
    pub rating: f64,
    /// Download count; only ever incremented by this layer
    pub downloads: u64,
    /// Optional long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional free-form tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Storage path of the primary asset, resolved by the store into a URL
    pub file_path: String,
    /// Optional storage path of a thumbnail image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    /// Creation timestamp; catalog queries order by this, newest first
    pub created_at: DateTime<Utc>,
}

impl ModelRecord {
    /// Whether this model is free to download
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// Fixed classification tags used to filter the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Furniture,
    Characters,
    Vehicles,
    Weapons,
    Architecture,
    Nature,
}

impl Category {
    /// All categories, in catalog display order
    pub const ALL: [Category; 6] = [
        Category::Furniture,
        Category::Characters,
        Category::Vehicles,
        Category::Weapons,
        Category::Architecture,
        Category::Nature,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Furniture => write!(f, "Furniture"),
            Category::Characters => write!(f, "Characters"),
            Category::Vehicles => write!(f, "Vehicles"),
            Category::Weapons => write!(f, "Weapons"),
            Category::Architecture => write!(f, "Architecture"),
            Category::Nature => write!(f, "Nature"),
        }
    }
}

impl FromStr for Category {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "furniture" => Ok(Category::Furniture),
            "characters" => Ok(Category::Characters),
            "vehicles" => Ok(Category::Vehicles),
            "weapons" => Ok(Category::Weapons),
            "architecture" => Ok(Category::Architecture),
            "nature" => Ok(Category::Nature),
            other => Err(ShopError::UnknownCategory(other.to_string())),
        }
    }
}

/// Catalog query filter: everything, or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// The "all" sentinel: no category constraint
    All,
    /// Equality filter on one category
    Only(Category),
}

impl CategoryFilter {
    /// Whether a record passes this filter
    pub fn matches(&self, record: &ModelRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => record.category == *c,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.parse()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category) -> ModelRecord {
        ModelRecord {
            id: "1".to_string(),
            name: "Modern Chair".to_string(),
            author: "DesignPro".to_string(),
            price: 29.99,
            category,
            rating: 4.8,
            downloads: 1247,
            description: None,
            tags: None,
            file_path: "chairs/modern.glb".to_string(),
            thumbnail_path: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_category_roundtrip() {
        for c in Category::ALL {
            let parsed: Category = c.to_string().parse().unwrap();
            assert_eq!(parsed, c);
        }
        assert!("gadgets".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "furniture".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Furniture)
        );
        assert!("gadgets".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        let r = record(Category::Furniture);
        assert!(CategoryFilter::All.matches(&r));
        assert!(CategoryFilter::Only(Category::Furniture).matches(&r));
        assert!(!CategoryFilter::Only(Category::Nature).matches(&r));
    }

    #[test]
    fn test_is_free() {
        let mut r = record(Category::Nature);
        assert!(!r.is_free());
        r.price = 0.0;
        assert!(r.is_free());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let r = record(Category::Vehicles);
        let json = serde_json::to_string(&r).unwrap();
        let back: ModelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
