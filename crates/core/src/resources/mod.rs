//! Concrete console resources.
//!
//! Each submodule pairs a wire record with its [`Resource`] description.
//! [`ResourceKind`] names them at runtime for callers (like the CLI) that
//! pick a resource from user input.
//!
//! [`Resource`]: crate::resource::Resource

pub mod banner;
pub mod gallery;
pub mod gallery_category;
pub mod news;
pub mod org_structure;
pub mod publication;
pub mod slider;
pub mod team;
pub mod user;
pub mod youtube;

use crate::error::CoreError;

/// Every resource the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Banner,
    Gallery,
    GalleryCategory,
    News,
    OrganizationStructure,
    Publication,
    HomeSlider,
    TeamMember,
    User,
    YouTubeVideo,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Banner,
        ResourceKind::Gallery,
        ResourceKind::GalleryCategory,
        ResourceKind::News,
        ResourceKind::OrganizationStructure,
        ResourceKind::Publication,
        ResourceKind::HomeSlider,
        ResourceKind::TeamMember,
        ResourceKind::User,
        ResourceKind::YouTubeVideo,
    ];

    /// Command-line name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banners",
            Self::Gallery => "gallery",
            Self::GalleryCategory => "gallery-categories",
            Self::News => "news",
            Self::OrganizationStructure => "organization-structure",
            Self::Publication => "publications",
            Self::HomeSlider => "home-slider",
            Self::TeamMember => "team",
            Self::User => "users",
            Self::YouTubeVideo => "youtube-videos",
        }
    }

    pub fn from_str_cli(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown resource '{s}'. Valid resources: {}",
                    names.join(", ")
                ))
            })
    }
}

pub(crate) fn default_true() -> bool {
    true
}
