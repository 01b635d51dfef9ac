use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, ValueEnum};

use cms_core::query::SortDirection;
use cms_core::resources::ResourceKind;

/// A resource named on the command line (`banners`, `news`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceArg(pub ResourceKind);

impl FromStr for ResourceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::from_str_cli(s)
            .map(ResourceArg)
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => SortDirection::Asc,
            SortArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    pub resource: ResourceArg,

    /// Page to load (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults to CMS_PAGE_SIZE or the resource's size)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Case-insensitive filter over the loaded page
    #[arg(long)]
    pub search: Option<String>,

    /// Only rows in this category ("all" for every category)
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Ask the backend for active records only
    #[arg(long)]
    pub active_only: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Field value, as `field=value` (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// File to upload, as `field=path` (repeatable)
    #[arg(long = "file", value_name = "FIELD=PATH", value_parser = parse_file)]
    pub files: Vec<(String, PathBuf)>,
}

/// Parse `field=value`.  The value may itself contain `=` or be empty.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

fn parse_file(raw: &str) -> Result<(String, PathBuf), String> {
    let (field, path) = parse_assignment(raw)?;
    if path.is_empty() {
        return Err(format!("missing path in '{raw}'"));
    }
    Ok((field, PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_keeps_equals_in_value() {
        assert_eq!(
            parse_assignment("buttonLink=/docs?a=b").unwrap(),
            ("buttonLink".to_string(), "/docs?a=b".to_string())
        );
        assert_eq!(parse_assignment("bio=").unwrap().1, "");
    }

    #[test]
    fn assignment_needs_a_field() {
        assert!(parse_assignment("title").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn file_needs_a_path() {
        assert!(parse_file("image=").is_err());
        assert_eq!(parse_file("image=./a.png").unwrap().1, PathBuf::from("./a.png"));
    }

    #[test]
    fn resource_names_are_checked() {
        assert_eq!(
            "youtube-videos".parse::<ResourceArg>().unwrap(),
            ResourceArg(ResourceKind::YouTubeVideo)
        );
        assert!("videos".parse::<ResourceArg>().is_err());
    }
}
