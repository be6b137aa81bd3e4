//! Request and response types for the site API.

use serde::{Deserialize, Serialize};

/// The user who authorized the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A connected site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub last_published: Option<String>,
}

impl Site {
    /// A site with only an id, for tests and fixtures.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            short_name: None,
            time_zone: None,
            preview_url: None,
            created_on: None,
            last_updated: None,
            last_published: None,
        }
    }
}

/// A page of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Code injected into the `<head>` of every page of a site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCode {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Body for writing custom code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteCustomCodeRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SitesEnvelope {
    #[serde(default)]
    pub sites: Vec<Site>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PagesEnvelope {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_from_camel_case() {
        let site: Site = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "displayName": "My Site",
            "shortName": "my-site",
            "timeZone": "Europe/Paris",
            "unknownField": true,
        }))
        .unwrap();

        assert_eq!(site.id, "abc123");
        assert_eq!(site.display_name.as_deref(), Some("My Site"));
        assert_eq!(site.time_zone.as_deref(), Some("Europe/Paris"));
        assert!(site.last_published.is_none());
    }

    #[test]
    fn test_custom_code_defaults() {
        let code: CustomCode = serde_json::from_str("{}").unwrap();
        assert_eq!(code, CustomCode::default());
    }
}
