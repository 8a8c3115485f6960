use std::env;

/// Site-level display configuration, passed explicitly to the presentation
/// layer at startup instead of looked up ambiently. None of these values
/// affect filtering or storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub site_name: String,
    pub site_url: String,
    pub site_description: String,
    /// AdSense client identifier; ads are disabled when unset.
    pub adsense_client: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "NexusTopic".to_string(),
            site_url: "https://nexustopic.com".to_string(),
            site_description: "Trending topics, explained daily".to_string(),
            adsense_client: None,
        }
    }
}

impl SiteConfig {
    /// Reads `SITE_NAME`, `SITE_URL`, `SITE_DESCRIPTION` and
    /// `ADSENSE_CLIENT`, falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            site_name: env::var("SITE_NAME").unwrap_or(defaults.site_name),
            site_url: env::var("SITE_URL").unwrap_or(defaults.site_url),
            site_description: env::var("SITE_DESCRIPTION").unwrap_or(defaults.site_description),
            adsense_client: env::var("ADSENSE_CLIENT").ok().filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name, "NexusTopic");
        assert!(config.adsense_client.is_none());
    }
}
