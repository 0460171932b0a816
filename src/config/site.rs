//! `[home]` and `[footer]` sections: static page text.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[home]` section - landing page text.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HomeConfig {
    #[serde(default = "defaults::home::heading")]
    #[educe(Default = defaults::home::heading())]
    pub heading: String,

    #[serde(default = "defaults::home::intro")]
    #[educe(Default = defaults::home::intro())]
    pub intro: String,
}

/// `[footer]` section - theme footer links.
///
/// # Example
/// ```toml
/// [[footer.links]]
/// name = "github"
/// url = "https://github.com/alice"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FooterConfig {
    /// Links shown after the copyright line, opened in a new tab.
    #[serde(default = "defaults::footer::links")]
    #[educe(Default = defaults::footer::links())]
    pub links: Vec<FooterLink>,
}

/// A single footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub name: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_home_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.home.heading, "Hi, I'm Thieu!");
        assert!(config.home.intro.starts_with("Self-taught"));
    }

    #[test]
    fn test_footer_default_links() {
        let config: SiteConfig = toml::from_str("").unwrap();
        let names: Vec<_> = config.footer.links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["goodreads", "github", "twitter"]);
    }

    #[test]
    fn test_footer_links_override() {
        let config = r#"
            [[footer.links]]
            name = "mastodon"
            url = "https://mastodon.social/@alice"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.footer.links.len(), 1);
        assert_eq!(config.footer.links[0].name, "mastodon");
    }

    #[test]
    fn test_footer_empty_links() {
        let config: SiteConfig = toml::from_str("[footer]\nlinks = []").unwrap();
        assert!(config.footer.links.is_empty());
    }
}
