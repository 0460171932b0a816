//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization. The
//! built-in values describe the notes site itself, so a minimal
//! `notes.toml` already reproduces it.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Thieu's Notes".into()
    }

    pub fn author() -> String {
        "Doan Thieu".into()
    }

    pub fn description() -> String {
        "Personal blog by Doan Thieu — self-taught programmer, avid reader, introvert.".into()
    }

    pub fn url() -> String {
        "https://thieus-notes.vercel.app".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn image() -> Option<String> {
        Some("https://assets.vercel.com/image/upload/q_auto/front/vercel/dps.png".into())
    }
}

// ============================================================================
// [home] Section Defaults
// ============================================================================

pub mod home {
    pub fn heading() -> String {
        "Hi, I'm Thieu!".into()
    }

    pub fn intro() -> String {
        "Self-taught software developer, avid reader, introvert.".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "rss.xml".into()
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }

        pub fn routes() -> Vec<String> {
            vec!["".into(), "/posts".into()]
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}

// ============================================================================
// [footer] Section Defaults
// ============================================================================

pub mod footer {
    use crate::config::FooterLink;

    pub fn links() -> Vec<FooterLink> {
        [
            ("goodreads", "https://www.goodreads.com/user/show/25954119-thi-u"),
            ("github", "https://github.com/Thieurom"),
            ("twitter", "https://twitter.com/lethieu"),
        ]
        .into_iter()
        .map(|(name, url)| FooterLink {
            name: name.into(),
            url: url.into(),
        })
        .collect()
    }
}

// ============================================================================
// Content Lists
// ============================================================================

pub mod content {
    use crate::content::ContentItem;

    pub fn projects() -> Vec<ContentItem> {
        vec![
            ContentItem::new("DevSettings", "https://github.com/Thieurom/DevSettings")
                .with_year(2025)
                .with_description(
                    "SwiftUI view to manage development settings in your SwiftUI application",
                ),
            ContentItem::new("JourneyLog", "https://github.com/Thieurom/JourneyLog")
                .with_year(2023)
                .with_description("Wrapper of os.Logger and OSLogStore to log and export log entries"),
            ContentItem::new("Landmarks", "https://github.com/Thieurom/Landmarks")
                .with_year(2023)
                .with_description(
                    "Rebuild of Apple's \"Landmarks\" application using the Composable Architecture",
                ),
            ContentItem::new("Pilot", "https://github.com/Thieurom/Pilot")
                .with_year(2022)
                .with_description("Simple HTTP network layer written in Swift"),
            ContentItem::new("FootballTables", "https://github.com/Thieurom/FootballTables")
                .with_year(2022)
                .with_description(
                    "iOS app shows the latest matches and standings of Europe's top 5 football leagues",
                ),
            ContentItem::new("SanoApp", "https://github.com/Thieurom/SanoApp")
                .with_year(2019)
                .with_description("Tic-tac-toe game, written in Swift"),
            ContentItem::new("LobstersApp", "https://github.com/Thieurom/LobstersApp")
                .with_year(2018)
                .with_description("iOS app for reading Lobsters"),
            ContentItem::new("BlocksApp", "https://github.com/Thieurom/BlocksApp")
                .with_year(2018)
                .with_description("iOS app that shows random programming quotes"),
        ]
    }

    pub fn bookmarks() -> Vec<ContentItem> {
        Vec::new()
    }
}
