//! Static story catalog.
//!
//! Content comes from a bundled JSON fixture (or an override file named in
//! config). The catalog is read-only: stories are looked up by exact id and
//! handed to the reader as immutable values. There is no write path.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{error, warn};
use ts_rs::TS;

static BUNDLED_JSON: &str = include_str!("data/stories.json");

static BUNDLED: Lazy<Catalog> = Lazy::new(|| match serde_json::from_str::<Catalog>(BUNDLED_JSON) {
    Ok(catalog) => {
        catalog.warn_on_bad_timestamps();
        catalog
    }
    Err(err) => {
        error!("Bundled story fixture is malformed: {err}");
        Catalog::default()
    }
});

/// One page of a story: the unit of content the reader displays.
#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoryPage {
    /// 1-based, matches the page's position in the owning story.
    pub page_number: u32,
    pub image_url: String,
    pub text: String,
    /// Seconds from story start at which this page becomes current in
    /// listen mode. Non-decreasing across the page sequence.
    pub audio_timestamp: u32,
    #[serde(default)]
    pub audio_url: Option<String>,
}

/// A titled, ordered sequence of pages with browse metadata.
#[derive(Debug, Clone, Deserialize, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub rating: f32,
    pub reads: u64,
    pub likes: u64,
    pub duration: String,
    pub age_range: String,
    pub categories: Vec<String>,
    pub pages: Vec<StoryPage>,
}

impl Story {
    /// Maps a playback position to the page whose timestamp range contains
    /// it: `timestamp[i] <= position < timestamp[i + 1]`, with the last
    /// page's upper bound unbounded.
    pub fn page_at_position(&self, position_secs: u32) -> usize {
        let mut index = 0;
        for (i, page) in self.pages.iter().enumerate() {
            if position_secs >= page.audio_timestamp {
                index = i;
            } else {
                break;
            }
        }
        index
    }
}

/// Compact listing entry for browse surfaces.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StorySummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub rating: f32,
    pub duration: String,
    pub age_range: String,
    pub categories: Vec<String>,
    pub page_count: usize,
}

/// The read-only story collection queried by the reader.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Catalog {
    pub stories: Vec<Story>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn bundled() -> &'static Catalog {
        &BUNDLED
    }

    /// Load a catalog from a JSON file, falling back to the bundled fixture
    /// if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Catalog {
        let contents = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), "Falling back to bundled catalog: {err}");
                return Self::bundled().clone();
            }
        };
        match serde_json::from_str::<Catalog>(&contents) {
            Ok(catalog) => {
                catalog.warn_on_bad_timestamps();
                catalog
            }
            Err(err) => {
                warn!(path = %path.display(), "Invalid catalog JSON: {err}");
                Self::bundled().clone()
            }
        }
    }

    /// Exact-id lookup; a miss is the caller's terminal not-found state.
    pub fn find(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == story_id)
    }

    pub fn summaries(&self) -> Vec<StorySummary> {
        self.stories
            .iter()
            .map(|story| StorySummary {
                id: story.id.clone(),
                title: story.title.clone(),
                author: story.author.clone(),
                cover_image: story.cover_image.clone(),
                rating: story.rating,
                duration: story.duration.clone(),
                age_range: story.age_range.clone(),
                categories: story.categories.clone(),
                page_count: story.pages.len(),
            })
            .collect()
    }

    fn warn_on_bad_timestamps(&self) {
        for story in &self.stories {
            let ordered = story
                .pages
                .windows(2)
                .all(|pair| pair[0].audio_timestamp <= pair[1].audio_timestamp);
            if !ordered {
                // Listen-mode page sync assumes non-decreasing timestamps.
                warn!(story = %story.id, "Page audio timestamps are not non-decreasing");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_parses() {
        let catalog = Catalog::bundled();
        assert!(!catalog.stories.is_empty());
        for story in &catalog.stories {
            assert!(!story.pages.is_empty(), "story {} has no pages", story.id);
            for (i, page) in story.pages.iter().enumerate() {
                assert_eq!(page.page_number as usize, i + 1);
            }
            assert!(
                story
                    .pages
                    .windows(2)
                    .all(|pair| pair[0].audio_timestamp <= pair[1].audio_timestamp),
                "story {} has decreasing timestamps",
                story.id
            );
        }
    }

    #[test]
    fn find_misses_unknown_id() {
        assert!(Catalog::bundled().find("no-such-story").is_none());
    }

    #[test]
    fn find_hits_known_id() {
        let story = Catalog::bundled().find("luna-the-brave").expect("fixture story");
        assert_eq!(story.title, "Luna the Brave");
        assert_eq!(story.pages.len(), 3);
    }

    #[test]
    fn position_maps_to_containing_page() {
        let story = Catalog::bundled().find("luna-the-brave").expect("fixture story");
        // Timestamps are [0, 30, 60].
        assert_eq!(story.page_at_position(0), 0);
        assert_eq!(story.page_at_position(29), 0);
        assert_eq!(story.page_at_position(30), 1);
        assert_eq!(story.page_at_position(59), 1);
        assert_eq!(story.page_at_position(60), 2);
        assert_eq!(story.page_at_position(89), 2);
        // Last page's upper bound is unbounded.
        assert_eq!(story.page_at_position(10_000), 2);
    }

    fn temp_catalog_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("storytime-{name}-{}.json", std::process::id()));
        std::fs::write(&path, contents).expect("write temp catalog");
        path
    }

    #[test]
    fn load_falls_back_to_bundled_on_missing_file() {
        let catalog = Catalog::load(Path::new("/nonexistent/stories.json"));
        assert_eq!(catalog.stories.len(), Catalog::bundled().stories.len());
        assert!(catalog.find("luna-the-brave").is_some());
    }

    #[test]
    fn load_falls_back_to_bundled_on_invalid_json() {
        let path = temp_catalog_file("invalid", "{ \"stories\": [ { \"id\": ");
        let catalog = Catalog::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.stories.len(), Catalog::bundled().stories.len());
        assert!(catalog.find("luna-the-brave").is_some());
    }

    #[test]
    fn load_uses_override_file_when_valid() {
        let path = temp_catalog_file(
            "valid",
            r#"{
                "stories": [
                    {
                        "id": "tiny-tale",
                        "title": "A Tiny Tale",
                        "author": "Test Author",
                        "description": "One page, quickly told.",
                        "coverImage": "https://example.test/cover.jpg",
                        "rating": 5.0,
                        "reads": 1,
                        "likes": 1,
                        "duration": "1 min",
                        "ageRange": "3-5",
                        "categories": ["Bedtime"],
                        "pages": [
                            {
                                "pageNumber": 1,
                                "imageUrl": "https://example.test/p1.jpg",
                                "text": "The end.",
                                "audioTimestamp": 0
                            }
                        ]
                    }
                ]
            }"#,
        );
        let catalog = Catalog::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.stories.len(), 1);
        assert!(catalog.find("tiny-tale").is_some());
        assert!(catalog.find("luna-the-brave").is_none());
    }

    #[test]
    fn summaries_cover_every_story() {
        let catalog = Catalog::bundled();
        let summaries = catalog.summaries();
        assert_eq!(summaries.len(), catalog.stories.len());
        assert!(summaries.iter().any(|s| s.id == "captain-pickle" && s.page_count == 4));
    }
}
