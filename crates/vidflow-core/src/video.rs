use crate::classifier::Classifier;
use crate::error::{Result, VidError};
use crate::paths;
use crate::progress::VideoProgress;
use crate::rules::default_rules;
use crate::store::{self, IndexEntry, Store};
use crate::types::Phase;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ---------------------------------------------------------------------------
// Sponsorship / Playlist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sponsorship {
    pub amount: String,
    pub emails: String,
    pub blocked: String,
}

impl Sponsorship {
    /// `""`, `"-"` and `"N/A"` all mean "no sponsor".
    pub fn is_sponsored(&self) -> bool {
        !matches!(self.amount.as_str(), "" | "-" | "N/A")
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocked.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playlist {
    pub title: String,
    pub id: String,
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    pub name: String,
    pub category: String,

    // initial details
    pub project_name: String,
    #[serde(rename = "projectURL")]
    pub project_url: String,
    pub sponsorship: Sponsorship,
    pub date: String,
    pub delayed: bool,
    pub gist: String,

    // work in progress
    pub code: bool,
    pub head: bool,
    pub screen: bool,
    pub related_videos: String,
    pub thumbnails: bool,
    pub diagrams: bool,
    pub screenshots: bool,
    pub location: String,
    pub tagline: String,
    pub tagline_ideas: String,
    pub other_logos: String,

    // definition
    pub title: String,
    pub description: String,
    pub highlight: String,
    pub tags: String,
    pub description_tags: String,
    pub tweet: String,
    pub animations: String,
    pub request_thumbnail: bool,

    // post-production
    pub thumbnail: String,
    pub members: String,
    pub request_edit: bool,
    pub timecodes: String,
    pub movie: bool,
    pub slides: bool,

    // publishing
    pub upload_video: String,
    pub video_id: String,
    pub hugo_path: String,
    pub playlists: Vec<Playlist>,

    // post-publish
    pub dot_posted: bool,
    pub blue_sky_posted: bool,
    #[serde(rename = "linkedInPosted")]
    pub linkedin_posted: bool,
    pub slack_posted: bool,
    #[serde(rename = "youTubeHighlight")]
    pub youtube_highlight: bool,
    #[serde(rename = "youTubeComment")]
    pub youtube_comment: bool,
    #[serde(rename = "youTubeCommentReply")]
    pub youtube_comment_reply: bool,
    pub gde: bool,
    pub repo: String,
    pub notified_sponsors: bool,
}

impl Video {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// True when the record carries no identity, which is how an absent or
    /// unreadable file shows up after [`store::load`].
    pub fn is_unidentified(&self) -> bool {
        self.name.is_empty() && self.category.is_empty()
    }

    pub fn phase(&self) -> Phase {
        Classifier::new(default_rules()).classify(self)
    }

    pub fn progress(&self) -> VideoProgress {
        VideoProgress::of(self)
    }

    /// Parsed `date`, if set and well-formed.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry::new(self.name.clone(), self.category.clone())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn create(store: &Store, name: &str, category: &str) -> Result<Self> {
        paths::validate_name(name)?;
        paths::validate_name(category)?;

        let index = store.load_index()?;
        let path = store.path_for(category, name);
        if index.iter().any(|e| e.matches(name, category)) || path.exists() {
            return Err(VidError::VideoExists {
                name: name.to_string(),
                category: category.to_string(),
            });
        }

        let video = Self::new(name, category);
        store::save(&video, &path)?;
        store.add_entry(video.index_entry())?;
        tracing::info!(name, category, "video created");
        Ok(video)
    }

    pub fn load(store: &Store, name: &str, category: &str) -> Result<Self> {
        let video = store::load(&store.path_for(category, name));
        if video.is_unidentified() {
            return Err(VidError::video_not_found(name, category));
        }
        Ok(video)
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store::save(self, &store.path_for(&self.category, &self.name))
    }

    /// All videos in index order. Entries whose record is missing or
    /// unreadable come back as empty videos carrying the entry's identity.
    pub fn list(store: &Store) -> Result<Vec<Self>> {
        let entries = store.load_index()?;
        let videos = entries
            .into_iter()
            .map(|entry| {
                let video = store::load(&store.path_for(&entry.category, &entry.name));
                if video.is_unidentified() {
                    tracing::debug!(name = %entry.name, category = %entry.category, "index entry without record");
                    Self::new(entry.name, entry.category)
                } else {
                    video
                }
            })
            .collect();
        Ok(videos)
    }

    /// Remove the record, its sibling script and the index entry.
    pub fn delete(store: &Store, name: &str, category: &str) -> Result<()> {
        let removed_entry = store.remove_entry(name, category)?;
        let removed_record = crate::io::remove_if_exists(&store.path_for(category, name))?;
        crate::io::remove_if_exists(&store.script_path_for(category, name))?;
        if !removed_entry && !removed_record {
            return Err(VidError::video_not_found(name, category));
        }
        tracing::info!(name, category, "video deleted");
        Ok(())
    }
}

/// Order videos by scheduled date, unscheduled ones last, name as tiebreak.
pub fn sort_by_schedule(videos: &mut [Video]) {
    videos.sort_by(|a, b| match (a.scheduled_at(), b.scheduled_at()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
