//! Static catalog of aspects: one ordered group of fields per production
//! phase. Each field binds an accessor, a mutator and a completion criterion,
//! so form generation, editing and progress all read from the same table.

use crate::completion::{Criterion, FieldValue};
use crate::error::{Result, VidError};
use crate::progress::{aggregate, Tasks};
use crate::video::{Playlist, Video, DATE_FORMAT};
use serde::Serialize;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Field metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Text,
    Boolean,
    Date,
    List,
}

impl FieldKind {
    pub fn default_value(self) -> serde_json::Value {
        match self {
            FieldKind::String | FieldKind::Text | FieldKind::Date => serde_json::json!(""),
            FieldKind::Boolean => serde_json::json!(false),
            FieldKind::List => serde_json::json!([]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiHints {
    pub placeholder: &'static str,
    pub help: &'static str,
    /// Suggested textarea height; 0 means single-line input.
    pub rows: u8,
}

type Getter = fn(&Video) -> FieldValue;
type Setter = fn(&mut Video, FieldValue) -> Result<()>;

pub struct FieldDef {
    pub field_name: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub criterion: Criterion,
    pub hints: UiHints,
    get: Getter,
    set: Setter,
}

impl FieldDef {
    fn new(
        field_name: &'static str,
        name: &'static str,
        kind: FieldKind,
        criterion: Criterion,
        get: Getter,
        set: Setter,
    ) -> Self {
        let rows = if kind == FieldKind::Text { 4 } else { 0 };
        Self {
            field_name,
            name,
            kind,
            required: false,
            criterion,
            hints: UiHints {
                rows,
                ..UiHints::default()
            },
            get,
            set,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn help(mut self, help: &'static str) -> Self {
        self.hints.help = help;
        self
    }

    fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.hints.placeholder = placeholder;
        self
    }

    pub fn value(&self, item: &Video) -> FieldValue {
        (self.get)(item)
    }

    pub fn set_value(&self, item: &mut Video, value: FieldValue) -> Result<()> {
        (self.set)(item, value)
    }

    pub fn is_complete(&self, item: &Video) -> bool {
        crate::completion::is_complete(&self.value(item), self.criterion, item)
    }

    /// Parse a raw command-line string according to the field's kind.
    pub fn parse_raw(&self, raw: &str) -> Result<FieldValue> {
        match self.kind {
            FieldKind::String | FieldKind::Text | FieldKind::Date => Ok(FieldValue::text(raw)),
            FieldKind::Boolean => parse_flag(self.field_name, raw).map(FieldValue::Flag),
            FieldKind::List => {
                let json: serde_json::Value =
                    serde_json::from_str(raw).map_err(|e| invalid(self.field_name, e.to_string()))?;
                Ok(FieldValue::from_json(json))
            }
        }
    }

    pub fn meta(&self, order: usize) -> FieldMeta {
        FieldMeta {
            field_name: self.field_name,
            name: self.name,
            kind: self.kind,
            required: self.required,
            completion_criteria: self.criterion,
            ui_hints: self.hints,
            default_value: self.kind.default_value(),
            order,
        }
    }
}

impl std::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("field_name", &self.field_name)
            .field("kind", &self.kind)
            .field("criterion", &self.criterion)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Value conversion
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: impl Into<String>) -> VidError {
    VidError::InvalidFieldValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(invalid(field, format!("expected a boolean, got '{other}'"))),
    }
}

fn into_text(field: &str, value: FieldValue) -> Result<String> {
    match value {
        FieldValue::Text(s) => Ok(s),
        FieldValue::Missing => Ok(String::new()),
        other => Err(invalid(field, format!("expected a string, got {other:?}"))),
    }
}

fn into_date(field: &str, value: FieldValue) -> Result<String> {
    let s = into_text(field, value)?;
    let trimmed = s.trim();
    if !trimmed.is_empty() && chrono::NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT).is_err() {
        return Err(invalid(field, format!("expected a date like 2030-01-21T16:00, got '{s}'")));
    }
    Ok(trimmed.to_string())
}

fn into_flag(field: &str, value: FieldValue) -> Result<bool> {
    match value {
        FieldValue::Flag(b) => Ok(b),
        FieldValue::Missing => Ok(false),
        FieldValue::Text(s) => parse_flag(field, &s),
        other => Err(invalid(field, format!("expected a boolean, got {other:?}"))),
    }
}

fn into_playlists(field: &str, value: FieldValue) -> Result<Vec<Playlist>> {
    match value {
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| invalid(field, e.to_string())))
            .collect(),
        FieldValue::Missing => Ok(Vec::new()),
        other => Err(invalid(field, format!("expected a list of playlists, got {other:?}"))),
    }
}

// ---------------------------------------------------------------------------
// Field declaration macros
// ---------------------------------------------------------------------------

macro_rules! string_field {
    ($key:literal, $label:literal, $kind:ident, $crit:ident, $($path:ident).+) => {
        FieldDef::new(
            $key,
            $label,
            FieldKind::$kind,
            Criterion::$crit,
            |v: &Video| FieldValue::Text(v.$($path).+.clone()),
            |v: &mut Video, val: FieldValue| {
                v.$($path).+ = into_text($key, val)?;
                Ok(())
            },
        )
    };
}

macro_rules! date_field {
    ($key:literal, $label:literal, $crit:ident, $($path:ident).+) => {
        FieldDef::new(
            $key,
            $label,
            FieldKind::Date,
            Criterion::$crit,
            |v: &Video| FieldValue::Text(v.$($path).+.clone()),
            |v: &mut Video, val: FieldValue| {
                v.$($path).+ = into_date($key, val)?;
                Ok(())
            },
        )
    };
}

macro_rules! bool_field {
    ($key:literal, $label:literal, $crit:ident, $($path:ident).+) => {
        FieldDef::new(
            $key,
            $label,
            FieldKind::Boolean,
            Criterion::$crit,
            |v: &Video| FieldValue::Flag(v.$($path).+),
            |v: &mut Video, val: FieldValue| {
                v.$($path).+ = into_flag($key, val)?;
                Ok(())
            },
        )
    };
}

// ---------------------------------------------------------------------------
// Aspect
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Aspect {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub order: usize,
    pub fields: Vec<FieldDef>,
}

impl Aspect {
    pub fn field(&self, field_name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.field_name == field_name)
    }

    pub fn progress(&self, item: &Video) -> Tasks {
        aggregate(&self.fields, item)
    }

    /// Apply `fieldName → value` updates. All names are checked before any
    /// field is written, so an unknown name leaves the item untouched.
    pub fn apply(
        &self,
        item: &mut Video,
        updates: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        if let Some(unknown) = updates.keys().find(|k| self.field(k).is_none()) {
            return Err(VidError::UnknownField {
                aspect: self.key.to_string(),
                field: unknown.clone(),
            });
        }
        let mut updated = item.clone();
        for (name, value) in updates {
            if let Some(field) = self.field(&name) {
                field.set_value(&mut updated, FieldValue::from_json(value))?;
            }
        }
        *item = updated;
        Ok(())
    }

    /// Summary row; an absent or unidentified item counts as zero completed.
    pub fn summary(&self, item: Option<&Video>) -> AspectSummary {
        let completed = item
            .filter(|v| !v.is_unidentified())
            .map(|v| self.progress(v).completed)
            .unwrap_or(0);
        AspectSummary {
            key: self.key,
            title: self.title,
            description: self.description,
            order: self.order,
            field_count: self.fields.len(),
            completed_field_count: completed,
        }
    }

    pub fn metadata(&self) -> AspectFields {
        AspectFields {
            key: self.key,
            title: self.title,
            description: self.description,
            order: self.order,
            fields: self
                .fields
                .iter()
                .enumerate()
                .map(|(i, f)| f.meta(i + 1))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serializable views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub field_name: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
    pub completion_criteria: Criterion,
    pub ui_hints: UiHints,
    pub default_value: serde_json::Value,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectFields {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub order: usize,
    pub fields: Vec<FieldMeta>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectSummary {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub order: usize,
    pub field_count: usize,
    pub completed_field_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AspectOverview {
    pub aspects: Vec<AspectSummary>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static CATALOG: OnceLock<Vec<Aspect>> = OnceLock::new();

/// All aspects in production order.
pub fn catalog() -> &'static [Aspect] {
    CATALOG.get_or_init(build_catalog)
}

pub fn find(key: &str) -> Result<&'static Aspect> {
    catalog()
        .iter()
        .find(|a| a.key == key)
        .ok_or_else(|| VidError::AspectNotFound(key.to_string()))
}

/// Field metadata for one aspect.
pub fn fields_for(key: &str) -> Result<AspectFields> {
    find(key).map(Aspect::metadata)
}

/// Every aspect with completion counts for `item`. Missing items give zeros.
pub fn overview(item: Option<&Video>) -> AspectOverview {
    AspectOverview {
        aspects: catalog().iter().map(|a| a.summary(item)).collect(),
    }
}

/// Look a field up across all aspects.
pub fn find_field(field_name: &str) -> Option<(&'static Aspect, &'static FieldDef)> {
    catalog()
        .iter()
        .find_map(|a| a.field(field_name).map(|f| (a, f)))
}

/// Run every catalog field of a whole record back through its setter, so a
/// full replacement gets the same checks and trimming as per-field edits.
pub fn normalize(item: &mut Video) -> Result<()> {
    let mut updated = item.clone();
    for field in catalog().iter().flat_map(|a| a.fields.iter()) {
        let value = field.value(&updated);
        field.set_value(&mut updated, value)?;
    }
    *item = updated;
    Ok(())
}

fn build_catalog() -> Vec<Aspect> {
    vec![
        Aspect {
            key: "initial-details",
            title: "Initial Details",
            description: "Project, sponsorship and scheduling",
            order: 1,
            fields: vec![
                string_field!("projectName", "Project Name", String, FilledOnly, project_name),
                string_field!("projectURL", "Project URL", String, FilledOnly, project_url)
                    .placeholder("https://"),
                string_field!("sponsorship.amount", "Sponsorship Amount", String, FilledOnly, sponsorship.amount)
                    .help("Use - or N/A when the video is not sponsored"),
                string_field!("sponsorship.emails", "Sponsorship Emails", String, ConditionalSponsorship, sponsorship.emails)
                    .help("Required when sponsored"),
                string_field!("sponsorship.blocked", "Sponsorship Blocked", String, EmptyOrFilled, sponsorship.blocked)
                    .help("Reason the sponsor is holding the video back"),
                date_field!("date", "Publish Date", FilledOnly, date)
                    .required()
                    .placeholder("2030-01-21T16:00"),
                bool_field!("delayed", "Delayed", FalseOnly, delayed),
                string_field!("gist", "Gist", String, FilledOnly, gist)
                    .help("Path to the manuscript"),
            ],
        },
        Aspect {
            key: "work-progress",
            title: "Work Progress",
            description: "Recording and material preparation",
            order: 2,
            fields: vec![
                bool_field!("code", "Code Done", TrueOnly, code),
                bool_field!("head", "Talking Head Recorded", TrueOnly, head),
                bool_field!("screen", "Screen Recorded", TrueOnly, screen),
                string_field!("relatedVideos", "Related Videos", Text, FilledOnly, related_videos),
                bool_field!("thumbnails", "Thumbnails", TrueOnly, thumbnails),
                bool_field!("diagrams", "Diagrams", TrueOnly, diagrams),
                bool_field!("screenshots", "Screenshots", TrueOnly, screenshots),
                string_field!("location", "Files Location", String, FilledOnly, location),
                string_field!("tagline", "Tagline", String, FilledOnly, tagline),
                string_field!("taglineIdeas", "Tagline Ideas", Text, FilledOnly, tagline_ideas),
                string_field!("otherLogos", "Other Logos", String, FilledOnly, other_logos),
            ],
        },
        Aspect {
            key: "definition",
            title: "Definition",
            description: "Title, description, tags and social copy",
            order: 3,
            fields: vec![
                string_field!("title", "Title", String, FilledOnly, title).required(),
                string_field!("description", "Description", Text, FilledOnly, description),
                string_field!("highlight", "Highlight", String, FilledOnly, highlight),
                string_field!("tags", "Tags", String, FilledOnly, tags)
                    .help("Comma-separated"),
                string_field!("descriptionTags", "Description Tags", String, FilledOnly, description_tags),
                string_field!("tweet", "Tweet", Text, FilledOnly, tweet),
                string_field!("animations", "Animations", Text, FilledOnly, animations),
                bool_field!("requestThumbnail", "Thumbnail Requested", TrueOnly, request_thumbnail),
            ],
        },
        Aspect {
            key: "post-production",
            title: "Post-Production",
            description: "Editing, thumbnail and timecodes",
            order: 4,
            fields: vec![
                string_field!("thumbnail", "Thumbnail", String, FilledOnly, thumbnail)
                    .help("Path to the thumbnail image"),
                string_field!("members", "Members", String, FilledOnly, members),
                bool_field!("requestEdit", "Edit Requested", TrueOnly, request_edit),
                string_field!("timecodes", "Timecodes", Text, NoFixme, timecodes)
                    .help("Replace every FIXME: placeholder before publishing"),
                bool_field!("movie", "Movie Done", TrueOnly, movie),
                bool_field!("slides", "Slides Done", TrueOnly, slides),
            ],
        },
        Aspect {
            key: "publishing",
            title: "Publishing",
            description: "Upload and site post",
            order: 5,
            fields: vec![
                string_field!("uploadVideo", "Video File", String, FilledOnly, upload_video)
                    .required(),
                string_field!("videoId", "Video ID", String, FilledOnly, video_id),
                string_field!("hugoPath", "Site Post", String, FilledOnly, hugo_path),
                FieldDef::new(
                    "playlists",
                    "Playlists",
                    FieldKind::List,
                    Criterion::FilledOnly,
                    |v: &Video| {
                        FieldValue::List(
                            v.playlists
                                .iter()
                                .map(|p| serde_json::json!({ "title": p.title, "id": p.id }))
                                .collect(),
                        )
                    },
                    |v: &mut Video, val: FieldValue| {
                        v.playlists = into_playlists("playlists", val)?;
                        Ok(())
                    },
                )
                .help("List of {title, id}"),
            ],
        },
        Aspect {
            key: "post-publish",
            title: "Post-Publish",
            description: "Announcements and follow-up",
            order: 6,
            fields: vec![
                bool_field!("dotPosted", "DOT Posted", TrueOnly, dot_posted),
                bool_field!("blueSkyPosted", "BlueSky Posted", TrueOnly, blue_sky_posted),
                bool_field!("linkedInPosted", "LinkedIn Posted", TrueOnly, linkedin_posted),
                bool_field!("slackPosted", "Slack Posted", TrueOnly, slack_posted),
                bool_field!("youTubeHighlight", "YouTube Highlight", TrueOnly, youtube_highlight),
                bool_field!("youTubeComment", "YouTube Comment", TrueOnly, youtube_comment),
                bool_field!("youTubeCommentReply", "YouTube Comment Reply", TrueOnly, youtube_comment_reply),
                bool_field!("gde", "GDE Advocu", TrueOnly, gde),
                string_field!("repo", "Code Repository", String, FilledOnly, repo)
                    .help("Use N/A when there is no repository"),
                bool_field!("notifiedSponsors", "Sponsors Notified", ConditionalSponsors, notified_sponsors),
            ],
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
