use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a video. Always derived from field values by the
/// classifier; never stored on the record.
///
/// Variant order is the menu order shown by the CLI and API, and `id()` is
/// the position in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Published,
    PublishPending,
    EditRequested,
    MaterialDone,
    Started,
    Delayed,
    SponsoredBlocked,
    Ideas,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Published,
            Phase::PublishPending,
            Phase::EditRequested,
            Phase::MaterialDone,
            Phase::Started,
            Phase::Delayed,
            Phase::SponsoredBlocked,
            Phase::Ideas,
        ]
    }

    pub fn id(self) -> usize {
        self as usize
    }

    pub fn from_id(id: usize) -> Option<Phase> {
        Phase::all().get(id).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Published => "published",
            Phase::PublishPending => "publish_pending",
            Phase::EditRequested => "edit_requested",
            Phase::MaterialDone => "material_done",
            Phase::Started => "started",
            Phase::Delayed => "delayed",
            Phase::SponsoredBlocked => "sponsored_blocked",
            Phase::Ideas => "ideas",
        }
    }

    /// Human-facing label for menus.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Published => "Published",
            Phase::PublishPending => "Pending Publish",
            Phase::EditRequested => "Edit Requested",
            Phase::MaterialDone => "Material Done",
            Phase::Started => "Started",
            Phase::Delayed => "Delayed",
            Phase::SponsoredBlocked => "Sponsored Blocked",
            Phase::Ideas => "Ideas",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::VidError;

    /// Accepts the snake_case name, a hyphenated variant, or the numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        if let Ok(id) = normalized.parse::<usize>() {
            return Phase::from_id(id)
                .ok_or_else(|| crate::error::VidError::InvalidPhase(s.to_string()));
        }
        Phase::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| crate::error::VidError::InvalidPhase(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
