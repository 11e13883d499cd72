use crate::types::Phase;
use crate::video::Video;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One classification rule: a predicate and the phase it assigns.
pub struct Rule {
    pub id: &'static str,
    pub condition: fn(&Video) -> bool,
    pub phase: Phase,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Derives a video's phase from its fields. Rules are evaluated in order and
/// the first match wins; a video matching nothing is an idea.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, video: &Video) -> Phase {
        self.matching_rule(video)
            .map(|r| r.phase)
            .unwrap_or(Phase::Ideas)
    }

    /// The rule that decided the phase, if any did.
    pub fn matching_rule(&self, video: &Video) -> Option<&Rule> {
        self.rules.iter().find(|r| (r.condition)(video))
    }
}

// ---------------------------------------------------------------------------
// PhaseSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PhaseCount {
    pub id: usize,
    pub name: Phase,
    pub title: &'static str,
    pub count: usize,
}

/// Item count per phase, every phase present, in menu order.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSummary {
    pub phases: Vec<PhaseCount>,
    pub total: usize,
}

impl PhaseSummary {
    pub fn from_videos(videos: &[Video]) -> Self {
        let classifier = Classifier::new(crate::rules::default_rules());
        let mut counts = [0usize; 8];
        for video in videos {
            counts[classifier.classify(video).id()] += 1;
        }
        let phases = Phase::all()
            .iter()
            .map(|&p| PhaseCount {
                id: p.id(),
                name: p,
                title: p.title(),
                count: counts[p.id()],
            })
            .collect();
        Self {
            phases,
            total: videos.len(),
        }
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.phases
            .iter()
            .find(|c| c.name == phase)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

/// Keep only the videos currently in `phase`.
pub fn in_phase(videos: Vec<Video>, phase: Phase) -> Vec<Video> {
    let classifier = Classifier::new(crate::rules::default_rules());
    videos
        .into_iter()
        .filter(|v| classifier.classify(v) == phase)
        .collect()
}
