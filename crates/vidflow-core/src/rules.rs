use crate::classifier::Rule;
use crate::types::Phase;
use crate::video::Video;

// ---------------------------------------------------------------------------
// Helper macro for concise rule definitions
// ---------------------------------------------------------------------------

macro_rules! rule {
    (id: $id:expr, condition: $cond:expr, phase: $phase:expr) => {
        Rule {
            id: $id,
            condition: $cond,
            phase: $phase,
        }
    };
}

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn is_delayed(v: &Video) -> bool {
    v.delayed
}

fn is_sponsor_blocked(v: &Video) -> bool {
    v.sponsorship.is_blocked()
}

fn has_repo(v: &Video) -> bool {
    !v.repo.is_empty()
}

fn is_publish_pending(v: &Video) -> bool {
    !v.upload_video.is_empty() && !v.tweet.is_empty()
}

fn is_edit_requested(v: &Video) -> bool {
    v.request_edit
}

// Thumbnails and screenshots are not part of "material done".
fn is_material_done(v: &Video) -> bool {
    v.code && v.screen && v.head && v.diagrams
}

fn is_scheduled(v: &Video) -> bool {
    !v.date.is_empty()
}

// ---------------------------------------------------------------------------
// Default rules (priority-ordered)
// ---------------------------------------------------------------------------

pub fn default_rules() -> Vec<Rule> {
    vec![
        // 1. Delayed overrides everything else
        rule! {
            id: "delayed",
            condition: is_delayed,
            phase: Phase::Delayed
        },
        // 2. Sponsor is holding the video back
        rule! {
            id: "sponsored_blocked",
            condition: is_sponsor_blocked,
            phase: Phase::SponsoredBlocked
        },
        // 3. Code repository recorded means it went out
        rule! {
            id: "published",
            condition: has_repo,
            phase: Phase::Published
        },
        // 4. Uploaded and announcement written
        rule! {
            id: "publish_pending",
            condition: is_publish_pending,
            phase: Phase::PublishPending
        },
        rule! {
            id: "edit_requested",
            condition: is_edit_requested,
            phase: Phase::EditRequested
        },
        rule! {
            id: "material_done",
            condition: is_material_done,
            phase: Phase::MaterialDone
        },
        rule! {
            id: "started",
            condition: is_scheduled,
            phase: Phase::Started
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{in_phase, Classifier, PhaseSummary};

    fn classify(v: &Video) -> Phase {
        Classifier::new(default_rules()).classify(v)
    }

    fn blank() -> Video {
        Video::new("v", "c")
    }

    /// Every combination of the eight phase-relevant signals.
    fn all_signal_combinations() -> Vec<Video> {
        (0u32..256)
            .map(|bits| {
                let on = |i: u32| bits & (1 << i) != 0;
                let mut v = blank();
                v.delayed = on(0);
                if on(1) {
                    v.sponsorship.blocked = "legal review".to_string();
                }
                if on(2) {
                    v.repo = "org/repo".to_string();
                }
                if on(3) {
                    v.upload_video = "v.mp4".to_string();
                }
                if on(4) {
                    v.tweet = "hello".to_string();
                }
                v.request_edit = on(5);
                let material = on(6);
                v.code = material;
                v.screen = material;
                v.head = material;
                v.diagrams = material;
                if on(7) {
                    v.date = "2030-01-21T16:00".to_string();
                }
                v
            })
            .collect()
    }

    #[test]
    fn fresh_video_is_idea() {
        assert_eq!(classify(&blank()), Phase::Ideas);
    }

    #[test]
    fn empty_record_is_idea() {
        assert_eq!(classify(&Video::default()), Phase::Ideas);
    }

    #[test]
    fn date_only_is_started() {
        let mut v = blank();
        v.date = "2030-01-21T16:00".to_string();
        assert_eq!(classify(&v), Phase::Started);
    }

    #[test]
    fn material_flags_without_date_is_material_done() {
        let mut v = blank();
        v.code = true;
        v.screen = true;
        v.head = true;
        v.diagrams = true;
        assert_eq!(classify(&v), Phase::MaterialDone);
    }

    #[test]
    fn thumbnails_and_screenshots_do_not_count_toward_material() {
        let mut v = blank();
        v.code = true;
        v.screen = true;
        v.head = true;
        v.thumbnails = true;
        v.screenshots = true;
        assert_eq!(classify(&v), Phase::Ideas);
    }

    #[test]
    fn publish_pending_then_published() {
        let mut v = blank();
        v.upload_video = "v.mp4".to_string();
        v.tweet = "hello".to_string();
        assert_eq!(classify(&v), Phase::PublishPending);
        v.repo = "org/repo".to_string();
        assert_eq!(classify(&v), Phase::Published);
    }

    #[test]
    fn upload_without_tweet_is_not_pending() {
        let mut v = blank();
        v.upload_video = "v.mp4".to_string();
        assert_eq!(classify(&v), Phase::Ideas);
    }

    #[test]
    fn edit_requested_beats_material_done() {
        let mut v = blank();
        v.code = true;
        v.screen = true;
        v.head = true;
        v.diagrams = true;
        v.request_edit = true;
        assert_eq!(classify(&v), Phase::EditRequested);
    }

    #[test]
    fn sponsor_block_beats_published() {
        let mut v = blank();
        v.repo = "org/repo".to_string();
        v.sponsorship.blocked = "contract".to_string();
        assert_eq!(classify(&v), Phase::SponsoredBlocked);
    }

    #[test]
    fn delayed_wins_over_every_combination() {
        for v in all_signal_combinations().into_iter().filter(|v| v.delayed) {
            assert_eq!(classify(&v), Phase::Delayed);
        }
    }

    #[test]
    fn classification_is_total_and_stable() {
        for v in all_signal_combinations() {
            let first = classify(&v);
            assert!(Phase::all().contains(&first));
            assert_eq!(classify(&v), first);
        }
    }

    #[test]
    fn clearing_a_field_moves_phase_back() {
        let mut v = blank();
        v.upload_video = "v.mp4".to_string();
        v.tweet = "hello".to_string();
        v.repo = "org/repo".to_string();
        assert_eq!(classify(&v), Phase::Published);
        v.repo.clear();
        assert_eq!(classify(&v), Phase::PublishPending);
    }

    #[test]
    fn matching_rule_reports_id() {
        let classifier = Classifier::new(default_rules());
        let mut v = blank();
        assert!(classifier.matching_rule(&v).is_none());
        v.delayed = true;
        assert_eq!(classifier.matching_rule(&v).unwrap().id, "delayed");
    }

    #[test]
    fn phase_summary_counts_every_phase() {
        let mut started = blank();
        started.date = "2030-01-21T16:00".to_string();
        let mut delayed = blank();
        delayed.delayed = true;
        let videos = vec![blank(), started.clone(), started, delayed];

        let summary = PhaseSummary::from_videos(&videos);
        assert_eq!(summary.phases.len(), 8);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(Phase::Started), 2);
        assert_eq!(summary.count(Phase::Delayed), 1);
        assert_eq!(summary.count(Phase::Ideas), 1);
        assert_eq!(summary.count(Phase::Published), 0);
        let sum: usize = summary.phases.iter().map(|c| c.count).sum();
        assert_eq!(sum, summary.total);
    }

    #[test]
    fn in_phase_filters() {
        let mut started = blank();
        started.date = "2030-01-21T16:00".to_string();
        let videos = vec![blank(), started];
        let ideas = in_phase(videos, Phase::Ideas);
        assert_eq!(ideas.len(), 1);
        assert!(ideas[0].date.is_empty());
    }
}
