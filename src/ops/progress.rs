use rand::Rng;
use rand::seq::IndexedRandom;

use crate::model::settings::{Settings, Surprise};
use crate::model::stats::Stats;
use crate::model::task::{MAX_PROGRESS, Task};
use crate::ops::registry::TaskError;

/// Progress values that earn a motivational message
pub const MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Every Nth completed task queues a marquee celebration
pub const CELEBRATE_EVERY: u32 = 5;

const MOTIVATION_25: &[&str] = &[
    "\u{1F4A5} Great start! You're a quarter of the way!",
    "\u{1F680} 25% already, impressive!",
];
const MOTIVATION_50: &[&str] = &[
    "\u{1F3C6} Halfway there! Keep going!",
    "\u{2B50} 50%, you're on a roll!",
];
const MOTIVATION_75: &[&str] = &[
    "\u{1F525} 75%, almost at the finish line!",
    "\u{1F4AA} Three quarters done, finish it!",
];
const MOTIVATION_100: &[&str] = &[
    "\u{1F389} WOW, task complete!",
    "\u{1F973} Fantastic job, task crushed!",
];

/// The fixed message set for a milestone value
pub fn motivation_for(progress: u8) -> Option<&'static [&'static str]> {
    match progress {
        25 => Some(MOTIVATION_25),
        50 => Some(MOTIVATION_50),
        75 => Some(MOTIVATION_75),
        100 => Some(MOTIVATION_100),
        _ => None,
    }
}

/// Outcome of moving a task's slider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressChange {
    /// The new value equals the stored one; nothing happened
    Unchanged,
    Changed {
        from: u8,
        to: u8,
        /// Motivational message when `to` is a milestone
        message: Option<&'static str>,
    },
}

impl ProgressChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, ProgressChange::Changed { .. })
    }

    pub fn reached_completion(&self) -> bool {
        matches!(self, ProgressChange::Changed { to, .. } if *to >= MAX_PROGRESS)
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            ProgressChange::Changed { message, .. } => *message,
            ProgressChange::Unchanged => None,
        }
    }
}

/// Set a task's progress, picking a milestone message if one applies.
pub fn apply_progress<R: Rng + ?Sized>(
    task: &mut Task,
    value: u8,
    rng: &mut R,
) -> Result<ProgressChange, TaskError> {
    if value > MAX_PROGRESS {
        return Err(TaskError::ProgressOutOfRange(value));
    }
    if value == task.progress {
        return Ok(ProgressChange::Unchanged);
    }
    let from = task.progress;
    task.progress = value;
    let message = motivation_for(value).and_then(|set| set.choose(rng).copied());
    Ok(ProgressChange::Changed {
        from,
        to: value,
        message,
    })
}

/// Side effects of a task reaching 100%
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Lifetime completed count after this task
    pub completed_count: u32,
    /// The configured surprise to show right away
    pub surprise: Surprise,
    /// Whether a marquee celebration was queued for the next render pass
    pub celebration_queued: bool,
}

/// Count a completion and queue a celebration on every fifth one
pub fn record_completion(
    stats: &mut Stats,
    settings: &Settings,
    slot: &mut CelebrationSlot,
) -> Completion {
    let completed_count = stats.record_completion();
    let celebration_queued = completed_count % CELEBRATE_EVERY == 0;
    if celebration_queued {
        slot.push(settings.marquee_emoji.clone());
    }
    Completion {
        completed_count,
        surprise: settings.surprise(),
        celebration_queued,
    }
}

/// Holds at most one pending celebration (the marquee emoji) until the next
/// render pass takes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CelebrationSlot {
    pending: Option<String>,
}

impl CelebrationSlot {
    /// Queue a celebration, replacing any still pending
    pub fn push(&mut self, emoji: String) {
        self.pending = Some(emoji);
    }

    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::SurpriseMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn task_at(progress: u8) -> Task {
        Task {
            progress,
            ..Task::new("T".into(), String::new(), None)
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn same_value_is_a_no_op() {
        let mut task = task_at(50);
        let change = apply_progress(&mut task, 50, &mut rng()).unwrap();
        assert_eq!(change, ProgressChange::Unchanged);
        assert_eq!(change.message(), None);
        assert_eq!(task.progress, 50);
    }

    #[test]
    fn non_milestone_change_has_no_message() {
        let mut task = task_at(0);
        let change = apply_progress(&mut task, 30, &mut rng()).unwrap();
        assert_eq!(
            change,
            ProgressChange::Changed {
                from: 0,
                to: 30,
                message: None
            }
        );
        assert_eq!(task.progress, 30);
    }

    #[test]
    fn each_milestone_picks_from_its_own_set() {
        let mut rng = rng();
        for milestone in MILESTONES {
            let mut task = task_at(milestone - 1);
            let change = apply_progress(&mut task, milestone, &mut rng).unwrap();
            let message = change.message().unwrap();
            assert!(motivation_for(milestone).unwrap().contains(&message));
        }
    }

    #[test]
    fn moving_down_onto_a_milestone_fires_again() {
        let mut rng = rng();
        let mut task = task_at(60);
        assert!(apply_progress(&mut task, 50, &mut rng).unwrap().message().is_some());
        // Leaving a milestone downward is silent
        assert!(apply_progress(&mut task, 40, &mut rng).unwrap().message().is_none());
        assert!(apply_progress(&mut task, 50, &mut rng).unwrap().message().is_some());
    }

    #[test]
    fn over_100_is_rejected() {
        let mut task = task_at(10);
        assert_eq!(
            apply_progress(&mut task, 101, &mut rng()),
            Err(TaskError::ProgressOutOfRange(101))
        );
        assert_eq!(task.progress, 10);
    }

    #[test]
    fn completion_is_detected() {
        let mut task = task_at(99);
        let change = apply_progress(&mut task, 100, &mut rng()).unwrap();
        assert!(change.reached_completion());
        assert!(task.is_complete());
    }

    #[test]
    fn fifth_completion_queues_marquee_once() {
        let mut stats = Stats { completed_count: 3 };
        let settings = Settings::default();
        let mut slot = CelebrationSlot::default();

        let fourth = record_completion(&mut stats, &settings, &mut slot);
        assert_eq!(fourth.completed_count, 4);
        assert!(!fourth.celebration_queued);
        assert!(!slot.is_pending());

        let fifth = record_completion(&mut stats, &settings, &mut slot);
        assert_eq!(fifth.completed_count, 5);
        assert!(fifth.celebration_queued);
        assert_eq!(slot.take(), Some("\u{1F680}".to_string()));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn completion_carries_configured_surprise() {
        let mut stats = Stats::default();
        let settings = Settings {
            mode: SurpriseMode::Css,
            banner_text: "GG".into(),
            ..Settings::default()
        };
        let completion = record_completion(&mut stats, &settings, &mut CelebrationSlot::default());
        assert_eq!(completion.surprise, Surprise::Banner("GG".into()));
    }
}
