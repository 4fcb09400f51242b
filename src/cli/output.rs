use serde::Serialize;

use crate::model::settings::{Settings, Surprise};
use crate::model::task::Task;
use crate::ops::session::{Celebration, ProgressOutcome};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<String>,
    pub progress: u8,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub active: usize,
    pub completed: u32,
}

#[derive(Serialize)]
pub struct SurpriseJson {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Serialize)]
pub struct ProgressJson {
    pub id: String,
    pub progress: u8,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surprise: Option<SurpriseJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        desc: task.description.clone(),
        wait_for: task.waiting_on().map(str::to_string),
        progress: task.progress,
    }
}

pub fn surprise_to_json(surprise: &Surprise) -> SurpriseJson {
    let (kind, value) = match surprise {
        Surprise::Gif(url) => ("gif", url),
        Surprise::Image(url) => ("image", url),
        Surprise::Banner(text) => ("banner", text),
    };
    SurpriseJson {
        kind,
        value: value.clone(),
    }
}

pub fn progress_to_json(
    outcome: &ProgressOutcome,
    progress: u8,
    celebration: Option<&Celebration>,
) -> ProgressJson {
    let completion = outcome.completion.as_ref();
    ProgressJson {
        id: outcome.task_id.clone(),
        progress,
        changed: outcome.change.is_changed(),
        message: outcome.change.message(),
        completed: completion.is_some(),
        completed_count: completion.map(|c| c.completed_count),
        surprise: completion.map(|c| surprise_to_json(&c.surprise)),
        celebration: celebration.map(|c| c.emoji.clone()),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a task as a one-line summary: `id-prefix  progress%  title`
pub fn format_task_line(task: &Task) -> String {
    let waiting = task
        .waiting_on()
        .map(|w| format!(" [waiting on {}]", w))
        .unwrap_or_default();
    format!(
        "{}  {:>3}%  {}{}",
        task.short_id(),
        task.progress,
        task.title,
        waiting
    )
}

pub fn format_surprise(surprise: &Surprise) -> String {
    match surprise {
        Surprise::Gif(url) => format!("GIF: {}", url),
        Surprise::Image(url) => format!("Image: {}", url),
        Surprise::Banner(text) => text.clone(),
    }
}

pub fn format_celebration(celebration: &Celebration) -> Vec<String> {
    vec![
        format!(
            "\u{2728} You have completed {} tasks! \u{2728}",
            celebration.completed_count
        ),
        [celebration.emoji.as_str(); 5].join(" "),
    ]
}

pub fn format_settings(settings: &Settings) -> Vec<String> {
    vec![
        format!("mode     {}", settings.mode),
        format!("gif      {}", settings.gif_url),
        format!("img      {}", settings.image_url),
        format!("banner   {}", settings.banner_text),
        format!("marquee  {}", settings.marquee_emoji),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(progress: u8, wait_for: Option<&str>) -> Task {
        let mut task = Task::new(
            "Write report".into(),
            String::new(),
            wait_for.map(str::to_string),
        );
        task.id = "0123456789abcdef".into();
        task.progress = progress;
        task
    }

    #[test]
    fn task_line() {
        assert_eq!(format_task_line(&task(5, None)), "01234567    5%  Write report");
        assert_eq!(
            format_task_line(&task(100, Some("finance"))),
            "01234567  100%  Write report [waiting on finance]"
        );
    }

    #[test]
    fn task_json_skips_empty_fields() {
        let json = serde_json::to_string(&task_to_json(&task(40, None))).unwrap();
        assert_eq!(
            json,
            r#"{"id":"0123456789abcdef","title":"Write report","progress":40}"#
        );
    }

    #[test]
    fn celebration_lines() {
        let lines = format_celebration(&Celebration {
            emoji: "*".into(),
            completed_count: 10,
        });
        assert_eq!(
            lines,
            vec!["\u{2728} You have completed 10 tasks! \u{2728}", "* * * * *"]
        );
    }

    #[test]
    fn settings_lines() {
        let lines = format_settings(&Settings::default());
        assert_eq!(lines[0], "mode     GIF");
        assert_eq!(lines[3], "banner   LEVEL UP! YOU DID IT!");
    }
}
