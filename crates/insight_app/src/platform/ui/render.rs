use colored::Colorize;
use insight_core::{
    ActiveView, AppViewModel, HistoryView, InsightBadge, InsightCardView, UploadPhase, UploadView,
};

use super::constants::*;
use super::layout;

/// Renders the whole screen as lines of text.
pub fn render(view: &AppViewModel, status: &str) -> Vec<String> {
    let mut lines = layout::header(view.active);
    match view.active {
        ActiveView::Upload => {
            if let Some(upload) = &view.upload {
                lines.extend(render_upload(upload));
            }
        }
        ActiveView::History => {
            if let Some(history) = &view.history {
                lines.extend(render_history(history));
            }
        }
    }
    lines.extend(layout::footer(status));
    lines
}

fn render_upload(upload: &UploadView) -> Vec<String> {
    let mut lines = vec![UPLOAD_HEADING.bold().to_string(), String::new()];

    match &upload.selected_file {
        None => lines.push(DROP_ZONE_HINT.to_string()),
        Some(file) => {
            lines.push(format!("Selected: {} ({})", file.name, file.size_kb));
            if upload.can_analyze() {
                lines.push("Type `analyze` to submit or `remove` to clear.".to_string());
            }
        }
    }

    if upload.is_uploading() {
        lines.push(String::new());
        lines.push(ANALYZING.to_string());
        lines.push(progress_bar(upload.progress_percent));
    } else if upload.phase == UploadPhase::Succeeded && upload.progress_percent > 0 {
        lines.push(String::new());
        lines.push(progress_bar(upload.progress_percent));
    }

    if let Some(error) = &upload.error {
        lines.push(String::new());
        lines.push(error.red().to_string());
    }

    if upload.phase == UploadPhase::Failed {
        lines.push("Type `reset` to choose another file.".to_string());
    }

    if let Some(card) = &upload.result {
        lines.push(String::new());
        lines.push(RESULT_HEADING.bold().to_string());
        lines.extend(render_card(card));
        lines.push(String::new());
        lines.push("Type `another` to upload another resume.".to_string());
    }
    lines
}

fn render_history(history: &HistoryView) -> Vec<String> {
    let mut lines = vec![HISTORY_HEADING.bold().to_string(), String::new()];
    match history {
        HistoryView::Loading => lines.push(HISTORY_LOADING.to_string()),
        HistoryView::Failed { message } => {
            lines.push(message.red().to_string());
            lines.push("Type `retry` to try again.".to_string());
        }
        HistoryView::Empty => {
            lines.push(HISTORY_EMPTY_TITLE.bold().to_string());
            lines.push(HISTORY_EMPTY_HINT.to_string());
        }
        HistoryView::Loaded { cards } => {
            for (index, card) in cards.iter().enumerate() {
                if index > 0 {
                    lines.push(String::new());
                }
                lines.extend(render_card(card));
            }
        }
    }
    lines
}

/// One insight card. Sections without data are omitted entirely.
fn render_card(card: &InsightCardView) -> Vec<String> {
    let mut lines = vec![
        format!("{}  {}", card.file_name.bold(), badge(card)),
        format!("Uploaded: {}", card.uploaded),
    ];
    if let Some(summary) = &card.summary {
        lines.push("Summary:".underline().to_string());
        lines.push(format!("  {}", summary));
    }
    if let Some(recommendation) = &card.recommendation {
        lines.push("Recommendation:".underline().to_string());
        lines.push(format!("  {}", recommendation));
    }
    if !card.top_words.is_empty() {
        lines.push(format!("Top Words: {}", card.top_words.join(", ")));
    }
    lines.push(format!("View Details: `details {}`", card.id).dimmed().to_string());
    lines
}

fn badge(card: &InsightCardView) -> String {
    let label = format!("[{}]", card.insight_type);
    match card.badge {
        InsightBadge::AiSummary => label.green().bold().to_string(),
        InsightBadge::FrequentWords => label.blue().bold().to_string(),
        InsightBadge::Neutral => label,
    }
}

fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = PROGRESS_BAR_WIDTH * percent / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        percent
    )
}
