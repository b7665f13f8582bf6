use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::state::UploadState;
use crate::{ActiveView, InsightRecord, UploadPhase};

pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active: ActiveView,
    pub upload: Option<UploadView>,
    pub history: Option<HistoryView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub phase: UploadPhase,
    pub selected_file: Option<SelectedFileView>,
    /// Whole percent, only while a submission is in flight or just settled.
    pub progress_percent: u8,
    pub error: Option<String>,
    pub result: Option<InsightCardView>,
}

impl UploadView {
    pub(crate) fn from_state(upload: &UploadState, offset: &FixedOffset) -> Self {
        Self {
            phase: upload.phase,
            selected_file: upload.selected_file.as_ref().map(|file| SelectedFileView {
                name: file.name.clone(),
                size_kb: format!("{:.1} KB", file.size_bytes as f64 / 1024.0),
            }),
            progress_percent: upload.progress_estimate.clamp(0.0, 100.0).floor() as u8,
            error: upload.last_error.clone(),
            result: upload
                .last_result
                .as_ref()
                .map(|record| InsightCardView::new(record, offset)),
        }
    }

    pub fn show_drop_zone(&self) -> bool {
        self.selected_file.is_none()
    }

    pub fn can_analyze(&self) -> bool {
        self.phase == UploadPhase::FileSelected
    }

    pub fn is_uploading(&self) -> bool {
        self.phase == UploadPhase::Submitting
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub size_kb: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Loading,
    Failed { message: String },
    Empty,
    Loaded { cards: Vec<InsightCardView> },
}

/// Display style chosen from an insight type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightBadge {
    AiSummary,
    FrequentWords,
    Neutral,
}

impl InsightBadge {
    pub fn for_label(label: &str) -> Self {
        match label {
            "AI Summary" => InsightBadge::AiSummary,
            "Frequent Words" => InsightBadge::FrequentWords,
            _ => InsightBadge::Neutral,
        }
    }
}

/// Structured projection of one [`InsightRecord`] for display.
///
/// Optional sections are `None`/empty when the record has nothing to show, so
/// renderers never emit an empty heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightCardView {
    pub id: String,
    pub file_name: String,
    pub uploaded: String,
    pub insight_type: String,
    pub badge: InsightBadge,
    pub summary: Option<String>,
    pub recommendation: Option<String>,
    pub top_words: Vec<String>,
}

impl InsightCardView {
    pub fn new(record: &InsightRecord, offset: &FixedOffset) -> Self {
        Self {
            id: record.id.clone(),
            file_name: record.file_name.clone(),
            uploaded: format_upload_date(&record.upload_date, offset),
            insight_type: record.insight_type.clone(),
            badge: InsightBadge::for_label(&record.insight_type),
            summary: non_empty(record.summary.as_deref()),
            recommendation: non_empty(record.recommendation.as_deref()),
            top_words: record.top_words.clone().unwrap_or_default(),
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|value| !value.trim().is_empty())
        .map(ToOwned::to_owned)
}

/// Formats an ISO-8601 timestamp as a long en-US date/time in `offset`.
///
/// Timestamps without an offset are taken as UTC. Anything unparseable yields
/// [`INVALID_DATE`].
pub fn format_upload_date(raw: &str, offset: &FixedOffset) -> String {
    match parse_timestamp(raw.trim()) {
        Some(instant) => instant
            .with_timezone(offset)
            .format("%B %-d, %Y at %I:%M %p")
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}
