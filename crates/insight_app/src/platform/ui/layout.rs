use colored::Colorize;
use insight_core::ActiveView;

use super::constants::*;

/// Title line and navigation tabs, with the active view highlighted.
pub fn header(active: ActiveView) -> Vec<String> {
    let tab = |label: &str, view: ActiveView| {
        if view == active {
            format!("[{}]", label).bold().to_string()
        } else {
            format!(" {} ", label).dimmed().to_string()
        }
    };
    vec![
        APP_TITLE.bold().to_string(),
        format!(
            "{}  {}",
            tab(NAV_UPLOAD, ActiveView::Upload),
            tab(NAV_HISTORY, ActiveView::History)
        ),
        rule(),
    ]
}

pub fn footer(status: &str) -> Vec<String> {
    let mut lines = vec![String::new(), rule()];
    if !status.is_empty() {
        lines.push(status.to_string());
    }
    lines.push(COMMAND_HINT.dimmed().to_string());
    lines
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}
