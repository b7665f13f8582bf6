pub const APP_TITLE: &str = "Resume Insight";
pub const NAV_UPLOAD: &str = "Upload";
pub const NAV_HISTORY: &str = "History";

pub const UPLOAD_HEADING: &str = "Upload Resume";
pub const DROP_ZONE_HINT: &str = "Drop a PDF resume here: `drop <path>` or `pick <path>`";
pub const ANALYZING: &str = "Analyzing...";
pub const RESULT_HEADING: &str = "Analysis Result";

pub const HISTORY_HEADING: &str = "Analysis History";
pub const HISTORY_LOADING: &str = "Loading analyses...";
pub const HISTORY_EMPTY_TITLE: &str = "No analyses yet";
pub const HISTORY_EMPTY_HINT: &str = "Upload your first resume to see analysis results here.";

pub const PROGRESS_BAR_WIDTH: usize = 30;
pub const RULE_WIDTH: usize = 60;

pub const COMMAND_HINT: &str =
    "Commands: upload | history | pick <path> | drop <paths> | analyze | reset | retry | details <id> | help | quit";

pub const HELP_TEXT: &str = "upload/u, history/h: switch view. \
pick <path>: choose a file. drop <paths>: drop files. \
analyze/a: submit the selected PDF. reset/another: start over. \
retry/r: reload history. details <id>: view details. quit/q: exit.";
