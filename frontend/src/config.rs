use web_sys::Document;

/// Backend used when the page does not name one.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_META_SELECTOR: &str = r#"meta[name="taskboard-api"]"#;
const BOARD_ATTRIBUTE: &str = "data-task-board";

/// Page-level settings, read once by the composition root.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Origin (and optional prefix) of the task API, without a trailing slash.
    pub api_base: String,
    /// Whether this page hosts the task board.
    pub mount_board: bool,
}

impl Config {
    pub fn new(api_base: Option<&str>, mount_board: bool) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Self { api_base, mount_board }
    }

    /// `<meta name="taskboard-api" content="...">` sets the API base,
    /// `<body data-task-board>` enables the board.
    pub fn from_document(document: &Document) -> Self {
        let api_base = document
            .query_selector(API_META_SELECTOR)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"));
        let mount_board = document
            .body()
            .map(|body| body.has_attribute(BOARD_ATTRIBUTE))
            .unwrap_or(false);
        Self::new(api_base.as_deref(), mount_board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn falls_back_to_default_base() {
        assert_eq!(Config::new(None, true).api_base, "http://localhost:5000");
        assert_eq!(Config::new(Some("   "), true).api_base, "http://localhost:5000");
    }

    #[test]
    fn strips_trailing_slashes() {
        assert_eq!(Config::new(Some("https://tasks.example.com/api//"), false).api_base, "https://tasks.example.com/api");
    }

    #[test]
    fn root_base_means_same_origin() {
        assert_eq!(Config::new(Some("/"), true).api_base, "");
    }
}
