//! Widget state machine and its projection onto the display surface.
//!
//! The rendering layer never mutates UI elements directly: it asks the current
//! [`ViewState`] for [`DisplayInstructions`] and paints those.

pub const TRIGGER_LABEL_IDLE: &str = "Fetch Data";
pub const TRIGGER_LABEL_BUSY: &str = "Fetching...";

#[derive(Debug, Clone, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    /// Rendered markup of the last successful response.
    #[strum(to_string = "success")]
    Success(String),
    /// Human-readable failure message.
    #[strum(to_string = "error")]
    Error(String),
}

/// What the display surface should show for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInstructions {
    pub loading_visible: bool,
    pub trigger_enabled: bool,
    pub trigger_label: &'static str,
    /// Replaces the content region wholesale when present; hidden otherwise.
    pub content: Option<String>,
    /// Error banner text; hidden when absent.
    pub error: Option<String>,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn display(&self) -> DisplayInstructions {
        let idle = DisplayInstructions {
            loading_visible: false,
            trigger_enabled: true,
            trigger_label: TRIGGER_LABEL_IDLE,
            content: None,
            error: None,
        };

        match self {
            Self::Idle => idle,
            Self::Loading => DisplayInstructions {
                loading_visible: true,
                trigger_enabled: false,
                trigger_label: TRIGGER_LABEL_BUSY,
                ..idle
            },
            Self::Success(markup) => DisplayInstructions {
                content: Some(markup.clone()),
                ..idle
            },
            Self::Error(message) => DisplayInstructions {
                error: Some(message.clone()),
                ..idle
            },
        }
    }
}
