use serde::{Deserialize, Serialize};

/// What the worker should summarize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskSource {
    /// Channel history from the last `hours` hours.
    ChannelHistory { hours: u32 },
    /// Text pasted into the command, one synthetic message per paragraph.
    PastedText { sections: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingTask {
    pub correlation_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub response_url: Option<String>,
    pub source: TaskSource,
    pub detail: Option<String>,
}

impl ProcessingTask {
    /// Unit name used when reporting how much input was processed.
    #[must_use]
    pub fn unit_label(&self) -> &'static str {
        match self.source {
            TaskSource::ChannelHistory { .. } => "messages",
            TaskSource::PastedText { .. } => "sections",
        }
    }
}
