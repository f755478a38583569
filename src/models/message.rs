use serde::{Deserialize, Serialize};

/// Placeholder rendered for any display field missing from the event body.
pub const MISSING_FIELD: &str = "—";

/// A Slack incoming-webhook payload: a plain-text fallback plus Block Kit
/// blocks for rich rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: TextObject },
    Section { fields: Vec<TextObject> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl Block {
    pub fn header(title: &str) -> Self {
        Block::Header {
            text: TextObject::PlainText {
                text: title.to_string(),
            },
        }
    }

    /// Two-column section of labeled fields; `None` values render as the
    /// missing-field placeholder.
    pub fn field_section(fields: &[(&str, Option<String>)]) -> Self {
        Block::Section {
            fields: fields
                .iter()
                .map(|(label, value)| TextObject::Mrkdwn {
                    text: format!(
                        "*{}:*\n{}",
                        label,
                        value.as_deref().unwrap_or(MISSING_FIELD)
                    ),
                })
                .collect(),
        }
    }
}

impl SlackMessage {
    pub fn new(text: String, blocks: Vec<Block>) -> Self {
        Self { text, blocks }
    }
}
