use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ErrorItem>),
    Other(serde_json::Value),
}

/// One entry of a field-validation failure list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<String> {
        let message = match self.detail.as_ref()? {
            ErrorDetail::Message(text) => text.trim().to_string(),
            ErrorDetail::Items(items) => items
                .iter()
                .filter_map(|item| item.msg.as_deref())
                .map(str::trim)
                .filter(|msg| !msg.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            ErrorDetail::Other(_) => String::new(),
        };
        (!message.is_empty()).then_some(message)
    }
}
