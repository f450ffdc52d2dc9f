use folio_models::contact::ContactSubmission;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    #[serde(default)]
    pub name: Option<String>,
    /// Reply address of the sender
    #[serde(default)]
    pub email: Option<String>,
    /// Content of the message
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSuccess {
    pub success: bool,
    pub message: &'static str,
}
