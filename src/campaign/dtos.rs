use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::campaign::schema::ContentPackage;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeRequest {
    #[serde(default)]
    pub content_url: String,
}

impl RepurposeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content_url.is_empty() {
            return Err("Article URL is required".to_string());
        }
        if self.content_url.len() > 2048 {
            return Err("URL too long".to_string());
        }
        Ok(())
    }
}

/// Success payload: the raw completion for diagnostics plus the package the
/// server already validated, so no client ever re-parses model output.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeResponse {
    pub repurposed_content: String,
    pub package: ContentPackage,
}
