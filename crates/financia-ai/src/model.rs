use serde_json::Value;

use crate::AiError;

/// One structured-output call to the external model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    /// JSON schema the response text must conform to.
    pub response_schema: Value,
}

/// Seam to the external generative model. Implementations return the raw
/// response text; validation happens in [`crate::payload`].
pub trait GenerativeModel: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;

    /// Identifier used in logs.
    fn name(&self) -> &str;
}

/// Stand-in used when AI assistance is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledModel;

impl GenerativeModel for DisabledModel {
    fn generate(&self, _request: &GenerationRequest) -> Result<String, AiError> {
        Err(AiError::Disabled)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
