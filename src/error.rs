use thiserror::Error;

// Errors produced by the pure trait-inference engine. The engine never fails
// for a heuristic outcome (all-neutral alignment, zero-score race ties); only
// contract violations at its boundary are errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid answer vector: {0}")]
    InvalidInput(String), // Malformed or undersized answer vector, rejected before any computation.

    #[error("no candidate: {0}")]
    NoCandidate(String), // A scorer was handed an empty candidate set.
}

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError), // Contract violations in the trait-inference core.

    #[error("Rules data error: {0}")]
    Rules(String), // Errors specific to the rules-data source or its cache.

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error), // HTTP transport errors from any collaborator.

    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError), // Errors from the language-model endpoint.

    #[error("Text generation error: {0}")]
    TextGeneration(String), // The language model answered but not usably.

    #[error("Portrait generation error: {0}")]
    Portrait(String), // The image model failed or returned no image.

    #[error("PDF rendering error: {0}")]
    Pdf(String), // Errors from the PDF layout layer.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to data serialization.

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.

    #[error("Timeout occurred")]
    Timeout, // Error when an external call exceeds its allotted time.

    #[error("No character has been generated yet")]
    NoCharacter, // A sheet/portrait endpoint was hit before any submission.
}

impl From<pdfium_render::prelude::PdfiumError> for AppError {
    fn from(err: pdfium_render::prelude::PdfiumError) -> Self {
        AppError::Pdf(err.to_string())
    }
}
