use sitejsx_convert::ConvertError;

/// Errors that can occur while emitting pages.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Invalid asset map {path}: {message}")]
    AssetMapError { path: String, message: String },

    #[error("Pages directory not found: {0}")]
    MissingPagesDir(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Generated JSX does not parse: {0}")]
    InvalidJsx(String),

    #[error("CSS error: {0}")]
    CssError(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl From<minijinja::Error> for EmitError {
    fn from(err: minijinja::Error) -> Self {
        EmitError::TemplateError(err.to_string())
    }
}
