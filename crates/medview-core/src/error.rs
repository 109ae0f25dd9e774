use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedviewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Slice index {index} out of range (total: {total})")]
    SliceIndexOutOfRange { index: usize, total: usize },

    #[error("Empty slice series")]
    EmptySeries,

    #[error("Unknown window/level preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, MedviewError>;
