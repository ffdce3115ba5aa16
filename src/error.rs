use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Failed to decode input bitmap: {0}")]
    Decode(String),

    #[error("Failed to render output bitmap: {0}")]
    Render(String),

    #[error("Invalid threshold edges: low edge {low} must be below high edge {high}")]
    InvalidThresholdEdges { low: f32, high: f32 },
}
