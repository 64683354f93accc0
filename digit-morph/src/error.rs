use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("digit {0} is outside 0..=9")]
    DigitOutOfRange(u32),
    #[error("{0:?} is not a decimal digit")]
    NotADigit(char),
    #[error("font size must be finite and positive, got {0}")]
    InvalidFontSize(f64),
    #[error("morph config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
