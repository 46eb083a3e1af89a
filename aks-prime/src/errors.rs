#[derive(thiserror::Error, Debug)]
pub enum AksError {
    /// Error when creating a ring with an invalid modulus (m == 0).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    /// Error when creating a quotient ring with an invalid width (r == 0).
    #[error("InvalidWidth: {0}")]
    InvalidWidth(String),
    #[error("WidthMismatch: expected {expected} coefficients, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("Invalid number {0}. Please enter a positive number.")]
    InvalidNumber(u64),
    #[error(
        "Invalid bounds ({lo},{hi}). Please make sure you entered positive numbers in increasing order."
    )]
    InvalidRange { lo: u64, hi: u64 },

    #[error("Primality decision was cancelled")]
    Cancelled,

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
