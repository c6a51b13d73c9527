use thiserror::Error;

/// Everything that can go wrong inside the engine.
///
/// Construction failures are fatal for the die being built. Incompatible
/// dice and invalid result types are caller errors. Verification failures
/// indicate a defect in a calculator and should never occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    Construction(String),
    #[error("{calculator} can not handle these dice")]
    IncompatibleDice { calculator: &'static str },
    #[error("`{0}` is not a valid result type")]
    InvalidResultType(String),
    #[error("calculator {calculator} returned invalid results")]
    Verification { calculator: &'static str },
    #[error("dice with non-numeric sides require a vector algebra extension")]
    MissingExtension,
}

impl Error {
    pub(crate) fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
