pub mod delivery;
pub mod metric;
pub mod poll;

/// Failure taxonomy shared by the handlers. All variants are fatal for the
/// invocation and bubble to the hosting runtime; a poll timeout is a normal
/// return, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    Input(String),
    Remote(String),
    Decode(String),
}

impl HandlerError {
    pub fn message(&self) -> &str {
        match self {
            Self::Input(message) | Self::Remote(message) | Self::Decode(message) => message,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(message) => write!(f, "input error: {message}"),
            Self::Remote(message) => write!(f, "remote service error: {message}"),
            Self::Decode(message) => write!(f, "decode error: {message}"),
        }
    }
}

impl std::error::Error for HandlerError {}
