use thiserror::Error;

/// Errors raised while loading the key registry.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to read key registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid key registry: {0}")]
    Config(#[from] toml::de::Error),
}

/// Access denied.
///
/// Carries no detail on purpose: a missing key, an unknown key and a key
/// whose owner no longer exists are indistinguishable to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Forbidden")]
pub struct Forbidden;

impl Forbidden {
    /// HTTP status code for the rejection.
    pub const fn status_code(self) -> u16 {
        403
    }
}
