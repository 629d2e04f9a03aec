use thiserror::Error;

pub type ThemeResult<T> = Result<T, ThemeError>;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Invalid theme variable name '{name}': use lowercase letters, digits and underscores, starting with a letter and not ending with '_'")]
    InvalidName { name: String },

    #[error("Theme variable '{name}' needs a light or dark value")]
    MissingValue { name: String },

    #[error("Theme variable '{name}' has identical light and dark values; use 'light' only")]
    IdenticalValues { name: String },

    #[error("Theme variable '{name}' is defined more than once")]
    Duplicate { name: String },

    #[error("Invalid theme variable table: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThemeError {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::InvalidName { name }
            | Self::MissingValue { name }
            | Self::IdenticalValues { name }
            | Self::Duplicate { name } => Some(name),
            Self::Json(_) => None,
        }
    }
}
