//! Error types shared by the stacking core and its file collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, StackError>;

#[derive(Debug, Error)]
pub enum StackError {
    /// A layer spec names a structure that is not among the base layers.
    #[error("layer '{name}' not found in base layers")]
    UnknownLayer { name: String },

    /// A layer spec asks for a non-positive number of repetitions.
    #[error("number of layers must be positive, got {count} for layer '{name}'")]
    InvalidCount { name: String, count: i64 },

    /// The matcher exhausted its area budget. Layer names are known only to the pipeline.
    #[error(
        "no lattice match{pairing} (max_area = {max_area} Å², max_misfit = {max_misfit}); \
         try a larger max_area or max_misfit",
        pairing = pairing_label(.film, .substrate)
    )]
    NoMatchFound {
        film: Option<String>,
        substrate: Option<String>,
        max_misfit: f64,
        max_area: f64,
    },

    /// The layer sequence was empty.
    #[error("heterostructure layer sequence is empty")]
    EmptyInput,

    /// A supercell transformation with zero determinant.
    #[error("supercell transformation {0:?} is singular")]
    SingularTransform([[i32; 2]; 2]),

    /// A cell whose lattice vectors do not span 3D space.
    #[error("cell matrix is singular")]
    SingularCell,

    /// Species and positions that do not line up.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    #[error("invalid options at '{field}': {message}")]
    InvalidOptions { field: String, message: String },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

fn pairing_label(film: &Option<String>, substrate: &Option<String>) -> String {
    match (film, substrate) {
        (Some(film), Some(substrate)) => {
            format!(" for film '{}' on substrate '{}'", film, substrate)
        }
        (Some(film), None) => format!(" for film '{}'", film),
        (None, Some(substrate)) => format!(" on substrate '{}'", substrate),
        (None, None) => String::new(),
    }
}

impl StackError {
    /// Attach layer names to a `NoMatchFound` raised by the matcher, which only knows lattices.
    pub fn with_pairing(self, film: &str, substrate: &str) -> Self {
        match self {
            StackError::NoMatchFound {
                max_misfit,
                max_area,
                ..
            } => StackError::NoMatchFound {
                film: Some(film.to_string()),
                substrate: Some(substrate.to_string()),
                max_misfit,
                max_area,
            },
            other => other,
        }
    }
}
