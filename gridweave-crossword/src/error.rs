use thiserror::Error;

/// Errors surfaced by problem construction and model interpretation.
///
/// Unsatisfiability is *not* an error: it is a normal solver verdict. The variants here abort the
/// encoding session before any clause reaches a solver, except for
/// [AmbiguousPlacement](Self::AmbiguousPlacement) which flags a defect in the encoding itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrosswordError {
    /// No usable word remained after trimming and deduplication.
    #[error("word list is empty")]
    EmptyWordList,

    /// The grid dimension (side or radius) was zero or negative.
    #[error("grid dimension must be positive, got {0}")]
    NonPositiveDimension(i64),

    /// The grid dimension exceeds what the cell addressing supports.
    #[error("grid dimension {value} exceeds the supported maximum {max}")]
    DimensionTooLarge { value: i64, max: i64 },

    /// The requested quality floor was negative.
    #[error("minimum quality must be non-negative, got {0}")]
    NegativeQuality(i64),

    /// A word cannot fit on any line of the grid.
    #[error("\"{word}\" has {length} letters but the longest line of the grid holds {max}")]
    WordTooLong {
        word: String,
        length: usize,
        max: usize,
    },

    /// A model assigned more than one placement to a word. The at-most-one constraint forbids
    /// this, so a well-formed solver can never produce it.
    #[error("word \"{word}\" has {count} placements in the model; the encoding admits at most one")]
    AmbiguousPlacement { word: String, count: usize },
}
