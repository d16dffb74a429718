#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Pipeline parameter loading.
pub mod config;
/// Path layout, split defaults, and canonical column names.
pub mod constants;
mod errors;
/// Feature engineering stage.
pub mod features;
/// Minimal tabular frame backing the CSV artifacts.
pub mod frame;
/// Ingestion stage.
pub mod ingestion;
/// Per-stage logging contexts.
pub mod logging;
/// Preprocessing stage and label encoding.
pub mod preprocessing;
/// Text normalization (tokenization, stopwords, stemming).
pub mod text;
/// TF-IDF vectorization.
pub mod tfidf;
/// Shared type aliases.
pub mod types;

pub use config::{load_params, FeatureParams, Params};
pub use errors::PipelineError;
pub use frame::Frame;
pub use logging::{init_stage_logging, LogContext};
pub use preprocessing::LabelEncoder;
pub use text::normalize_text;
pub use tfidf::{FittedTfidf, TfidfVectorizer};
pub use types::{ClassId, ColumnName, Label, Token};
