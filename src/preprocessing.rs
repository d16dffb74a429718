//! Stage 2: encode labels to dense class ids, drop duplicate rows, and
//! normalize the message text of both raw partitions.

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use tracing::{debug, error};

use crate::constants::{paths, schema};
use crate::errors::PipelineError;
use crate::frame::{self, Frame};
use crate::text::normalize_text;
use crate::types::{ClassId, Label};

/// First-seen-order bijection from distinct label values to `0..k-1`.
///
/// One encoder is fitted per pipeline run, over the union of the train and
/// test label values, so both partitions share a single label→id mapping.
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder {
    classes: IndexSet<Label>,
}

impl LabelEncoder {
    /// Fit an encoder over `values`; ids follow first-seen order.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes = values.into_iter().map(|value| value.to_string()).collect();
        Self { classes }
    }

    /// Class id for `value`; fails when the value was not seen during fitting.
    pub fn encode(&self, value: &str) -> Result<ClassId, PipelineError> {
        self.classes.get_index_of(value).ok_or_else(|| {
            PipelineError::Unexpected(format!(
                "label '{value}' was not seen during encoder fitting"
            ))
        })
    }

    /// Distinct label values in id order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|label| label.as_str())
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` when no labels were fitted.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Preprocess one partition: encode `target_column` through `encoder`, drop
/// exact duplicate rows keeping the first occurrence, then normalize every
/// `text_column` value in place.
pub fn preprocess_frame(
    frame: &Frame,
    text_column: &str,
    target_column: &str,
    encoder: &LabelEncoder,
) -> Result<Frame, PipelineError> {
    debug!("starting preprocessing for partition ({} rows)", frame.len());
    let mut out = frame.clone();
    out.try_map_column(target_column, |value| {
        encoder.encode(value).map(|id| id.to_string())
    })
    .map_err(|err| {
        error!("failed to encode target column: {err}");
        err
    })?;
    debug!("target column encoded");

    out.dedup_rows();
    debug!("removed duplicates ({} rows remain)", out.len());

    out.map_column(text_column, normalize_text).map_err(|err| {
        error!("text column missing during normalization: {err}");
        err
    })?;
    debug!("text column normalized");
    Ok(out)
}

/// Read one raw partition, treating a missing or empty file as a load error.
fn load_raw(path: &Path) -> Result<Frame, PipelineError> {
    let frame = Frame::read_csv(path).map_err(|err| {
        error!("failed to load raw partition {}: {err}", path.display());
        PipelineError::Load {
            source_id: path.display().to_string(),
            reason: err.to_string(),
        }
    })?;
    if frame.is_empty() {
        error!("no data in raw partition {}", path.display());
        return Err(PipelineError::Load {
            source_id: path.display().to_string(),
            reason: "no data".to_string(),
        });
    }
    Ok(frame)
}

/// Run the preprocessing stage against an explicit data directory.
pub fn run_with(base: &Path) -> Result<(), PipelineError> {
    let raw_dir = base.join(paths::RAW_DIR);
    let train = load_raw(&raw_dir.join(paths::TRAIN_FILE))?;
    let test = load_raw(&raw_dir.join(paths::TEST_FILE))?;
    debug!("raw partitions loaded");

    // Train labels first so train order dominates id assignment.
    let train_labels = train.column(schema::TARGET_COLUMN).map_err(|err| {
        error!("target column missing from train partition: {err}");
        err
    })?;
    let test_labels = test.column(schema::TARGET_COLUMN).map_err(|err| {
        error!("target column missing from test partition: {err}");
        err
    })?;
    let encoder = LabelEncoder::fit(train_labels.into_iter().chain(test_labels));

    let train_processed =
        preprocess_frame(&train, schema::TEXT_COLUMN, schema::TARGET_COLUMN, &encoder)?;
    let test_processed =
        preprocess_frame(&test, schema::TEXT_COLUMN, schema::TARGET_COLUMN, &encoder)?;

    let interim_dir = base.join(paths::INTERIM_DIR);
    fs::create_dir_all(&interim_dir).map_err(|err| {
        error!("failed to create {}: {err}", interim_dir.display());
        PipelineError::from(err)
    })?;
    frame::write_csv_pair(
        &train_processed,
        &interim_dir.join(paths::TRAIN_PREPROCESSED_FILE),
        &test_processed,
        &interim_dir.join(paths::TEST_PREPROCESSED_FILE),
    )
    .map_err(|err| {
        error!("failed to save interim partitions to {}: {err}", interim_dir.display());
        err
    })?;
    debug!("processed data saved to {}", interim_dir.display());
    Ok(())
}

/// Run the preprocessing stage with the default data layout.
pub fn run() -> Result<(), PipelineError> {
    run_with(Path::new(paths::DATA_DIR))
}
