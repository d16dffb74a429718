//! Stage 1: fetch the raw labeled dataset, project it down to the canonical
//! `target`/`text` columns, split deterministically, and persist the raw
//! partitions.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, error};

use crate::constants::{ingestion, paths, schema};
use crate::errors::PipelineError;
use crate::frame::{self, Frame};

/// Read a CSV dataset from a URL (`http`/`https`) or a filesystem path.
pub fn load_dataset(source: &str) -> Result<Frame, PipelineError> {
    let result = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(source)
    } else {
        Frame::read_csv(source)
    };
    match result {
        Ok(frame) => {
            debug!("dataset loaded from {source} ({} rows)", frame.len());
            Ok(frame)
        }
        Err(err) => {
            error!("failed to load the dataset from {source}: {err}");
            Err(PipelineError::Load {
                source_id: source.to_string(),
                reason: err.to_string(),
            })
        }
    }
}

fn fetch_remote(url: &str) -> Result<Frame, PipelineError> {
    let response = ureq::get(url)
        .call()
        .map_err(|err| PipelineError::Unexpected(err.to_string()))?;
    Frame::from_reader(response.into_reader())
}

/// Keep only the raw label/text columns, renamed to `target`/`text`.
///
/// Extraneous columns (the dataset carries unnamed trailing ones) are
/// dropped. Fails with a schema error when an expected column is absent.
pub fn project_columns(frame: &Frame) -> Result<Frame, PipelineError> {
    let projected = frame
        .select(&[
            (ingestion::RAW_LABEL_COLUMN, schema::TARGET_COLUMN),
            (ingestion::RAW_TEXT_COLUMN, schema::TEXT_COLUMN),
        ])
        .map_err(|err| {
            error!("missing columns in dataset: {err}");
            err
        })?;
    debug!("column projection complete");
    Ok(projected)
}

/// Deterministic shuffled `(train, test)` split.
///
/// The same ordered input, fraction, and seed always produce the same row
/// assignment. The test partition receives `ceil(len * test_fraction)` rows.
pub fn split_frame(frame: &Frame, test_fraction: f64, seed: u64) -> (Frame, Frame) {
    let mut indices: Vec<usize> = (0..frame.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let test_count = ((frame.len() as f64) * test_fraction).ceil() as usize;
    let test_count = test_count.min(frame.len());
    let (test_indices, train_indices) = indices.split_at(test_count);
    let train = frame.take_rows(train_indices);
    let test = frame.take_rows(test_indices);
    debug!(
        "dataset split into {} train / {} test rows (seed {seed})",
        train.len(),
        test.len()
    );
    (train, test)
}

/// Write both partitions under `<base>/raw/`, creating directories as needed.
pub fn persist_partitions(
    train: &Frame,
    test: &Frame,
    base: &Path,
) -> Result<(), PipelineError> {
    let raw_dir = base.join(paths::RAW_DIR);
    let result = fs::create_dir_all(&raw_dir)
        .map_err(PipelineError::from)
        .and_then(|_| {
            frame::write_csv_pair(
                train,
                &raw_dir.join(paths::TRAIN_FILE),
                test,
                &raw_dir.join(paths::TEST_FILE),
            )
        });
    match result {
        Ok(()) => {
            debug!("train and test data saved to {}", raw_dir.display());
            Ok(())
        }
        Err(err) => {
            error!("failed to save raw partitions to {}: {err}", raw_dir.display());
            Err(err)
        }
    }
}

/// Run the ingestion stage against an explicit source and data directory.
pub fn run_with(source: &str, base: &Path) -> Result<(), PipelineError> {
    let frame = load_dataset(source)?;
    let projected = project_columns(&frame)?;
    let (train, test) = split_frame(
        &projected,
        ingestion::TEST_FRACTION,
        ingestion::SPLIT_SEED,
    );
    persist_partitions(&train, &test, base)
}

/// Run the ingestion stage with the default dataset URL and data layout.
pub fn run() -> Result<(), PipelineError> {
    run_with(ingestion::DATASET_URL, Path::new(paths::DATA_DIR))
}
