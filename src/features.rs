//! Stage 3: turn the interim partitions into fixed-width TF-IDF feature
//! matrices with a trailing integer `label` column.

use std::fs;
use std::path::Path;

use tracing::{debug, error};

use crate::config::load_params;
use crate::constants::{paths, schema};
use crate::errors::PipelineError;
use crate::frame::{self, Frame};
use crate::tfidf::TfidfVectorizer;

/// Read one interim partition. Short rows are padded on read, so missing
/// text values arrive as empty strings.
pub fn load_interim(path: &Path) -> Result<Frame, PipelineError> {
    match Frame::read_csv(path) {
        Ok(frame) => {
            debug!(
                "data loaded and missing values filled from {} ({} rows)",
                path.display(),
                frame.len()
            );
            Ok(frame)
        }
        Err(err) => {
            error!("failed to load interim partition {}: {err}", path.display());
            Err(PipelineError::Load {
                source_id: path.display().to_string(),
                reason: err.to_string(),
            })
        }
    }
}

/// Fit a TF-IDF vectorizer on the train partition's text and transform both
/// partitions against the shared vocabulary.
///
/// Returns `(train_features, test_features)`, each with
/// `min(max_features, vocabulary size)` numeric columns named `0..n-1` plus
/// the `label` column copied from `target`.
pub fn vectorize(
    train: &Frame,
    test: &Frame,
    max_features: usize,
) -> Result<(Frame, Frame), PipelineError> {
    let train_docs = column_or_log(train, schema::TEXT_COLUMN, "train")?;
    let train_labels = column_or_log(train, schema::TARGET_COLUMN, "train")?;
    let test_docs = column_or_log(test, schema::TEXT_COLUMN, "test")?;
    let test_labels = column_or_log(test, schema::TARGET_COLUMN, "test")?;

    let fitted = TfidfVectorizer::new().max_features(max_features).fit(&train_docs);
    debug!(
        "tfidf vectorizer fitted on train partition ({} vocabulary terms)",
        fitted.n_features()
    );

    let train_frame = feature_frame(fitted.transform(&train_docs), &train_labels, fitted.n_features());
    let test_frame = feature_frame(fitted.transform(&test_docs), &test_labels, fitted.n_features());
    debug!("tfidf applied and both partitions transformed");
    Ok((train_frame, test_frame))
}

fn column_or_log<'a>(
    frame: &'a Frame,
    column: &str,
    partition: &str,
) -> Result<Vec<&'a str>, PipelineError> {
    frame.column(column).map_err(|err| {
        error!("column '{column}' missing from {partition} partition: {err}");
        err
    })
}

fn feature_frame(matrix: Vec<Vec<f64>>, labels: &[&str], width: usize) -> Frame {
    let mut columns: Vec<String> = (0..width).map(|idx| idx.to_string()).collect();
    columns.push(schema::LABEL_COLUMN.to_string());
    let rows = matrix
        .into_iter()
        .zip(labels)
        .map(|(row, label)| {
            let mut out: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            out.push((*label).to_string());
            out
        })
        .collect();
    Frame::new(columns, rows)
}

/// Write both feature matrices under `<base>/processed/`, creating directories
/// as needed. Either both files appear or neither does.
pub fn persist_features(
    train: &Frame,
    test: &Frame,
    base: &Path,
) -> Result<(), PipelineError> {
    let processed_dir = base.join(paths::PROCESSED_DIR);
    let result = fs::create_dir_all(&processed_dir)
        .map_err(PipelineError::from)
        .and_then(|_| {
            frame::write_csv_pair(
                train,
                &processed_dir.join(paths::TRAIN_TFIDF_FILE),
                test,
                &processed_dir.join(paths::TEST_TFIDF_FILE),
            )
        });
    match result {
        Ok(()) => {
            debug!("data saved to {}", processed_dir.display());
            Ok(())
        }
        Err(err) => {
            error!("failed to save features to {}: {err}", processed_dir.display());
            Err(err)
        }
    }
}

/// Run the feature engineering stage against explicit params and data paths.
pub fn run_with(params_path: &Path, base: &Path) -> Result<(), PipelineError> {
    let params = load_params(params_path)?;
    let max_features = params.feature_engineering.max_features;

    let interim_dir = base.join(paths::INTERIM_DIR);
    let train = load_interim(&interim_dir.join(paths::TRAIN_PREPROCESSED_FILE))?;
    let test = load_interim(&interim_dir.join(paths::TEST_PREPROCESSED_FILE))?;

    let (train_features, test_features) = vectorize(&train, &test, max_features)?;
    persist_features(&train_features, &test_features, base)
}

/// Run the feature engineering stage with the default params file and layout.
pub fn run() -> Result<(), PipelineError> {
    run_with(Path::new(paths::PARAMS_FILE), Path::new(paths::DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interim_frame(rows: &[(&str, &str)]) -> Frame {
        Frame::new(
            vec!["target".to_string(), "text".to_string()],
            rows.iter()
                .map(|(target, text)| vec![target.to_string(), text.to_string()])
                .collect(),
        )
    }

    #[test]
    fn vectorize_aligns_train_and_test_columns() {
        let train = interim_frame(&[("0", "hi friend"), ("1", "win cash prize")]);
        let test = interim_frame(&[("1", "win lotteri cash")]);
        let (train_features, test_features) = vectorize(&train, &test, 500).unwrap();

        // Vocabulary comes from train only: 5 terms, plus the label column.
        assert_eq!(train_features.columns().len(), 6);
        assert_eq!(train_features.columns(), test_features.columns());
        assert_eq!(train_features.columns().last().unwrap(), "label");
        assert_eq!(train_features.columns()[0], "0");
    }

    #[test]
    fn vectorize_bounds_width_by_max_features() {
        let train = interim_frame(&[("0", "hi friend"), ("1", "win cash prize")]);
        let test = interim_frame(&[("1", "win cash")]);
        let (train_features, _) = vectorize(&train, &test, 3).unwrap();
        assert_eq!(train_features.columns().len(), 3 + 1);
    }

    #[test]
    fn vectorize_keeps_row_counts_and_labels() {
        let train = interim_frame(&[("0", "hi friend"), ("1", "win cash prize"), ("0", "see soon")]);
        let test = interim_frame(&[("1", "win cash"), ("0", "hi")]);
        let (train_features, test_features) = vectorize(&train, &test, 500).unwrap();
        assert_eq!(train_features.len(), 3);
        assert_eq!(test_features.len(), 2);
        assert_eq!(train_features.column("label").unwrap(), vec!["0", "1", "0"]);
        assert_eq!(test_features.column("label").unwrap(), vec!["1", "0"]);
    }

    #[test]
    fn vectorize_fails_on_missing_text_column() {
        let train = Frame::new(
            vec!["target".to_string()],
            vec![vec!["0".to_string()]],
        );
        let test = interim_frame(&[("1", "win")]);
        let err = vectorize(&train, &test, 10).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
    }

    #[test]
    fn run_with_writes_both_feature_matrices() {
        let dir = tempfile::tempdir().unwrap();
        let interim_dir = dir.path().join("data/interim");
        fs::create_dir_all(&interim_dir).unwrap();
        fs::write(
            interim_dir.join("train_preprocessed.csv"),
            "target,text\n0,hi friend\n1,win cash prize\n",
        )
        .unwrap();
        fs::write(
            interim_dir.join("test_preprocessed.csv"),
            "target,text\n1,win cash\n",
        )
        .unwrap();
        let params_path = dir.path().join("params.yaml");
        fs::write(&params_path, "feature_engineering:\n  max_features: 4\n").unwrap();

        run_with(&params_path, &dir.path().join("data")).unwrap();

        let train = Frame::read_csv(dir.path().join("data/processed/train_tfidf.csv")).unwrap();
        let test = Frame::read_csv(dir.path().join("data/processed/test_tfidf.csv")).unwrap();
        assert_eq!(train.columns().len(), 5);
        assert_eq!(train.columns(), test.columns());
        assert_eq!(train.len(), 2);
        assert_eq!(test.len(), 1);
        // Every feature value parses as a finite float.
        for row in train.rows().iter().chain(test.rows()) {
            for value in &row[..row.len() - 1] {
                assert!(value.parse::<f64>().unwrap().is_finite());
            }
        }
    }

    #[test]
    fn run_with_leaves_no_partial_output_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("data");
        let interim_dir = base.join("interim");
        fs::create_dir_all(&interim_dir).unwrap();
        fs::write(
            interim_dir.join("train_preprocessed.csv"),
            "target,text\n0,hi friend\n1,win cash\n",
        )
        .unwrap();
        fs::write(interim_dir.join("test_preprocessed.csv"), "target,text\n1,win\n").unwrap();
        let params_path = dir.path().join("params.yaml");
        fs::write(&params_path, "feature_engineering:\n  max_features: 4\n").unwrap();
        // A directory squatting on the test output path makes its write fail.
        fs::create_dir_all(base.join("processed/test_tfidf.csv")).unwrap();

        assert!(run_with(&params_path, &base).is_err());
        assert!(!base.join("processed/train_tfidf.csv").exists());
    }

    #[test]
    fn run_with_fails_without_interim_data() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.yaml");
        fs::write(&params_path, "feature_engineering:\n  max_features: 4\n").unwrap();
        let err = run_with(&params_path, &dir.path().join("data")).unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }
}
