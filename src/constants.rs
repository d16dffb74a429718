/// Constants describing the on-disk artifact layout shared by all stages.
pub mod paths {
    /// Base data directory, relative to the working directory.
    pub const DATA_DIR: &str = "./data";
    /// Subdirectory for raw partitions written by ingestion.
    pub const RAW_DIR: &str = "raw";
    /// Subdirectory for interim partitions written by preprocessing.
    pub const INTERIM_DIR: &str = "interim";
    /// Subdirectory for processed feature matrices.
    pub const PROCESSED_DIR: &str = "processed";
    /// Directory for per-stage log files.
    pub const LOG_DIR: &str = "logs";

    /// Raw train partition filename.
    pub const TRAIN_FILE: &str = "train.csv";
    /// Raw test partition filename.
    pub const TEST_FILE: &str = "test.csv";
    /// Interim train partition filename.
    pub const TRAIN_PREPROCESSED_FILE: &str = "train_preprocessed.csv";
    /// Interim test partition filename.
    pub const TEST_PREPROCESSED_FILE: &str = "test_preprocessed.csv";
    /// Processed train feature matrix filename.
    pub const TRAIN_TFIDF_FILE: &str = "train_tfidf.csv";
    /// Processed test feature matrix filename.
    pub const TEST_TFIDF_FILE: &str = "test_tfidf.csv";
    /// Params file consumed by feature engineering.
    pub const PARAMS_FILE: &str = "params.yaml";
}

/// Constants fixed by the ingestion stage contract.
pub mod ingestion {
    /// Default dataset source fetched when no override is given.
    pub const DATASET_URL: &str =
        "https://raw.githubusercontent.com/Pratik-1729/Datasets/refs/heads/main/spam.csv";
    /// Label column name as it appears in the raw dataset.
    pub const RAW_LABEL_COLUMN: &str = "v1";
    /// Text column name as it appears in the raw dataset.
    pub const RAW_TEXT_COLUMN: &str = "v2";
    /// Fraction of rows assigned to the test partition.
    pub const TEST_FRACTION: f64 = 0.2;
    /// Seed for the deterministic split shuffle.
    pub const SPLIT_SEED: u64 = 42;
}

/// Canonical column names used downstream of ingestion.
pub mod schema {
    /// Encoded label column in raw and interim partitions.
    pub const TARGET_COLUMN: &str = "target";
    /// Message text column in raw and interim partitions.
    pub const TEXT_COLUMN: &str = "text";
    /// Trailing class-id column in processed feature matrices.
    pub const LABEL_COLUMN: &str = "label";
}

/// Stage names used for log files and failure messages.
pub mod stages {
    /// Ingestion stage name.
    pub const INGESTION: &str = "data_ingestion";
    /// Preprocessing stage name.
    pub const PREPROCESSING: &str = "data_preprocessing";
    /// Feature engineering stage name.
    pub const FEATURE_ENGINEERING: &str = "feature_engineering";
}
