use std::process::ExitCode;

use spamprep::constants::{paths, stages};

fn main() -> ExitCode {
    let logging = spamprep::init_stage_logging(stages::INGESTION, paths::LOG_DIR);
    if let Err(err) = &logging {
        eprintln!("ERROR: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match spamprep::ingestion::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("failed to complete the data ingestion process: {err}");
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}
