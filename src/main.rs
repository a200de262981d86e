use spark_notify::logging::{FileLogger, setup_logging};
use spark_notify::{NotifierConfig, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let file_logger = std::env::var("LOG_DIR")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(|dir| FileLogger::new(PathBuf::from(dir)));
    let _guard = match setup_logging(file_logger.as_ref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging setup error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match NotifierConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match run(&config).await {
        Ok(report) => {
            info!(
                "Notification complete: {} message(s) to {}",
                report.messages_sent, report.room_id
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Something went wrong... {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
