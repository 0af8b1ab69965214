use folio_domain::config::LoggingConfig;
use folio_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_driven_file_logging_creates_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config = LoggingConfig {
        console: false,
        directory: Some(log_dir.clone()),
        json: true,
        ..LoggingConfig::default()
    };

    let logger = Logger::builder().name("integration-file-logging").with_config(&config)?.init()?;
    assert!(logger.writes_files());

    tracing::info!(section = "about", "section triggered");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("section triggered"), "log line should be flushed on drop");
    assert!(contents.trim_start().starts_with('{'), "json output expected");

    Ok(())
}
