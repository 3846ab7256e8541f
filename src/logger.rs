use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

/// Days of rotated log files kept on disk.
const LOG_RETENTION_DAYS: usize = 60;

impl LogLevel {
    fn as_level(self) -> Level {
        match self {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Debug mode never makes logging quieter than the configured level.
fn effective_level(configured: LogLevel, debug: bool) -> Level {
    let level = configured.as_level();
    if debug && (level as u16) < (Level::Debug as u16) {
        Level::Debug
    } else {
        level
    }
}

fn console_sink(stream: StdStream, filter: LevelFilter) -> spdlog::Result<Arc<StdStreamSink>> {
    let sink = StdStreamSink::builder()
        .std_stream(stream)
        .level_filter(filter)
        .build()?;
    Ok(Arc::new(sink))
}

/// Warnings and errors go to stderr, everything else to stdout.
fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    builder
        .sink(console_sink(StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn))?)
        .sink(console_sink(StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn))?);
    Ok(())
}

fn daily_file_sink(location: &Path) -> spdlog::Result<Arc<RotatingFileSink>> {
    let sink = RotatingFileSink::builder()
        .base_path(location)
        .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
        .max_files(LOG_RETENTION_DAYS)
        .rotate_on_open(false)
        .build()?;
    Ok(Arc::new(sink))
}

pub fn configure_logger(config: &Config, debug: bool) -> spdlog::Result<()> {
    let debug = debug || config.server.debug;

    let Some(ref log) = config.log else {
        if debug {
            spdlog::default_logger().set_level_filter(LevelFilter::MoreSevereEqual(Level::Debug));
        }
        return Ok(());
    };

    let mut builder = Logger::builder();
    builder.name("markblog");
    if let Some(ref location) = log.location {
        builder.sink(daily_file_sink(location)?);
    }
    // Without a file there is nowhere else to write
    if log.log_to_console || log.location.is_none() {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_level_filter(LevelFilter::MoreSevereEqual(effective_level(log.level, debug)));
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));

    spdlog::set_default_logger(logger);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level(LogLevel::Info, false), Level::Info);
        assert_eq!(effective_level(LogLevel::Info, true), Level::Debug);
        assert_eq!(effective_level(LogLevel::Trace, true), Level::Trace);
        assert_eq!(effective_level(LogLevel::Error, false), Level::Error);
    }
}
