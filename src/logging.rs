//! Tracing setup for hosts that do not install their own subscriber.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::EnvConfig;

pub const DEFAULT_FILTER: &str = "warn";

/// Filter from `TAPE_DIALOG_LOG`, falling back to [`DEFAULT_FILTER`] when unset or
/// unparsable.
pub fn filter_for(config: &EnvConfig) -> EnvFilter {
    config
        .log_filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr fmt subscriber. Returns `false` if one was already installed.
pub fn init(config: &EnvConfig) -> bool {
    fmt()
        .with_env_filter(filter_for(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{filter_for, init};
    use crate::config::EnvConfig;
    use tracing::level_filters::LevelFilter;

    fn config(filter: Option<&str>) -> EnvConfig {
        EnvConfig {
            log_filter: filter.map(str::to_string),
            ..EnvConfig::default()
        }
    }

    #[test]
    fn filter_defaults_to_warn() {
        assert_eq!(filter_for(&config(None)).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            filter_for(&config(Some("tape_dialog=loud"))).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            filter_for(&config(Some("tape_dialog=debug"))).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init(&config(None));
        assert!(!init(&config(None)));
    }
}
