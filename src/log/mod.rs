use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn";

/// Installs a console subscriber that also receives the `log` records of the library.
/// `RUST_LOG` takes the usual directives, such as `tubesource=debug`.
pub(crate) fn initialize_logger() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_target(false)
        .try_init()
}

fn env_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn accepts_per_target_directives() {
        assert_eq!(
            env_filter(Some("tubesource=debug".to_owned())).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            env_filter(Some("info".to_owned())).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn falls_back_to_warn() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            env_filter(Some("tubesource=loudest".to_owned())).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
