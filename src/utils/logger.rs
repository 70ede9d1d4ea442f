use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over everything; otherwise `--verbose` wins over the
/// `[logging] level` from the config file.
pub fn default_directive(verbose: bool, level: Option<&str>) -> String {
    if verbose {
        "moop=debug,info".to_string()
    } else {
        format!("moop={}", level.unwrap_or("info"))
    }
}

pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    let directive = default_directive(verbose, level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// 以指定等級輸出 JSON 格式日誌 (給其他程式收集用)
pub fn init_json_logger(level: Option<&str>) {
    let directive = default_directive(false, level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, None), "moop=info");
        assert_eq!(default_directive(false, Some("warn")), "moop=warn");
        assert_eq!(default_directive(true, Some("warn")), "moop=debug,info");
    }
}
