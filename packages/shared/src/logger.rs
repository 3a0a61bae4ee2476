//! Logger setup based on `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter used by [`setup_logger`].
///
/// `RUST_LOG` takes precedence. Otherwise the binary's own crate logs at
/// `default_level` and everything else at `info`.
pub fn build_filter(bin_name: &str, default_level: &str) -> EnvFilter {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    build_filter_from(directives.as_deref(), bin_name, default_level)
}

/// Same as [`build_filter`] with the `RUST_LOG` value passed in.
///
/// Blank or unparseable directives fall back to the default.
pub fn build_filter_from(
    directives: Option<&str>,
    bin_name: &str,
    default_level: &str,
) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| {
            let crate_name = bin_name.replace('-', "_");
            EnvFilter::new(format!("info,{crate_name}={default_level}"))
        })
}

/// Initialize the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = build_filter(bin_name, default_level);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_uses_bin_name_as_target() {
        // テスト項目: RUST_LOG がなければバイナリ名のハイフンがアンダースコアに変換されたフィルタが作られる
        // when (操作):
        let filter = build_filter_from(None, "chitchat-server", "debug");

        // then (期待する結果):
        let rendered = filter.to_string();
        assert!(rendered.contains("chitchat_server=debug"));
    }

    #[test]
    fn test_build_filter_prefers_env_directives() {
        // テスト項目: RUST_LOG の値があればデフォルトより優先される
        // when (操作):
        let filter = build_filter_from(Some("warn,hyper=off"), "chitchat-server", "debug");

        // then (期待する結果):
        let rendered = filter.to_string();
        assert!(rendered.contains("hyper=off"));
        assert!(!rendered.contains("chitchat_server=debug"));
    }

    #[test]
    fn test_build_filter_ignores_blank_env() {
        // テスト項目: 空の RUST_LOG はデフォルトにフォールバックする
        // when (操作):
        let filter = build_filter_from(Some("  "), "chitchat-server", "trace");

        // then (期待する結果):
        assert!(filter.to_string().contains("chitchat_server=trace"));
    }

    #[test]
    fn test_setup_logger_twice_does_not_panic() {
        // テスト項目: setup_logger を 2 回呼んでもパニックしない
        // when (操作):
        setup_logger("chitchat-server", "info");
        setup_logger("chitchat-server", "info");
    }
}
