//! Subscriber and sentry setup.
//!
//! The format of the logs in `stdout` can be `plain` or `json` and is set
//! by the `MISC_LOG_FORMAT` env variable. Sentry is enabled when
//! `GODWOKEN_EXPORTER_SENTRY_URL` holds a valid DSN; the configured
//! network name is reported as the sentry environment.

use std::{backtrace::Backtrace, borrow::Cow, str::FromStr};

use sentry::{types::Dsn, ClientInitGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn get_sentry_url() -> Option<Dsn> {
    if let Ok(sentry_url) = std::env::var("GODWOKEN_EXPORTER_SENTRY_URL") {
        if let Ok(sentry_url) = Dsn::from_str(sentry_url.as_str()) {
            return Some(sentry_url);
        }
    }
    None
}

/// Initialize logging with tracing and set up log format.
///
/// If the sentry URL is provided via an environment variable, this
/// function will also initialize sentry and return its client guard; the
/// guard must be held for the lifetime of the process.
#[must_use]
pub(crate) fn init(net_env: &str) -> Option<ClientInitGuard> {
    let log_format = std::env::var("MISC_LOG_FORMAT").unwrap_or_else(|_| "plain".to_string());

    match log_format.as_str() {
        "plain" => {
            tracing_subscriber::registry()
                .with(fmt::Layer::default())
                .with(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }
        "json" => {
            let timer = tracing_subscriber::fmt::time::UtcTime::rfc_3339();
            // must be set before sentry hook for sentry to function
            install_pretty_panic_hook();

            tracing_subscriber::registry()
                .with(
                    fmt::Layer::default()
                        .with_file(true)
                        .with_line_number(true)
                        .with_timer(timer)
                        .json(),
                )
                .with(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }
        _ => panic!("MISC_LOG_FORMAT has an unexpected value {}", log_format),
    };

    get_sentry_url().map(|sentry_url| {
        let options = sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(Cow::from(net_env.to_owned())),
            attach_stacktrace: true,
            ..Default::default()
        };

        sentry::init((sentry_url, options))
    })
}

/// Format panics like tracing::error
fn install_pretty_panic_hook() {
    // This hook does not use the previous one set because it leads to 2 logs:
    // the first is the default panic log and the second is from this code. To
    // avoid this situation, hook must be installed first
    std::panic::set_hook(Box::new(move |panic_info| {
        let backtrace = Backtrace::capture();
        let timestamp = chrono::Utc::now();
        let panic_message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else {
            "Panic occurred without additional info"
        };

        let panic_location = panic_info
            .location()
            .map(|val| val.to_string())
            .unwrap_or_else(|| "Unknown location".to_owned());

        let backtrace_str = format!("{}", backtrace);
        let timestamp_str = format!("{}", timestamp.format("%Y-%m-%dT%H:%M:%S%.fZ"));

        println!(
            "{}",
            serde_json::json!({
                "timestamp": timestamp_str,
                "level": "CRITICAL",
                "fields": {
                    "message": panic_message,
                    "location": panic_location,
                    "backtrace": backtrace_str,
                }
            })
        );
    }));
}
