use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_VARS: [&str; 2] = ["MEMSTRIP_LOG", "RUST_LOG"];

/// Directives for the stripper's own events when no environment override
/// is set. `-v` adds the per-section and per-export detail.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "memstrip=debug,warn"
    } else {
        "memstrip=info,warn"
    }
}

fn filter_from(value: Option<&str>, verbose: bool) -> EnvFilter {
    value
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the stderr subscriber. Stdout is left alone so the stripped
/// module can be piped. Returns `false` when a subscriber already exists.
pub fn init_logging(verbose: bool) -> bool {
    let value = LOG_VARS.iter().find_map(|name| std::env::var(name).ok());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter_from(value.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("memstrip: logging already initialized: {err}");
            false
        }
    }
}

#[cfg(test)]
mod test {
    use tracing_subscriber::EnvFilter;

    use super::{default_directives, filter_from, init_logging};

    fn rendered(directives: &str) -> String {
        EnvFilter::new(directives).to_string()
    }

    #[test]
    fn verbose_flag_raises_crate_level() {
        assert_eq!(default_directives(false), "memstrip=info,warn");
        assert_eq!(default_directives(true), "memstrip=debug,warn");
        assert_eq!(
            filter_from(None, true).to_string(),
            rendered("memstrip=debug,warn")
        );
    }

    #[test]
    fn unparsable_override_falls_back_to_defaults() {
        assert_eq!(
            filter_from(Some("memstrip=loud"), false).to_string(),
            rendered("memstrip=info,warn")
        );
        assert_eq!(filter_from(Some("trace"), false).to_string(), rendered("trace"));
    }

    #[test]
    fn second_subscriber_is_refused() {
        init_logging(false);
        assert!(!init_logging(true));
    }
}
