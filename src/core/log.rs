use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. `RUST_LOG`, when set, wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "fxconv=debug" } else { "fxconv=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Records events emitted while installed, for asserting on log output.
#[cfg(test)]
pub(crate) mod capture {
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::subscriber::DefaultGuard;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer};
    use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt};

    #[derive(Debug, Clone)]
    pub struct CapturedEvent {
        pub level: Level,
        pub target: String,
        pub message: String,
    }

    #[derive(Clone, Default)]
    pub struct CapturedEvents(Arc<Mutex<Vec<CapturedEvent>>>);

    impl CapturedEvents {
        /// Installs a thread-local subscriber; events are recorded until the guard drops.
        pub fn install(&self) -> DefaultGuard {
            tracing_subscriber::registry()
                .with(self.clone())
                .set_default()
        }

        /// Messages logged by this crate at exactly `level`.
        pub fn messages_at(&self, level: Level) -> Vec<String> {
            self.0
                .lock()
                .map(|events| {
                    events
                        .iter()
                        .filter(|e| e.level == level && e.target.starts_with("fxconv"))
                        .map(|e| e.message.clone())
                        .collect()
                })
                .unwrap_or_default()
        }
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            if let Ok(mut events) = self.0.lock() {
                events.push(CapturedEvent {
                    level: *event.metadata().level(),
                    target: event.metadata().target().to_string(),
                    message: visitor.0,
                });
            }
        }
    }
}
