//! Tracing setup for the simulator binary.
//!
//! A TUI owns the whole terminal, so logs can't go to stdout/stderr without
//! corrupting the alternate screen -- everything goes to a plain file next
//! to the binary, the same shape `freddiehaddad-oxidized`'s `ox-bin` uses
//! for its own file-backed subscriber. The root `axe_interpreter` library
//! never touches a subscriber itself; it only emits `tracing` events.

use std::path::Path;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Keeps the non-blocking writer's background thread alive for the
/// program's lifetime; drop it only once `main` is done with the terminal.
pub struct LogGuard(#[allow(dead_code)] tracing_appender::non_blocking::WorkerGuard);

/// `@DEBUG n` has no grammar-trace flag to toggle in this rendition (spec
/// §9 / `SPEC_FULL.md` §4), so the interpreter emits a plain tracing event
/// on `axe_interpreter::debug` instead. This layer watches for that event
/// and raises or lowers the reloadable filter in response, since
/// `interp::execute` never reaches into a subscriber on its own.
struct DebugToggleLayer {
    handle: reload::Handle<EnvFilter, tracing_subscriber::Registry>,
}

impl<S> Layer<S> for DebugToggleLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "axe_interpreter::debug" {
            return;
        }

        #[derive(Default)]
        struct LevelVisitor(Option<i64>);
        impl tracing::field::Visit for LevelVisitor {
            fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
                if field.name() == "level" {
                    self.0 = Some(value);
                }
            }
            fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
        }

        let mut visitor = LevelVisitor::default();
        event.record(&mut visitor);
        let directive = match visitor.0 {
            Some(v) if v > 0 => "axe_interpreter=trace",
            _ => "axe_interpreter=warn",
        };
        let _ = self.handle.modify(|filter| *filter = EnvFilter::new(directive));
    }
}

/// Installs the global subscriber: a non-blocking file writer plus a
/// reloadable `EnvFilter` that `@DEBUG n` can raise or lower at runtime.
pub fn init(log_dir: &Path) -> std::io::Result<LogGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "axe.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let (filter, handle) = reload::Layer::new(EnvFilter::new("axe_interpreter=warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(DebugToggleLayer { handle });

    // A prior `try_init` (e.g. in an embedding test harness) is not fatal --
    // just keep running without this process's own subscriber installed.
    let _ = subscriber.try_init();

    Ok(LogGuard(guard))
}
