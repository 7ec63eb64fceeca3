use chrono::Local;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Line layout for the two sinks.
///
/// * simple: `<timestamp> - <LEVEL> - <message>`
/// * detailed: `<timestamp> - <logger_name> - <LEVEL> - <function>:<line> - <message>`
///
/// `function` is the innermost active span, or the module path outside of
/// any span.
#[derive(Debug, Clone, Copy)]
pub struct LineFormat {
    detailed: bool,
}

impl LineFormat {
    pub fn simple() -> Self {
        Self { detailed: false }
    }

    pub fn detailed() -> Self {
        Self { detailed: true }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        write!(writer, "{} - ", Local::now().format(TIMESTAMP_FORMAT))?;
        if self.detailed {
            write!(writer, "{} - ", metadata.target())?;
        }
        write!(writer, "{} - ", metadata.level())?;
        if self.detailed {
            let function = ctx
                .lookup_current()
                .map(|span| span.name())
                .or(metadata.module_path())
                .unwrap_or("?");
            write!(writer, "{}:{} - ", function, metadata.line().unwrap_or(0))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
