//! Colorful console output for exchange events.
//!
//! Provides a custom `tracing` layer that formats engine and lifecycle
//! events with colors. Enabled with the `console` feature.
//!
//! ## Log Levels
//!
//! - **INFO**: Solve start/end, drafts, commits
//! - **WARN**: Infeasible draws, overridden commits, failed deliveries
//! - **DEBUG**: Backtracks
//!
//! `RUST_LOG` overrides the default `giftforge_engine=info` directive.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "giftforge_engine=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the GiftForge banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let builder = EnvFilter::builder();
        let builder = match DEFAULT_DIRECTIVE.parse::<Directive>() {
            Ok(directive) => builder.with_default_directive(directive),
            Err(_) => builder,
        };
        let filter = builder.from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ExchangeConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
  ____ _  __ _   _____
 / ___(_)/ _| |_|  ___|__  _ __ __ _  ___
| |  _| | |_| __| |_ / _ \| '__/ _` |/ _ \
| |_| | |  _| |_|  _| (_) | | | (_| |  __/
 \____|_|_|  \__|_|  \___/|_|  \__, |\___|
                               |___/
"#;

    let version_line = format!(
        "              v{} - Constrained Gift Exchanges\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_red());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats GiftForge events with colors.
pub struct ExchangeConsoleLayer;

impl<S: Subscriber> Layer<S> for ExchangeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("giftforge_engine") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    code: Option<String>,
    reason: Option<String>,
    error: Option<String>,
    cause: Option<String>,
    giver: Option<String>,
    participant_count: Option<u64>,
    exclusions: Option<u64>,
    attempts: Option<u64>,
    backtracks: Option<u64>,
    duration_ms: Option<u64>,
    notices: Option<u64>,
    revoked: Option<u64>,
    depth: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "participant_count" | "participants" => self.participant_count = Some(value),
            "exclusions" => self.exclusions = Some(value),
            "attempts" => self.attempts = Some(value),
            "backtracks" => self.backtracks = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "notices" => self.notices = Some(value),
            "revoked" => self.revoked = Some(value),
            "depth" => self.depth = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "code" => self.code = value,
            "reason" => self.reason = value,
            "error" => self.error = value,
            "cause" => self.cause = value,
            "giver" => self.giver = value,
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format_solve_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("solve_infeasible") => format_infeasible(v),
        Some("validation_rejected") => line(
            level,
            "[Engine]",
            format!("validator rejected result: {}", field(&v.error).bright_red()),
        ),
        Some("backtrack") => line(
            level,
            "[Engine]",
            format!(
                "backtrack at depth {} (giver {}, total {})",
                v.depth.unwrap_or(0).to_string().yellow(),
                field(&v.giver),
                format_count(v.backtracks)
            ),
        ),
        Some("draft_created") => line(level, &event_tag(v), "draft assignment ready".to_string()),
        Some("draft_discarded") => line(
            level,
            &event_tag(v),
            format!("draft discarded ({})", field(&v.cause).yellow()),
        ),
        Some("assignment_committed") => line(
            level,
            &event_tag(v),
            format!(
                "assignment committed, {} notices sent",
                format_count(v.notices).bright_green()
            ),
        ),
        Some("commit_overridden") => line(
            level,
            &event_tag(v),
            format!(
                "committed assignment overridden, {} notices revoked",
                format_count(v.revoked).bright_red()
            ),
        ),
        Some("notify_failed") => line(
            level,
            &event_tag(v),
            format!("delivery failed: {}", field(&v.error).bright_red()),
        ),
        Some("event_created") => line(level, &event_tag(v), "event created".to_string()),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} drawing for {} participants, {} exclusions",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        format_count(v.participant_count).bright_yellow(),
        format_count(v.exclusions).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} assignment found: time spent ({}), attempts ({}), backtracks ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_count(v.attempts).bright_magenta().bold(),
        format_count(v.backtracks).white(),
    )
}

fn format_infeasible(v: &EventVisitor) -> String {
    format!(
        "{} {} {} no assignment: {} after {} attempts",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Engine]".bright_cyan(),
        field(&v.reason).bright_red().bold(),
        format_count(v.attempts),
    )
}

fn line(level: Level, tag: &str, message: String) -> String {
    let level = match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => "WARN".bright_yellow().to_string(),
        Level::INFO => "INFO".bright_green().to_string(),
        _ => level.to_string().bright_black().to_string(),
    };
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        level,
        tag.bright_cyan(),
        message
    )
}

fn event_tag(v: &EventVisitor) -> String {
    format!("[{}]", field(&v.code))
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("?")
}

fn format_count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(Some(1_234_567)), "1,234,567");
        assert_eq!(format_count(None), "0");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::INFO, &visitor).is_empty());
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
