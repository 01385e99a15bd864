use anyhow::Context;
use clap::Parser;

use sonarpush_core::client::SonarClient;
use sonarpush_core::config::Config;
use sonarpush_core::notifier::{Notifier, SlackWebhook};
use sonarpush_core::types::{NotificationContent, QualityGate};
use sonarpush_core::{run, RunSummary, SyncError};

/// Configuration is read from the environment: SONAR_URL, SONAR_USERNAME,
/// SONAR_PASSWORD, PROJECT_ALIAS_NAME, SLACK_HOOK_URL, SLACK_CHANNEL and
/// SONARPUSH_TIMEOUT_SECS.
#[derive(Parser, Debug)]
#[command(
    name = "sonarpush",
    version,
    about = "Post a SonarQube quality summary to a Slack webhook"
)]
struct Cli {}

struct Style {
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    cyan: &'static str,
    reset: &'static str,
}

const COLOR: Style = Style {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    red: "\x1b[31m",
    green: "\x1b[32m",
    yellow: "\x1b[33m",
    cyan: "\x1b[36m",
    reset: "\x1b[0m",
};

const PLAIN: Style = Style {
    bold: "",
    dim: "",
    red: "",
    green: "",
    yellow: "",
    cyan: "",
    reset: "",
};

fn style() -> &'static Style {
    if std::env::var_os("NO_COLOR").is_some() {
        &PLAIN
    } else {
        &COLOR
    }
}

fn main() -> std::process::ExitCode {
    let _cli = Cli::parse();

    match run_sync() {
        Ok(()) => std::process::ExitCode::from(0),
        Err(e) => {
            let s = style();
            eprintln!(
                "{}{red}error:{reset} {:#}",
                s.bold,
                e,
                red = s.red,
                reset = s.reset
            );
            std::process::ExitCode::from(exit_code_for(&e))
        }
    }
}

/// 2 when the summary was built but could not be delivered, 1 otherwise.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SyncError>() {
        Some(e) if e.is_delivery() => 2,
        _ => 1,
    }
}

fn print_banner() {
    let s = style();
    eprintln!(
        "\n  {bold}sonar{reset}{cyan}>{reset}{dim}push{reset}  {dim}quality gate to chat{reset}\n",
        bold = s.bold,
        cyan = s.cyan,
        dim = s.dim,
        reset = s.reset,
    );
}

fn gate_color(gate: Option<QualityGate>) -> &'static str {
    let s = style();
    match gate {
        Some(QualityGate::Ok) => s.green,
        Some(QualityGate::Warn) => s.yellow,
        Some(QualityGate::Error) => s.red,
        None => s.dim,
    }
}

fn or_dash(v: &str) -> &str {
    if v.is_empty() {
        "-"
    } else {
        v
    }
}

fn print_summary(content: &NotificationContent, channel: &str) {
    let s = style();
    let gc = gate_color(content.quality_gate());

    eprintln!(
        "  {dim}project         {reset}{bold}{}{reset}",
        or_dash(&content.key),
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}quality gate    {reset}{gc}{bold}{}{reset}",
        or_dash(&content.status),
        dim = s.dim,
        gc = gc,
        bold = s.bold,
        reset = s.reset
    );
    let rows = [
        ("bugs", content.bugs.as_str(), ""),
        ("code smells", content.code_smells.as_str(), ""),
        ("technical debt", content.sqale_index.as_str(), " days"),
        ("duplicated", content.duplicated_lines_density.as_str(), " %"),
        ("coverage", content.coverage.as_str(), " %"),
    ];
    for (label, value, unit) in rows {
        let unit = if value.is_empty() { "" } else { unit };
        eprintln!(
            "  {dim}{:<16}{reset}{bold}{}{reset}{}",
            label,
            or_dash(value),
            unit,
            dim = s.dim,
            bold = s.bold,
            reset = s.reset
        );
    }

    eprintln!();
    eprintln!(
        "  {dim}\u{2192} {}{reset}",
        channel,
        dim = s.dim,
        reset = s.reset
    );
    eprintln!();
}

fn summary_line(content: &NotificationContent) -> String {
    format!(
        "status={} bugs={} code_smells={} debt_days={} duplicated={} coverage={}",
        content.status,
        content.bugs,
        content.code_smells,
        content.sqale_index,
        content.duplicated_lines_density,
        content.coverage
    )
}

fn run_sync() -> anyhow::Result<()> {
    let s = style();

    print_banner();

    let config = Config::from_env().context("load configuration from environment")?;
    if config.channel_defaulted {
        eprintln!(
            "  {}{}warning:{} SLACK_CHANNEL not set, posting to {}",
            s.bold, s.yellow, s.reset, config.channel
        );
    }

    let source = SonarClient::new(&config)?;
    let notifier = SlackWebhook::new(config.timeout)?;

    let RunSummary { content, .. } = run(&config, &source, &notifier)
        .with_context(|| format!("sync {} via {}", config.project_key, notifier.name()))?;

    // Machine-parseable line on stdout
    println!("{}", summary_line(&content));

    print_summary(&content, &config.channel);

    eprintln!(
        "  {green}{bold}SENT{reset}",
        green = s.green,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!();

    Ok(())
}
