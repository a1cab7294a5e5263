use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod calendar;
mod config;
mod data;
mod error;
mod export;
mod html;
mod server;
mod store;
mod timetable;
mod types;
mod views;

use config::Config;
use export::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "scadenzario")]
#[command(about = "Keep track of assignments, deadlines and the weekly timetable")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".", global = true)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// JSON file with tasks, classes and user to start from
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate static HTML pages (no server)
    Build,

    /// Write the task export into the output directory
    Export {
        /// csv or pdf
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },

    /// List tasks due within the next few days
    Upcoming {
        /// Horizon in days
        #[arg(short, long)]
        days: Option<i64>,
    },
}

/// `RUST_LOG` wins over `--log-level`; HTTP plumbing is kept at warn
fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level))
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("tower_http=warn".parse().unwrap())
}

fn init_tracing(log_level: &str) {
    fmt()
        .with_env_filter(log_filter(log_level))
        .with_target(false)
        .with_max_level(Level::TRACE)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    let mut config = Config {
        seed: args.seed.clone(),
        ..Config::default()
    };
    if let Some(Commands::Serve { port: Some(port) }) = &args.command {
        config.port = *port;
    }
    let config = config.with_env()?;

    let now = Local::now().naive_local();
    let store = data::build_store(config.seed.as_deref(), now)?;

    match args.command {
        // Default to serve if no command specified
        None | Some(Commands::Serve { .. }) => {
            server::serve(config, store).await?;
        }
        Some(Commands::Build) => {
            std::fs::create_dir_all(&args.output)
                .with_context(|| format!("Failed to create {}", args.output.display()))?;
            let pages = [
                (
                    "dashboard.html",
                    html::render_dashboard(store.tasks(), store.user(), now, config.horizon_days),
                ),
                (
                    "calendar.html",
                    html::render_calendar(store.tasks(), store.user(), now.date(), now),
                ),
                (
                    "timetable.html",
                    html::render_timetable(store.classes(), store.tasks(), store.user()),
                ),
            ];
            for (name, markup) in pages {
                let path = args.output.join(name);
                html::write_page(markup, &path)?;
                info!(path = %path.display(), "HTML saved");
            }
        }
        Some(Commands::Export { format }) => {
            if store.is_empty() {
                warn!("No tasks to export, writing the header only");
            }
            let file = export::export(store.tasks(), format, now.date())?;
            let path = args.output.join(&file.filename);
            std::fs::write(&path, &file.body)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            let summary = export::export_summary(store.tasks());
            info!(
                path = %path.display(),
                total = summary.total,
                completed = summary.completed,
                pending = summary.pending,
                "Export saved"
            );
        }
        Some(Commands::Upcoming { days }) => {
            let days = days.unwrap_or(config.horizon_days);
            let due = views::upcoming(store.tasks(), now, days);
            info!(count = due.len(), days, "Upcoming tasks");
            for task in due {
                info!(
                    deadline = %task.deadline.format("%Y-%m-%d %H:%M"),
                    priority = %task.priority,
                    overdue = views::is_overdue(task, now),
                    title = %task.title,
                    "Task"
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_quiets_http_crates() {
        let filter = log_filter("debug").to_string();
        assert!(filter.contains("hyper=warn"));
        assert!(filter.contains("tower_http=warn"));
    }

    #[test]
    fn test_args_default_to_serve() {
        let args = Args::try_parse_from(["scadenzario"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.log_level, "info");

        let args = Args::try_parse_from(["scadenzario", "export", "--format", "pdf"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Export { format: ExportFormat::Pdf })));
    }
}
