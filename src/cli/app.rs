//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{link_cmd, types_cmd, url_cmd};
use crate::domain::Link;
use crate::link_type::{LinkType, SiteLinkType};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "linkfield")]
#[command(author, version, about = "Resolve, validate and render typed link fields")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to `default_format` from the global config)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the current directory or a parent)
    #[arg(long, short = 'p', global = true, env = "LINKFIELD_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new linkfield project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// List registered link types by group
    Types,

    /// List sites that site links can target
    Sites {
        /// Site filter: `*` (all), empty (none) or comma-separated IDs
        #[arg(long)]
        filter: Option<String>,
    },

    /// Resolve, validate and render links
    #[command(subcommand)]
    Link(link_cmd::LinkCommands),

    /// Inspect and edit URLs
    #[command(subcommand)]
    Url(url_cmd::UrlCommands),
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format,
    };
    let output = Output::new(format);
    let project = cli.project.as_deref();

    output.verbose("linkfield starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created directory at: {}", project.project_dir().display()),
            );
            output.success(&format!(
                "Initialized linkfield project at {}",
                project.root().display()
            ));
        }

        Commands::Types => types_cmd::run(&output, project)?,

        Commands::Sites { filter } => {
            output.verbose_ctx("sites", &format!("Listing sites, filter: {:?}", filter));
            sites(&output, project, filter.as_deref())?
        }

        Commands::Link(cmd) => link_cmd::run(cmd, &output, project)?,
        Commands::Url(cmd) => url_cmd::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Converts a `--filter` argument into a `sites` setting
fn site_filter(filter: &str) -> Value {
    match filter.trim() {
        "*" => json!("*"),
        "" => json!(""),
        ids => Value::Array(
            ids.split(',')
                .map(|id| Value::String(id.trim().to_string()))
                .collect(),
        ),
    }
}

/// Lists the sites a site link can point at
fn sites(output: &Output, project: Option<&Path>, filter: Option<&str>) -> Result<()> {
    let project = Project::open_from(project)?;
    let site_type = SiteLinkType::new("Site", project.services()?);

    let setting = filter.map(site_filter);
    let options = site_type.site_options(setting.as_ref());
    output.verbose_ctx("sites", &format!("Found {} sites", options.len()));

    let rows: Vec<_> = options
        .iter()
        .map(|option| {
            let url = site_type.url(&Link::new("site", option.value.0));
            (option, url)
        })
        .collect();

    if output.is_json() {
        let items: Vec<_> = rows
            .iter()
            .map(|(option, url)| {
                json!({
                    "id": option.value,
                    "name": option.label,
                    "url": url,
                })
            })
            .collect();
        output.data(&items);
    } else if rows.is_empty() {
        println!("No sites found.");
    } else {
        println!("{:<6} {:<20} URL", "ID", "NAME");
        println!("{}", "-".repeat(60));
        for (option, url) in &rows {
            println!(
                "{:<6} {:<20} {}",
                option.value.0,
                option.label,
                url.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_site_filters() {
        assert_eq!(site_filter("*"), json!("*"));
        assert_eq!(site_filter(" "), json!(""));
        assert_eq!(site_filter("1, 3"), json!(["1", "3"]));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
