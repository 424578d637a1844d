//! Contract template CLI
//!
//! Inspect, normalize, preview and export stored contract templates.
//! Logs go to stderr so command output can be piped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contract_template::{
    decode, find_variable, group_by_category, list_variables, normalize, variable_panel,
    ContextSource, ContextState, PanelSection, PreviewOptions, TemplateSession,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod sources;

use config::Config;
use sources::{ContextFormat, DirectorySink, JsonFileSource, LogNotifier};

#[derive(Parser, Debug)]
#[command(name = "contract-template")]
#[command(version, about = "Author and preview rental contract templates")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Where the substitution data comes from
#[derive(clap::Args, Debug)]
struct ContextArgs {
    /// Contract id; reads <context dir>/<id>.json
    #[arg(short, long)]
    contract: Option<String>,

    /// The contract file is a contract record rather than a ready context
    #[arg(long)]
    record: bool,
}

impl ContextArgs {
    fn load(&self, config: &Config) -> ContextState {
        let Some(contract_id) = &self.contract else {
            return ContextState::Loading;
        };
        let format = if self.record {
            ContextFormat::Record
        } else {
            ContextFormat::Context
        };
        JsonFileSource::new(&config.context_dir, format).fetch(contract_id)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog variables, or only those a contract provides
    Variables {
        #[command(flatten)]
        context: ContextArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a template in canonical storage form
    Normalize { template: PathBuf },
    /// List the placeholders a template references
    Inspect { template: PathBuf },
    /// Render a template preview as HTML
    Preview {
        template: PathBuf,

        #[command(flatten)]
        context: ContextArgs,

        /// Show tags instead of values
        #[arg(long)]
        edit: bool,
    },
    /// Export a template into the export directory
    Export {
        template: PathBuf,

        /// Output file name (without extension)
        #[arg(short, long)]
        name: String,
    },
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("contract_template=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    match args.command {
        Command::Variables { context, json } => {
            let sections = if context.contract.is_some() {
                variable_panel(&context.load(&config)).sections
            } else {
                group_by_category(list_variables())
                    .into_iter()
                    .map(|(category, variables)| PanelSection {
                        category,
                        title: category.title(),
                        variables,
                    })
                    .collect()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else {
                for section in &sections {
                    println!("{}", section.title);
                    for variable in &section.variables {
                        println!("  {:<28} {}", variable.tag(), variable.display_label);
                    }
                }
            }
        }
        Command::Normalize { template } => {
            println!("{}", normalize(&read_template(&template)?));
        }
        Command::Inspect { template } => {
            let document = decode(&read_template(&template)?);
            for node in document.placeholders() {
                match find_variable(node.path.as_str()) {
                    Some(descriptor) => println!("{}  {}", node.display_tag(), descriptor.display_label),
                    None => println!("{}  (not in catalog)", node.display_tag()),
                }
            }
        }
        Command::Preview {
            template,
            context,
            edit,
        } => {
            let options = if edit {
                PreviewOptions::edit()
            } else {
                PreviewOptions::default()
            };
            let mut session = TemplateSession::new(&read_template(&template)?).with_options(options);
            if let ContextState::Ready(data) = context.load(&config) {
                session.set_context(data);
            }

            let preview = session.preview();
            for path in &preview.unresolved {
                tracing::warn!(%path, "Unresolved placeholder");
            }
            if preview.loading > 0 {
                tracing::warn!(count = preview.loading, "No context loaded; placeholders left pending");
            }
            println!("{}", preview.html);
        }
        Command::Export { template, name } => {
            let session = TemplateSession::new(&read_template(&template)?);
            let mut sink = DirectorySink::new(&config.export_dir);
            let artifact = session.export(&name, &mut sink, &mut LogNotifier)?;
            println!("{}", config.export_dir.join(&artifact.file_name).display());
        }
    }

    Ok(())
}
