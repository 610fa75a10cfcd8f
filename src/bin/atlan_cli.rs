//! Atlan Command Line Interface
//!
//! Reads, certifies, tags and archives assets on a tenant. Connection
//! details come from `ATLAN_BASE_URL` / `ATLAN_API_KEY` (a `.env` file is
//! honoured).
//!
//! # Usage
//!
//! ```bash
//! atlan_cli get Table default/snowflake/1700000000/db/sch/orders
//! atlan_cli search PowerBIReport --prefix default/powerbi/1700000000 --limit 20
//! atlan_cli certify Table default/snowflake/1700000000/db/sch/orders verified -m "checked"
//! atlan_cli clear Table default/snowflake/1700000000/db/sch/orders orders owners
//! atlan_cli tag add Table default/snowflake/1700000000/db/sch/orders PII Confidential
//! atlan_cli archive 6b1c2f0e-4d1f-4c11-9a7e-0f4b1d2c3e4f
//! ```

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use atlan_sdk::prelude::*;
use atlan_sdk::registry;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "atlan_cli")]
#[command(version = "0.1.0")]
#[command(about = "Command-line client for an Atlan tenant")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one asset by GUID or qualified name
    Get {
        type_name: String,
        id: String,
        /// Include related assets
        #[arg(long)]
        relationships: bool,
    },

    /// List assets of a type
    Search {
        type_name: String,
        /// Only qualified names starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long)]
        include_archived: bool,
    },

    /// Set the certificate of an asset
    Certify {
        type_name: String,
        qualified_name: String,
        /// verified, draft or deprecated
        status: String,
        #[arg(long, short)]
        message: Option<String>,
    },

    /// Remove the certificate of an asset
    Uncertify {
        type_name: String,
        qualified_name: String,
        name: String,
    },

    /// Clear descriptive attributes of an asset
    Clear {
        type_name: String,
        qualified_name: String,
        name: String,
        #[arg(value_enum)]
        field: ClearField,
    },

    /// Set the announcement of an asset
    Announce {
        type_name: String,
        qualified_name: String,
        /// information, warning or issue
        kind: String,
        title: String,
        #[arg(long, short)]
        message: Option<String>,
    },

    /// Attach or detach Atlan tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Soft-delete assets by GUID
    Archive { guids: Vec<String> },

    /// Reactivate an archived asset
    Restore {
        type_name: String,
        qualified_name: String,
    },

    /// Permanently delete assets by GUID
    Purge { guids: Vec<String> },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClearField {
    Description,
    UserDescription,
    Owners,
}

#[derive(Subcommand)]
enum TagAction {
    Add {
        type_name: String,
        qualified_name: String,
        names: Vec<String>,
        /// Keep the tags on this asset only
        #[arg(long)]
        no_propagate: bool,
    },
    Remove {
        type_name: String,
        qualified_name: String,
        name: String,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    atlan_sdk::telemetry::init();

    let cli = Cli::parse();
    match run(cli.command, cli.format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, format: OutputFormat) -> Result<()> {
    let client = AtlanClient::from_env().context("failed to configure the Atlan client")?;

    match command {
        Commands::Get {
            type_name,
            id,
            relationships,
        } => {
            check_type(&type_name)?;
            let entity = client.get_entity(&type_name, &id, relationships).await?;
            print_entities(&[entity], format)?;
        }
        Commands::Search {
            type_name,
            prefix,
            limit,
            include_archived,
        } => {
            check_type(&type_name)?;
            let mut search = FluentSearch::for_type_name(&type_name, include_archived)
                .page_size(limit.min(100));
            if let Some(prefix) = prefix {
                search = search.filter(fields::QUALIFIED_NAME.starts_with(prefix));
            }
            let mut pager = client.pager(&search);
            let mut found = Vec::new();
            while found.len() < limit {
                match pager.next_page().await? {
                    Some(page) => found.extend(page),
                    None => break,
                }
            }
            found.truncate(limit);
            if format == OutputFormat::Pretty {
                println!(
                    "{} {} of {} match(es)",
                    "OK".green(),
                    found.len(),
                    pager.approximate_count().unwrap_or_default()
                );
            }
            print_entities(&found, format)?;
        }
        Commands::Certify {
            type_name,
            qualified_name,
            status,
            message,
        } => {
            check_type(&type_name)?;
            let status: CertificateStatus = status
                .parse()
                .with_context(|| format!("unknown certificate status '{}'", status))?;
            let updated = client
                .update_certificate_entity(&type_name, &qualified_name, status, message.as_deref())
                .await?;
            report("certified", &qualified_name, updated.is_some(), format);
        }
        Commands::Uncertify {
            type_name,
            qualified_name,
            name,
        } => {
            check_type(&type_name)?;
            let updated = client
                .remove_certificate_entity(&type_name, &qualified_name, &name)
                .await?;
            report("uncertified", &qualified_name, updated.is_some(), format);
        }
        Commands::Clear {
            type_name,
            qualified_name,
            name,
            field,
        } => {
            check_type(&type_name)?;
            let updated = match field {
                ClearField::Description => {
                    client
                        .remove_description_entity(&type_name, &qualified_name, &name)
                        .await?
                }
                ClearField::UserDescription => {
                    client
                        .remove_user_description_entity(&type_name, &qualified_name, &name)
                        .await?
                }
                ClearField::Owners => {
                    client
                        .remove_owners_entity(&type_name, &qualified_name, &name)
                        .await?
                }
            };
            report("cleared", &qualified_name, updated.is_some(), format);
        }
        Commands::Announce {
            type_name,
            qualified_name,
            kind,
            title,
            message,
        } => {
            check_type(&type_name)?;
            let kind: AtlanAnnouncementType = kind
                .parse()
                .with_context(|| format!("unknown announcement type '{}'", kind))?;
            let updated = client
                .update_announcement_entity(
                    &type_name,
                    &qualified_name,
                    kind,
                    &title,
                    message.as_deref(),
                )
                .await?;
            report("announced", &qualified_name, updated.is_some(), format);
        }
        Commands::Tag { action } => match action {
            TagAction::Add {
                type_name,
                qualified_name,
                names,
                no_propagate,
            } => {
                check_type(&type_name)?;
                if names.is_empty() {
                    bail!("no tag names given");
                }
                let propagation = if no_propagate {
                    TagPropagation::none()
                } else {
                    TagPropagation::default()
                };
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                client
                    .append_atlan_tags_entity(&type_name, &qualified_name, &names, &propagation)
                    .await?;
                report("tagged", &qualified_name, true, format);
            }
            TagAction::Remove {
                type_name,
                qualified_name,
                name,
            } => {
                check_type(&type_name)?;
                client
                    .remove_atlan_tag_entity(&type_name, &qualified_name, &name)
                    .await?;
                report("untagged", &qualified_name, true, format);
            }
        },
        Commands::Archive { guids } => {
            if guids.is_empty() {
                bail!("no GUIDs given");
            }
            let response = client.archive(&guids).await?;
            print_entities(&response.mutated_entities.deleted, format)?;
        }
        Commands::Restore {
            type_name,
            qualified_name,
        } => {
            check_type(&type_name)?;
            let active = client.restore_entity(&type_name, &qualified_name).await?;
            report("restored", &qualified_name, active, format);
        }
        Commands::Purge { guids } => {
            if guids.is_empty() {
                bail!("no GUIDs given");
            }
            let response = client.purge(&guids).await?;
            print_entities(&response.mutated_entities.deleted, format)?;
        }
    }
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn check_type(type_name: &str) -> Result<()> {
    if registry::is_registered(type_name) {
        return Ok(());
    }
    bail!(
        "unknown asset type '{}'; known types: {}",
        type_name,
        registry::registered_type_names().join(", ")
    )
}

fn report(action: &str, qualified_name: &str, changed: bool, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "action": action, "qualifiedName": qualified_name, "changed": changed })
        ),
        OutputFormat::Pretty if changed => {
            println!("{} {} {}", "OK".green(), action, qualified_name)
        }
        OutputFormat::Pretty => println!(
            "{} nothing {} for {}",
            "WARN".yellow(),
            action,
            qualified_name
        ),
    }
}

fn print_entities(entities: &[Entity], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entities)?);
        }
        OutputFormat::Pretty => {
            for entity in entities {
                println!(
                    "  {} {} {} [{}]",
                    entity.type_name.cyan(),
                    entity.guid.as_deref().unwrap_or("-").dimmed(),
                    entity.qualified_name().unwrap_or("-"),
                    entity.status()
                );
            }
        }
    }
    Ok(())
}
