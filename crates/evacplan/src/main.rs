//! Evacplan - generate and manage power-loss migration plans.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use evacplan_common::config::{DEFAULT_PLAN_DIR, PLAN_DIR_ENV};
use evacplan_common::StoreConfig;
use evacplan_planner::{FileStore, Inventory, PlanService};

#[derive(Parser)]
#[command(name = "evacplan")]
#[command(
    author,
    version,
    about = "Build and store VM evacuation plans for UPS-triggered migrations"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding plan files
    #[arg(long, global = true, env = PLAN_DIR_ENV, default_value = DEFAULT_PLAN_DIR)]
    plan_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a plan from an inventory file and store it
    Generate {
        /// Inventory file (YAML or JSON)
        #[arg(long)]
        inventory: PathBuf,

        /// Plan file name inside the plan directory
        #[arg(long)]
        name: String,

        /// Print the plan instead of storing it
        #[arg(long)]
        stdout: bool,
    },

    /// Print a stored plan
    Show {
        /// Plan file name
        #[arg(long)]
        name: String,

        /// Mask passwords
        #[arg(long)]
        redact: bool,
    },

    /// List stored plans
    List,

    /// Delete a stored plan
    Delete {
        /// Plan file name
        #[arg(long)]
        name: String,
    },

    /// Parse a plan file and print a summary
    Check {
        /// Plan file path
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = StoreConfig::new(cli.plan_dir);
    let service = PlanService::new(FileStore::from_config(&config));

    match cli.command {
        Commands::Generate {
            inventory,
            name,
            stdout,
        } => {
            info!("Building plan from inventory {:?}", inventory);
            let inventory = Inventory::load(&inventory)
                .with_context(|| format!("Failed to load inventory {:?}", inventory))?;
            let plan = inventory.build_plan();

            if stdout {
                print!("{}", service.serialize(&plan)?);
            } else {
                let path = service.save_plan(&name, &plan).await?;
                info!(
                    "Plan written to {:?} ({} servers, {} VMs)",
                    path,
                    plan.servers.len(),
                    plan.vm_count()
                );
            }
        }

        Commands::Show { name, redact } => {
            let text = service.read(&name).await?;
            if redact {
                let plan = service
                    .parse(&text)
                    .with_context(|| format!("Stored plan {} is invalid", name))?;
                print!("{}", service.serialize(&plan.redacted())?);
            } else {
                print!("{}", text);
            }
        }

        Commands::List => {
            for name in service.list().await? {
                println!("{}", name);
            }
        }

        Commands::Delete { name } => {
            service.delete(&name).await?;
            info!("Deleted plan {}", name);
        }

        Commands::Check { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let plan = service
                .parse(&text)
                .with_context(|| format!("{:?} is not a valid plan", file))?;
            println!(
                "{:?}: ok ({} servers, {} hosts, {} VMs)",
                file,
                plan.servers.len(),
                plan.host_count(),
                plan.vm_count()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "evacplan",
            "--plan-dir",
            "/tmp/plans",
            "generate",
            "--inventory",
            "inv.yaml",
            "--name",
            "site.yaml",
        ])
        .unwrap();
        assert_eq!(cli.plan_dir, PathBuf::from("/tmp/plans"));
        match cli.command {
            Commands::Generate {
                inventory,
                name,
                stdout,
            } => {
                assert_eq!(inventory, PathBuf::from("inv.yaml"));
                assert_eq!(name, "site.yaml");
                assert!(!stdout);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_show_requires_name() {
        assert!(Cli::try_parse_from(["evacplan", "--plan-dir", "/tmp/p", "show"]).is_err());
    }
}
