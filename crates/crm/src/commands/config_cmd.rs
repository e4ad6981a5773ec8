//! `crm config` -- show the effective configuration or write a default file.

use anyhow::{Context, Result, bail};
use crm_config::{CrmConfig, save_config};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `crm config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            if ctx.json {
                output_json(&serde_json::json!({
                    "path": ctx.config_source().map(|p| p.display().to_string()),
                    "config": ctx.config,
                }));
            } else {
                if !ctx.quiet {
                    match ctx.config_source() {
                        Some(path) => println!("# {}", path.display()),
                        None => println!("# no config file, built-in defaults"),
                    }
                }
                let yaml =
                    serde_yaml::to_string(&ctx.config).context("failed to render configuration")?;
                print!("{yaml}");
            }
        }

        ConfigCommands::Init(init) => {
            let path = &ctx.init_path;
            if path.exists() && !init.force {
                bail!(
                    "{} already exists\nHint: pass --force to overwrite it",
                    path.display()
                );
            }
            save_config(path, &CrmConfig::default())
                .with_context(|| format!("failed to write {}", path.display()))?;

            if ctx.json {
                output_json(&serde_json::json!({ "path": path.display().to_string() }));
            } else if !ctx.quiet {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}
