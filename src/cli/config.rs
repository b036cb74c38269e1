//
//  planning-tool
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for locating, showing and creating the
//! configuration file.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{config_exists, write_config_file, Config, CONFIG_TEMPLATE};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the configuration file path
    Path,

    /// Print the configuration read from the file
    Show,

    /// Write a commented configuration file
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Path => self.path(),
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Init(args) => self.init(args),
        }
    }

    fn path(&self) -> Result<()> {
        println!("{}", Config::config_path()?.display());
        Ok(())
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            print!("{}", toml::to_string_pretty(&config)?);
        }
        Ok(())
    }

    fn init(&self, args: &InitArgs) -> Result<()> {
        let path = Config::config_path()?;
        if config_exists(&path) && !args.force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }
        write_config_file(&path, CONFIG_TEMPLATE)?;
        println!("{} Wrote {}", style("✓").green(), path.display());
        Ok(())
    }
}
