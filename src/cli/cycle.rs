//
//  planning-tool
//  cli/cycle.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test cycle write commands

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use crate::model::{CustomFieldValue, TestCycle};
use crate::output::OutputWriter;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct CycleCommand {
    #[command(subcommand)]
    pub command: CycleSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CycleSubcommand {
    /// Create a test cycle
    Create(CreateArgs),

    /// Set one custom field of a test cycle
    SetField(SetFieldArgs),

    /// Attach a file to a test cycle
    Attach(AttachArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Zephyr Scale project id
    #[arg(long)]
    pub project_id: u64,

    /// Test cycle name
    #[arg(long)]
    pub name: String,

    /// HTML description
    #[arg(long)]
    pub description: Option<String>,

    /// Planned start, RFC 3339 (e.g. 2024-05-01T22:00:00Z)
    #[arg(long)]
    pub planned_start: Option<DateTime<Utc>>,

    /// Planned end, RFC 3339
    #[arg(long)]
    pub planned_end: Option<DateTime<Utc>>,

    /// Initial status name
    #[arg(long)]
    pub status: Option<String>,

    /// Folder id
    #[arg(long)]
    pub folder_id: Option<u64>,

    /// Owner's Jira account id
    #[arg(long)]
    pub owner: Option<String>,

    /// Custom field as NAME=VALUE; repeatable
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Parse custom field values as JSON instead of text
    #[arg(long)]
    pub json_value: bool,
}

#[derive(Args, Debug)]
pub struct SetFieldArgs {
    /// Test cycle key (e.g. BLOCK-R21)
    pub key: String,

    /// Custom field name (e.g. "Night Planner")
    pub field: String,

    /// New value
    pub value: String,

    /// Parse VALUE as JSON (true, 3, ["a","b"], null) instead of text
    #[arg(long)]
    pub json_value: bool,
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Test cycle key (e.g. BLOCK-R21)
    pub key: String,

    /// File to upload
    pub file: PathBuf,

    /// Attachment name; defaults to the file name
    #[arg(long)]
    pub name: Option<String>,
}

impl CycleCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CycleSubcommand::Create(args) => self.create(args, global).await,
            CycleSubcommand::SetField(args) => self.set_field(args, global).await,
            CycleSubcommand::Attach(args) => self.attach(args, global).await,
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let mut cycle = TestCycle::draft(args.project_id, args.name.clone());
        cycle.description = args.description.clone();
        cycle.planned_start = args.planned_start;
        cycle.planned_end = args.planned_end;
        cycle.status_name = args.status.clone();
        cycle.folder_id = args.folder_id;
        cycle.owner_account_id = args.owner.clone();
        for field in &args.fields {
            let (name, value) = field
                .split_once('=')
                .ok_or_else(|| anyhow!("Custom field '{}' is not NAME=VALUE", field))?;
            cycle
                .custom_fields
                .insert(name.trim().to_string(), parse_value(value, args.json_value)?);
        }

        let client = global.client()?;
        let key = client.create_test_cycle(&cycle).await?;

        if global.json {
            println!("{}", serde_json::json!({ "key": key }));
        } else {
            OutputWriter::new(global.format())
                .write_success(&format!("Created test cycle {}", key));
        }
        Ok(())
    }

    async fn set_field(&self, args: &SetFieldArgs, global: &GlobalOptions) -> Result<()> {
        let value = parse_value(&args.value, args.json_value)?;
        let client = global.client()?;
        client
            .update_test_cycle_custom_field(&args.key, &args.field, value)
            .await?;

        OutputWriter::new(global.format())
            .write_success(&format!("Set '{}' on {}", args.field, args.key));
        Ok(())
    }

    async fn attach(&self, args: &AttachArgs, global: &GlobalOptions) -> Result<()> {
        let filename = match &args.name {
            Some(name) => name.clone(),
            None => args
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow!("'{}' has no file name", args.file.display()))?,
        };
        let bytes = tokio::fs::read(&args.file)
            .await
            .with_context(|| format!("Failed to read {}", args.file.display()))?;

        let client = global.client()?;
        client.attach_file_to_cycle(&args.key, &filename, bytes).await?;

        OutputWriter::new(global.format())
            .write_success(&format!("Attached {} to {}", filename, args.key));
        Ok(())
    }
}

/// Text as is, or JSON when `json` is set.
fn parse_value(raw: &str, json: bool) -> Result<CustomFieldValue> {
    if !json {
        return Ok(CustomFieldValue::from(raw));
    }
    match serde_json::from_str(raw) {
        Ok(value) => Ok(CustomFieldValue::from_json(value)),
        Err(e) => bail!("'{}' is not valid JSON: {}", raw, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_text_and_json() {
        assert_eq!(parse_value("true", false).unwrap(), CustomFieldValue::from("true"));
        assert_eq!(parse_value("true", true).unwrap(), CustomFieldValue::Bool(true));
        assert_eq!(
            parse_value(r#"["a","b"]"#, true).unwrap(),
            CustomFieldValue::Options(vec!["a".into(), "b".into()])
        );
        assert!(parse_value("not json", true).is_err());
    }
}
