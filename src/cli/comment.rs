//
//  planning-tool
//  cli/comment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira comment command

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::output::OutputWriter;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct CommentCommand {
    /// Jira issue key (e.g. OBS-42)
    pub issue_key: String,

    /// Comment text
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the comment text from a file
    #[arg(long, short = 'F')]
    pub file: Option<PathBuf>,
}

impl CommentCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => String::new(),
        };

        let client = global.client()?;
        let comment = client.post_comment(&self.issue_key, &text).await?;

        let out = OutputWriter::new(global.format());
        if global.json {
            out.write(&comment)
        } else {
            out.write_success(&format!("Commented on {} (comment {})", self.issue_key, comment.id));
            Ok(())
        }
    }
}
