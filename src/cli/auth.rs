//
//  planning-tool
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Credential check command
//!
//! `zapi auth check` verifies both tokens with one cheap request each:
//! Jira `myself`, and the first page of Zephyr Scale statuses.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::common::ApiError;
use crate::output::{print_field, OutputWriter, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Verify the configured tokens against both services
    Check,
}

/// Outcome of checking one service.
#[derive(Debug, Serialize)]
struct ServiceCheck {
    service: &'static str,
    url: String,
    ok: bool,
    detail: String,
}

#[derive(Debug, Serialize)]
struct AuthReport {
    services: Vec<ServiceCheck>,
}

impl TableOutput for AuthReport {
    fn print_table(&self, color: bool) {
        for check in &self.services {
            let mark = match (check.ok, color) {
                (true, true) => style("✓").green().bold().to_string(),
                (false, true) => style("✗").red().bold().to_string(),
                (true, false) => "✓".to_string(),
                (false, false) => "✗".to_string(),
            };
            println!("{} {}", mark, check.service);
            print_field("  URL", &check.url, color);
            print_field("  Result", &check.detail, color);
        }
    }
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Check => self.check(global).await,
        }
    }

    async fn check(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let credentials = client.credentials();

        let jira = client
            .myself()
            .await
            .map(|user| format!("Logged in as {}", user.display_name.unwrap_or(user.account_id)));

        let zephyr = client
            .list_statuses(None)
            .try_next()
            .await
            .map(|_| "Token accepted".to_string());

        let mut first_error: Option<ApiError> = None;
        let mut services = Vec::new();
        for (service, url, result) in [
            ("Jira", credentials.issue_tracker_base_url(), jira),
            ("Zephyr Scale", credentials.test_mgmt_base_url(), zephyr),
        ] {
            let (ok, detail) = match result {
                Ok(detail) => (true, detail),
                Err(e) => {
                    let detail = e.to_string();
                    first_error.get_or_insert(e);
                    (false, detail)
                }
            };
            services.push(ServiceCheck {
                service,
                url: url.to_string(),
                ok,
                detail,
            });
        }

        OutputWriter::new(global.format()).write(&AuthReport { services })?;

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}
