//
//  planning-tool
//  cli/display.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Terminal rendering of records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::jira::{Comment, JiraUser};
use crate::model::{Status, TestCase, TestCycle, TestExecution, TestStep};
use crate::output::{
    format_bool, format_optional, format_status, print_field, print_header, truncate, TableOutput,
    TableRow,
};

fn format_date(value: &Option<DateTime<Utc>>) -> String {
    format_optional(value.map(|d| d.format("%Y-%m-%d %H:%M UTC")))
}

fn status_text(name: &Option<String>, color: bool) -> String {
    match name {
        Some(name) => format_status(name, color),
        None => "-".to_string(),
    }
}

fn print_custom_fields<'a>(
    fields: impl IntoIterator<Item = (&'a String, &'a crate::model::CustomFieldValue)>,
    color: bool,
) {
    let mut fields = fields.into_iter().peekable();
    if fields.peek().is_none() {
        return;
    }
    println!();
    print_header("Custom fields");
    for (name, value) in fields {
        print_field(name, &value.to_string(), color);
    }
}

/// Key, name and status of a record, for `--parse simple`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub key: String,
    pub name: String,
    pub status: Option<String>,
}

impl From<&TestCycle> for Summary {
    fn from(cycle: &TestCycle) -> Self {
        Self {
            key: cycle.key.clone(),
            name: cycle.name.clone(),
            status: cycle.status_name.clone(),
        }
    }
}

impl From<&TestCase> for Summary {
    fn from(case: &TestCase) -> Self {
        Self {
            key: case.key.clone(),
            name: case.name.clone(),
            status: case.status_name.clone(),
        }
    }
}

impl From<&TestExecution> for Summary {
    fn from(execution: &TestExecution) -> Self {
        Self {
            key: execution.key.clone(),
            name: execution.test_case_key.clone(),
            status: execution.status_name.clone(),
        }
    }
}

impl TableOutput for Summary {
    fn print_table(&self, color: bool) {
        println!("{}  {}  {}", self.key, self.name, status_text(&self.status, color));
    }
}

impl TableOutput for TestCycle {
    fn print_table(&self, color: bool) {
        print_header(&format!("{}: {}", self.key, self.name));
        print_field("ID", &self.id.to_string(), color);
        print_field("Project ID", &self.project_id.to_string(), color);
        print_field("Status", &status_text(&self.status_name, color), color);
        print_field("Planned start", &format_date(&self.planned_start), color);
        print_field("Planned end", &format_date(&self.planned_end), color);
        print_field("Owner", &format_optional(self.owner_account_id.as_ref()), color);

        let plans: Vec<String> = self
            .links
            .test_plans
            .iter()
            .map(|link| link.test_plan_id.to_string())
            .collect();
        if !plans.is_empty() {
            print_field("Test plans", &plans.join(", "), color);
        }

        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }

        print_custom_fields(&self.custom_fields, color);
    }
}

impl TableRow for TestCycle {
    fn headers() -> &'static [&'static str] {
        &["Key", "Name", "Status", "Planned start", "Planned end"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            truncate(&self.name, 50),
            status_text(&self.status_name, color),
            format_date(&self.planned_start),
            format_date(&self.planned_end),
        ]
    }
}

impl TableOutput for TestCase {
    fn print_table(&self, color: bool) {
        print_header(&format!("{}: {}", self.key, self.name));
        print_field("ID", &self.id.to_string(), color);
        print_field("Status", &status_text(&self.status_name, color), color);
        print_field("Folder", &format_optional(self.folder_name.as_ref()), color);
        print_field("Owner", &format_optional(self.owner_account_id.as_ref()), color);
        if !self.labels.is_empty() {
            print_field("Labels", &self.labels.join(", "), color);
        }
        if let Some(objective) = &self.objective {
            print_field("Objective", objective, color);
        }
        print_custom_fields(&self.custom_fields, color);
    }
}

impl TableRow for TestCase {
    fn headers() -> &'static [&'static str] {
        &["Key", "Name", "Folder", "Status"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            truncate(&self.name, 60),
            format_optional(self.folder_name.as_ref()),
            status_text(&self.status_name, color),
        ]
    }
}

impl TableOutput for TestExecution {
    fn print_table(&self, color: bool) {
        print_header(&self.key);
        print_field("ID", &self.id.to_string(), color);
        let case = match self.test_case_version {
            Some(version) => format!("{} (version {})", self.test_case_key, version),
            None => self.test_case_key.clone(),
        };
        print_field("Test case", &case, color);
        print_field("Status", &status_text(&self.status_name, color), color);
        print_field("Ended", &format_date(&self.actual_end_date), color);
        print_field("Executed by", &format_optional(self.executed_by.as_ref()), color);
        print_field("Assigned to", &format_optional(self.assigned_to.as_ref()), color);
        print_field("Automated", &format_bool(self.automated, color), color);
        if let Some(ms) = self.execution_time_ms {
            print_field("Duration", &format!("{:.1} s", ms as f64 / 1000.0), color);
        }
        if let Some(comment) = &self.comment {
            print_field("Comment", comment, color);
        }
        print_custom_fields(&self.custom_fields, color);
    }
}

impl TableRow for TestExecution {
    fn headers() -> &'static [&'static str] {
        &["Key", "Test case", "Status", "Ended", "Executed by"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.key.clone(),
            self.test_case_key.clone(),
            status_text(&self.status_name, color),
            format_date(&self.actual_end_date),
            format_optional(self.executed_by.as_ref()),
        ]
    }
}

impl TableRow for TestStep {
    fn headers() -> &'static [&'static str] {
        &["Step", "Test data", "Expected result", "Actual result", "Status"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        match self {
            TestStep::Inline {
                description,
                test_data,
                expected_result,
                actual_result,
                status_name,
            } => vec![
                format_optional(description.as_ref()),
                format_optional(test_data.as_ref()),
                format_optional(expected_result.as_ref()),
                format_optional(actual_result.as_ref()),
                status_text(status_name, color),
            ],
            TestStep::Call { test_case_key } => vec![
                format!("Run {}", test_case_key),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
            ],
        }
    }
}

impl TableOutput for Status {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Project ID", &format_optional(self.project_id), color);
        print_field("Default", &format_bool(self.default, color), color);
        print_field("Archived", &format_bool(self.archived, color), color);
        if let Some(description) = &self.description {
            print_field("Description", description, color);
        }
    }
}

impl TableRow for Status {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Project ID", "Default", "Archived"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            format_status(&self.name, color),
            format_optional(self.project_id),
            format_bool(self.default, color),
            format_bool(self.archived, color),
        ]
    }
}

impl TableOutput for JiraUser {
    fn print_table(&self, color: bool) {
        print_header(self.display_name.as_deref().unwrap_or(&self.account_id));
        print_field("Account ID", &self.account_id, color);
        print_field("Email", &format_optional(self.email_address.as_ref()), color);
        print_field("Active", &format_bool(self.active, color), color);
    }
}

impl TableOutput for Comment {
    fn print_table(&self, color: bool) {
        print_field("Comment", &self.id, color);
        if let Some(url) = &self.self_url {
            print_field("URL", url, color);
        }
    }
}
