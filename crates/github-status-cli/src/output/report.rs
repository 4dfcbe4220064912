// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use console::{StyledObject, style};
use github_status_core::{ReportRow, StatusColor};

use super::Renderable;
use crate::cli::OutputContext;
use crate::commands::types::StatusResult;
use crate::table::TablePrinter;

const EMPTY_MESSAGE: &str = "No workflow runs found.";

/// Repository name in reverse video, colored by conclusion.
fn repository_label(row: &ReportRow, color: bool) -> StyledObject<&str> {
    let label = style(row.repository.as_str()).reverse().force_styling(color);
    match row.color {
        StatusColor::Green => label.green(),
        StatusColor::Red => label.red(),
        StatusColor::Yellow => label.yellow(),
    }
}

fn age_label(row: &ReportRow, color: bool) -> String {
    let age = style(row.age_summary()).force_styling(color);
    if row.stale {
        age.yellow().to_string()
    } else {
        age.to_string()
    }
}

impl Renderable for StatusResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        if self.report.is_empty() {
            return writeln!(w, "{EMPTY_MESSAGE}");
        }

        let mut table = TablePrinter::new(&["Repository", "Workflow", "Age", "URL"]);
        for row in &self.report.rows {
            table.add_row(vec![
                repository_label(row, ctx.color).to_string(),
                row.workflow.clone(),
                age_label(row, ctx.color),
                row.url.clone(),
            ]);
        }

        write!(w, "{}", table.render())
    }

    fn render_markdown(&self, w: &mut dyn Write, _ctx: &OutputContext) -> io::Result<()> {
        if self.report.is_empty() {
            return writeln!(w, "{EMPTY_MESSAGE}");
        }

        writeln!(w, "| Repository | Workflow | Branch | Conclusion | Age | URL |")?;
        writeln!(w, "|---|---|---|---|---|---|")?;
        for row in &self.report.rows {
            let age = if row.stale {
                format!("**{}**", row.age_summary())
            } else {
                row.age_summary()
            };
            writeln!(
                w,
                "| {} | {} | {} | {} | {} | [link]({}) |",
                row.repository, row.workflow, row.branch, row.conclusion, age, row.url
            )?;
        }
        Ok(())
    }
}
