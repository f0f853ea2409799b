//! Quota summary handler.

use owo_colors::OwoColorize;
use tabled::Tabled;

use oauthdesk_core::{Console, SessionContext, Summary, SummaryQuota};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct QuotaRow {
    #[tabled(rename = "Resource")]
    resource: &'static str,
    #[tabled(rename = "Used")]
    used: u64,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

fn rows(summary: &Summary, color: bool) -> Vec<QuotaRow> {
    let row = |resource, quota: SummaryQuota| QuotaRow {
        resource,
        used: quota.used,
        total: quota.total,
        remaining: if color && quota.is_exhausted() {
            quota.remaining().red().to_string()
        } else {
            quota.remaining().to_string()
        },
    };
    vec![
        row("applications", summary.applications),
        row("authorizations", summary.authorizations),
        row("contacts", summary.contacts),
    ]
}

pub async fn handle(
    console: &Console,
    ctx: &SessionContext,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let Some(summary) = console.summary().select(ctx, ()).await? else {
        return Err(CliError::Internal("server returned no summary".into()));
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        summary.as_ref(),
        |s| {
            tabled::Table::new(rows(s, color))
                .with(tabled::settings::Style::rounded())
                .to_string()
        },
        |s| {
            rows(s, false)
                .into_iter()
                .map(|r| format!("{}={}/{}", r.resource, r.used, r.total))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
