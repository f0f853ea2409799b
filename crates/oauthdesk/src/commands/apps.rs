//! Application command handlers.

use tabled::Tabled;

use oauthdesk_core::{Application, Console, EntityId, NewApplication, SessionContext};

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Website")]
    website: String,
    #[tabled(rename = "Callback")]
    callback: String,
}

impl From<&Application> for AppRow {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id.get(),
            name: app.name.clone(),
            website: app.website_uri.clone(),
            callback: app.callback_uri.clone(),
        }
    }
}

fn detail(app: &Application) -> String {
    [
        format!("ID:       {}", app.id),
        format!("Name:     {}", app.name),
        format!("Website:  {}", app.website_uri),
        format!("Callback: {}", app.callback_uri),
    ]
    .join("\n")
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    ctx: &SessionContext,
    args: AppsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.applications();

    match args.command {
        AppsCommand::List => {
            let snapshot = store.select(ctx, ()).await?;
            let apps: Vec<&Application> = snapshot.iter().map(AsRef::as_ref).collect();
            let out = output::render_list(
                &global.output,
                &apps,
                |a| AppRow::from(*a),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppsCommand::Create {
            name,
            website,
            callback,
        } => {
            let payload = NewApplication::new(name, website, callback);
            payload.validate()?;

            let created = store.create(ctx, (), payload).await?;
            tracing::info!(id = %created.id, "application created");

            let out = output::render_single(
                &global.output,
                created.as_ref(),
                detail,
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            output::success(global, &format!("Application '{}' created", created.name));
            Ok(())
        }

        AppsCommand::Remove { id } => {
            let snapshot = store.select(ctx, ()).await?;
            let app = util::find_by_id(&snapshot, EntityId::new(id), "application", "apps list")?;

            if !util::confirm(
                &format!("Delete application '{}' and all its secrets?", app.name),
                global.yes,
            )? {
                return Ok(());
            }

            store.remove(ctx, (), &app).await?;
            tracing::info!(id = %app.id, "application removed");
            output::success(global, &format!("Application '{}' deleted", app.name));
            Ok(())
        }
    }
}
