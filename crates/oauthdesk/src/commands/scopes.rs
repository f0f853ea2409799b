//! Scope command handlers.

use tabled::Tabled;

use oauthdesk_core::{Console, EntityId, NewScope, Scope, SessionContext};

use crate::cli::{GlobalOpts, ScopesArgs, ScopesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ScopeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Scope> for ScopeRow {
    fn from(scope: &Scope) -> Self {
        Self {
            id: scope.id.get(),
            name: scope.name.clone(),
            description: scope
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(output::missing),
        }
    }
}

pub async fn handle(
    console: &Console,
    ctx: &SessionContext,
    args: ScopesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.scopes();

    match args.command {
        ScopesCommand::List { app } => {
            let snapshot = store.select(ctx, EntityId::new(app)).await?;
            let scopes: Vec<&Scope> = snapshot.iter().map(AsRef::as_ref).collect();
            let out = output::render_list(
                &global.output,
                &scopes,
                |s| ScopeRow::from(*s),
                |s| s.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScopesCommand::Create {
            app,
            name,
            description,
        } => {
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "scope name cannot be empty".into(),
                });
            }

            let created = store
                .create(ctx, EntityId::new(app), NewScope::new(name, description))
                .await?;
            tracing::info!(app, id = %created.id, "scope created");

            let out = output::render_single(
                &global.output,
                created.as_ref(),
                |s| format!("ID:   {}\nName: {}", s.id, s.name),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            output::success(global, &format!("Scope '{}' created", created.name));
            Ok(())
        }

        ScopesCommand::Remove { app, id } => {
            let app_id = EntityId::new(app);
            let snapshot = store.select(ctx, app_id).await?;
            let scope = util::find_by_id(
                &snapshot,
                EntityId::new(id),
                "scope",
                &format!("scopes list {app}"),
            )?;

            if !util::confirm(&format!("Delete scope '{}'?", scope.name), global.yes)? {
                return Ok(());
            }

            store.remove(ctx, app_id, &scope).await?;
            tracing::info!(app, id, "scope removed");
            output::success(global, &format!("Scope '{}' deleted", scope.name));
            Ok(())
        }
    }
}
