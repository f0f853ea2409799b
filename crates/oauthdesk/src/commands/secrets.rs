//! Secret command handlers.

use tabled::Tabled;

use oauthdesk_core::{Console, EntityId, NewSecret, Secret, SessionContext};

use crate::cli::{GlobalOpts, SecretsArgs, SecretsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SecretRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Client ID")]
    client_id: String,
    #[tabled(rename = "Secret")]
    secret: String,
}

impl From<&Secret> for SecretRow {
    fn from(secret: &Secret) -> Self {
        Self {
            id: secret.id.get(),
            client_id: secret.client_id.clone(),
            secret: secret
                .client_secret
                .clone()
                .unwrap_or_else(|| "********".into()),
        }
    }
}

pub async fn handle(
    console: &Console,
    ctx: &SessionContext,
    args: SecretsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.secrets();

    match args.command {
        SecretsCommand::List { app } => {
            let snapshot = store.select(ctx, EntityId::new(app)).await?;
            let secrets: Vec<&Secret> = snapshot.iter().map(AsRef::as_ref).collect();
            let out = output::render_list(
                &global.output,
                &secrets,
                |s| SecretRow::from(*s),
                |s| s.client_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SecretsCommand::Create { app } => {
            let created = store
                .create(ctx, EntityId::new(app), NewSecret::default())
                .await?;
            tracing::info!(app, id = %created.id, "secret issued");

            let out = output::render_single(
                &global.output,
                created.as_ref(),
                |s| {
                    format!(
                        "ID:            {}\nClient ID:     {}\nClient secret: {}",
                        s.id,
                        s.client_id,
                        s.client_secret.as_deref().unwrap_or("(not disclosed)")
                    )
                },
                |s| s.client_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::success(global, "Secret issued. Store it now; it will not be shown again.");
            Ok(())
        }

        SecretsCommand::Remove { app, id } => {
            let app_id = EntityId::new(app);
            let snapshot = store.select(ctx, app_id).await?;
            let secret = util::find_by_id(
                &snapshot,
                EntityId::new(id),
                "secret",
                &format!("secrets list {app}"),
            )?;

            if !util::confirm(
                &format!("Revoke secret for client '{}'?", secret.client_id),
                global.yes,
            )? {
                return Ok(());
            }

            store.remove(ctx, app_id, &secret).await?;
            tracing::info!(app, id, "secret revoked");
            output::success(global, &format!("Secret {} revoked", secret.id));
            Ok(())
        }
    }
}
