//! Authorization command handlers.

use tabled::Tabled;

use oauthdesk_core::{
    Authorization, AuthorizationGrant, Console, EntityId, NewAuthorization, SessionContext,
};

use crate::cli::{AuthorizationsArgs, AuthorizationsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AuthorizationRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Server")]
    server: String,
    #[tabled(rename = "Scope")]
    scope: String,
}

impl From<&Authorization> for AuthorizationRow {
    fn from(auth: &Authorization) -> Self {
        Self {
            id: auth.id.get(),
            client: auth
                .client_name()
                .map_or_else(output::missing, str::to_owned),
            server: auth
                .server_app
                .as_ref()
                .map_or_else(output::missing, |app| app.name.clone()),
            scope: auth.scope_name().map_or_else(output::missing, str::to_owned),
        }
    }
}

fn label(auth: &Authorization) -> String {
    format!(
        "{}:{}",
        auth.client_name().unwrap_or("-"),
        auth.scope_name().unwrap_or("-")
    )
}

fn grant_detail(grant: &AuthorizationGrant) -> String {
    [
        format!("Code:  {}", grant.code),
        format!("State: {}", grant.state),
    ]
    .join("\n")
}

pub async fn handle(
    console: &Console,
    ctx: &SessionContext,
    args: AuthorizationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = console.authorizations();

    match args.command {
        AuthorizationsCommand::List => {
            let snapshot = store.select(ctx, ()).await?;
            let auths: Vec<&Authorization> = snapshot.iter().map(AsRef::as_ref).collect();
            let out = output::render_list(
                &global.output,
                &auths,
                |a| AuthorizationRow::from(*a),
                |a| a.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthorizationsCommand::Create {
            client_id,
            scope,
            redirect_uri,
            state,
        } => {
            let payload = NewAuthorization::code(client_id, scope, redirect_uri, state);
            let grant = store.create(ctx, (), payload).await?;
            tracing::info!("authorization code issued");

            let out = output::render_single(
                &global.output,
                grant.as_ref(),
                grant_detail,
                |g| g.code.clone(),
            )?;
            output::print_output(&out, global.quiet);
            output::success(global, "Authorization granted");
            Ok(())
        }

        AuthorizationsCommand::Remove { id } => {
            let snapshot = store.select(ctx, ()).await?;
            let auth = util::find_by_id(
                &snapshot,
                EntityId::new(id),
                "authorization",
                "authorizations list",
            )?;

            if !util::confirm(&format!("Revoke authorization {}?", label(&auth)), global.yes)? {
                return Ok(());
            }

            store.remove(ctx, (), &auth).await?;
            tracing::info!(id = %auth.id, "authorization revoked");
            output::success(global, &format!("Authorization {} revoked", label(&auth)));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_detail_shows_code_and_state() {
        let grant = AuthorizationGrant {
            code: "deadbeef".into(),
            state: "xyz".into(),
        };
        assert_eq!(grant_detail(&grant), "Code:  deadbeef\nState: xyz");
    }
}
