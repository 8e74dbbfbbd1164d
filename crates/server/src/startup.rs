use std::{env, net::SocketAddr, sync::Arc};

use anyhow::anyhow;
use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::GatewayState};
use service::access::{
    directory::RoleDirectory,
    domain::{CredentialRecord, Role},
    service::AccessService,
};

/// Initialize logging via shared common utils; `LOG_FORMAT=json` selects
/// the structured JSON output.
fn init_logging() {
    let format = env::var("LOG_FORMAT").ok();
    if use_json_logs(format.as_deref()) {
        init_logging_json();
    } else {
        init_logging_default();
    }
}

fn use_json_logs(format: Option<&str>) -> bool {
    matches!(format, Some("json"))
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Translate configured credential entries into the directory's records.
/// An unknown role label is a configuration error, not a runtime one.
pub fn build_directory(cfg: &configs::AuthConfig) -> anyhow::Result<RoleDirectory> {
    let records = cfg
        .credentials
        .iter()
        .map(|entry| {
            let role = Role::from_label(&entry.role)
                .ok_or_else(|| anyhow!("unknown role label in auth.credentials: {}", entry.role))?;
            Ok(CredentialRecord {
                username: entry.username.clone(),
                password: entry.password.clone(),
                token: entry.token.clone(),
                role,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(RoleDirectory::from_records(records))
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::ServerConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(s) => (s.host.clone(), s.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// A missing config file means "use the built-in defaults"; anything else
/// (unreadable TOML, bad port, unknown role label) must not be swallowed,
/// or a broken credential table would silently revert to the stub logins.
fn is_missing_config(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(c) => Some(c),
        Err(e) if is_missing_config(&e) => {
            info!("no config file found, using built-in defaults");
            None
        }
        Err(e) => return Err(e.context("invalid configuration")),
    };

    // Read-only credential directory, injected into every handler
    let directory = match &cfg {
        Some(c) => build_directory(&c.auth)?,
        None => RoleDirectory::with_defaults(),
    };
    info!(records = directory.records().len(), "role directory loaded");

    let state = GatewayState {
        access: Arc::new(AccessService::new(Arc::new(directory))),
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr(cfg.as_ref().map(|c| &c.server))?;
    info!(%addr, "starting access gateway");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_built_from_config_entries() {
        let cfg = configs::AuthConfig::default();
        let dir = build_directory(&cfg).unwrap();
        assert_eq!(dir.resolve_role("token_admin"), Some(Role::Administrator));
        assert_eq!(dir.records().len(), 3);
    }

    #[test]
    fn unknown_role_label_is_config_error() {
        let mut cfg = configs::AuthConfig::default();
        cfg.credentials[0].role = "Jefe".into();
        assert!(build_directory(&cfg).is_err());
    }

    #[test]
    fn only_missing_config_file_falls_back() {
        let missing = anyhow::Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert!(is_missing_config(&missing));

        let unreadable = anyhow::Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!is_missing_config(&unreadable));

        let invalid = anyhow!("server.port must be in 1..=65535");
        assert!(!is_missing_config(&invalid));
    }

    #[test]
    fn json_logs_only_on_explicit_opt_in() {
        assert!(use_json_logs(Some("json")));
        assert!(!use_json_logs(Some("compact")));
        assert!(!use_json_logs(None));
    }
}
