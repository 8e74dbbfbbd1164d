use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::directory::RoleDirectory;
use super::domain::Role;
use super::errors::AccessError;

/// Access-control service independent of the web framework. Wraps the
/// immutable role directory and implements the gateway's gates.
pub struct AccessService {
    directory: Arc<RoleDirectory>,
}

impl AccessService {
    pub fn new(directory: Arc<RoleDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the bearer token to a role. `None` or an unknown token both
    /// fail with `InvalidToken`.
    #[instrument(skip(self, token))]
    pub fn authenticate(&self, token: Option<&str>) -> Result<Role, AccessError> {
        let token = token.ok_or(AccessError::InvalidToken)?;
        match self.directory.resolve_role(token) {
            Some(role) => {
                debug!(%role, "token resolved");
                Ok(role)
            }
            None => {
                warn!("unknown bearer token");
                Err(AccessError::InvalidToken)
            }
        }
    }

    /// Gate: the caller's role must be one of `allowed`, otherwise the
    /// operation-specific detail is returned as `Forbidden`.
    pub fn require_any(
        &self,
        role: Role,
        allowed: &[Role],
        detail: &str,
    ) -> Result<(), AccessError> {
        if allowed.contains(&role) {
            return Ok(());
        }
        warn!(%role, detail, "role gate rejected caller");
        Err(AccessError::Forbidden(detail.to_string()))
    }

    /// Match a username/password pair against the credential records and
    /// hand back the corresponding token.
    #[instrument(skip(self, username, password), fields(username = %username))]
    pub fn login(&self, username: &str, password: &str) -> Result<String, AccessError> {
        let rec = self
            .directory
            .find_login(username, password)
            .ok_or(AccessError::InvalidCredentials)?;
        info!(role = %rec.role, "login accepted");
        Ok(rec.token.clone())
    }

    /// The caller's resolved role must equal the role label claimed in the
    /// request body. Unknown labels fail the same way as mismatches.
    pub fn authorize_claim(&self, role: Role, claimed_label: &str) -> Result<(), AccessError> {
        match Role::from_label(claimed_label) {
            Some(claimed) if claimed == role => Ok(()),
            _ => {
                warn!(%role, claimed_label, "role claim mismatch");
                Err(AccessError::Forbidden(
                    "Acceso no autorizado para ese rol".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc() -> AccessService {
        AccessService::new(Arc::new(RoleDirectory::with_defaults()))
    }

    #[test]
    fn authenticate_known_tokens() {
        let svc = svc();
        assert_eq!(svc.authenticate(Some("token_admin")), Ok(Role::Administrator));
        assert_eq!(
            svc.authenticate(Some("token_orquestador")),
            Ok(Role::Orchestrator)
        );
        assert_eq!(svc.authenticate(Some("token_usuario")), Ok(Role::User));
    }

    #[test]
    fn authenticate_missing_or_unknown_token() {
        let svc = svc();
        assert_eq!(svc.authenticate(None), Err(AccessError::InvalidToken));
        assert_eq!(svc.authenticate(Some("nope")), Err(AccessError::InvalidToken));
        assert_eq!(svc.authenticate(Some("")), Err(AccessError::InvalidToken));
    }

    #[test]
    fn require_any_gates_by_membership() {
        let svc = svc();
        let allowed = [Role::Administrator, Role::Orchestrator];
        assert!(svc.require_any(Role::Administrator, &allowed, "no").is_ok());
        assert_eq!(
            svc.require_any(Role::User, &allowed, "No autorizado"),
            Err(AccessError::Forbidden("No autorizado".into()))
        );
    }

    #[test]
    fn login_returns_seeded_tokens() {
        let svc = svc();
        assert_eq!(svc.login("admin", "123").unwrap(), "token_admin");
        assert_eq!(svc.login("orquestador", "123").unwrap(), "token_orquestador");
        assert_eq!(svc.login("usuario", "123").unwrap(), "token_usuario");
        assert_eq!(
            svc.login("admin", "wrong"),
            Err(AccessError::InvalidCredentials)
        );
    }

    #[test]
    fn authorize_claim_requires_exact_role() {
        let svc = svc();
        assert!(svc.authorize_claim(Role::Administrator, "Administrador").is_ok());
        assert!(svc.authorize_claim(Role::Administrator, "Usuario").is_err());
        assert!(svc.authorize_claim(Role::User, "Invitado").is_err());
    }
}
