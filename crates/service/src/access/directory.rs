use std::collections::HashMap;

use super::domain::{CredentialRecord, Role};

/// Read-only token→role directory plus the credential records behind it.
/// Built once at process start and shared immutably with the handlers, so
/// lookups need no locking.
#[derive(Debug, Clone)]
pub struct RoleDirectory {
    tokens: HashMap<String, Role>,
    credentials: Vec<CredentialRecord>,
}

impl RoleDirectory {
    pub fn from_records(credentials: Vec<CredentialRecord>) -> Self {
        let tokens = credentials
            .iter()
            .map(|rec| (rec.token.clone(), rec.role))
            .collect();
        Self { tokens, credentials }
    }

    /// The stub's built-in table: three fixed tokens, three fixed logins.
    pub fn with_defaults() -> Self {
        let seed = [
            ("admin", "token_admin", Role::Administrator),
            ("orquestador", "token_orquestador", Role::Orchestrator),
            ("usuario", "token_usuario", Role::User),
        ];
        Self::from_records(
            seed.into_iter()
                .map(|(username, token, role)| CredentialRecord {
                    username: username.into(),
                    password: "123".into(),
                    token: token.into(),
                    role,
                })
                .collect(),
        )
    }

    pub fn resolve_role(&self, token: &str) -> Option<Role> {
        self.tokens.get(token).copied()
    }

    /// Linear scan over the record list; the table is tiny by design.
    pub fn find_login(&self, username: &str, password: &str) -> Option<&CredentialRecord> {
        self.credentials
            .iter()
            .find(|rec| rec.username == username && rec.password == password)
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_resolve() {
        let dir = RoleDirectory::with_defaults();
        assert_eq!(dir.resolve_role("token_admin"), Some(Role::Administrator));
        assert_eq!(dir.resolve_role("token_orquestador"), Some(Role::Orchestrator));
        assert_eq!(dir.resolve_role("token_usuario"), Some(Role::User));
        assert_eq!(dir.resolve_role("token_otro"), None);
    }

    #[test]
    fn login_scan_matches_exact_pair() {
        let dir = RoleDirectory::with_defaults();
        let rec = dir.find_login("admin", "123").unwrap();
        assert_eq!(rec.token, "token_admin");
        assert!(dir.find_login("admin", "1234").is_none());
        assert!(dir.find_login("Admin", "123").is_none());
    }
}
