use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed role set understood by the gateway. Labels are the wire-level
/// Spanish strings the upstream clients send and expect back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "Orquestador")]
    Orchestrator,
    #[serde(rename = "Usuario")]
    User,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::Orchestrator => "Orquestador",
            Role::User => "Usuario",
        }
    }

    /// Parse a wire label; `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Role> {
        match label {
            "Administrador" => Some(Role::Administrator),
            "Orquestador" => Some(Role::Orchestrator),
            "Usuario" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One enumerable credential record (username/password pair, the bearer token
/// it yields, and the role that token resolves to).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub token: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for role in [Role::Administrator, Role::Orchestrator, Role::User] {
            assert_eq!(Role::from_label(role.label()), Some(role));
        }
    }

    #[test]
    fn unknown_label_rejected() {
        assert_eq!(Role::from_label("Superusuario"), None);
        assert_eq!(Role::from_label("administrador"), None);
    }
}
