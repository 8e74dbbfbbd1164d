use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Credential records seeded into the gateway's role directory at startup.
/// When the TOML omits the section, the stub's three built-in records apply.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credentials")]
    pub credentials: Vec<CredentialEntry>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { credentials: default_credentials() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
    pub token: String,
    /// Role label as it appears on the wire (e.g. "Administrador").
    pub role: String,
}

fn default_credentials() -> Vec<CredentialEntry> {
    let seed = [
        ("admin", "123", "token_admin", "Administrador"),
        ("orquestador", "123", "token_orquestador", "Orquestador"),
        ("usuario", "123", "token_usuario", "Usuario"),
    ];
    seed.into_iter()
        .map(|(username, password, token, role)| CredentialEntry {
            username: username.into(),
            password: password.into(),
            token: token.into(),
            role: role.into(),
        })
        .collect()
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_empty() {
            return Err(anyhow!("auth.credentials must contain at least one record"));
        }
        for entry in &self.credentials {
            if entry.username.trim().is_empty() || entry.token.trim().is_empty() {
                return Err(anyhow!("auth.credentials entries need username and token"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_seed_credentials() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.auth.credentials.len(), 3);
        assert_eq!(cfg.auth.credentials[0].token, "token_admin");
        assert_eq!(cfg.auth.credentials[2].role, "Usuario");
    }

    #[test]
    fn normalize_fills_empty_host_and_threads() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn zero_port_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn toml_credentials_override_seed() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [[auth.credentials]]
            username = "ops"
            password = "s3cret"
            token = "token_ops"
            role = "Administrador"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.auth.credentials.len(), 1);
        assert_eq!(cfg.auth.credentials[0].token, "token_ops");
    }

    #[test]
    fn empty_credentials_rejected() {
        let mut cfg = AppConfig::default();
        cfg.auth.credentials.clear();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
