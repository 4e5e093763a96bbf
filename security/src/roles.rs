// security/src/roles.rs
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RolesError {
    #[error("Failed to read roles file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse roles file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct RoleConfig {
    pub id: u32,
    pub permissions: Vec<String>,
}

/// Declarative role -> permission lists, loaded from YAML. A role holding
/// the `superuser` permission passes every check.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RolesConfig {
    pub roles: HashMap<String, RoleConfig>,
    #[serde(skip)]
    role_id_map: HashMap<u32, RoleConfig>,
}

impl RolesConfig {
    pub fn from_yaml_file(path: &str) -> Result<Self, RolesError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, RolesError> {
        let mut config: RolesConfig = serde_yaml::from_str(content)?;
        config.role_id_map = config
            .roles
            .values()
            .map(|role_cfg| (role_cfg.id, role_cfg.clone()))
            .collect();
        Ok(config)
    }

    pub fn get_role_config_by_id(&self, role_id: u32) -> Option<&RoleConfig> {
        self.role_id_map.get(&role_id)
    }

    pub fn has_permission(&self, role_id: u32, permission_name: &str) -> bool {
        self.get_role_config_by_id(role_id).map_or(false, |role_cfg| {
            role_cfg.permissions.iter().any(|p| p == permission_name)
                || role_cfg.permissions.iter().any(|p| p == "superuser")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RolesConfig;

    const ROLES_YAML: &str = r#"
roles:
  admin:
    id: 1
    permissions:
      - superuser
  doctor:
    id: 2
    permissions:
      - records.read
      - prescriptions.write
"#;

    #[test]
    fn superuser_passes_every_check() {
        let config = RolesConfig::from_yaml_str(ROLES_YAML).unwrap();
        assert!(config.has_permission(1, "records.read"));
        assert!(config.has_permission(1, "anything.at.all"));
    }

    #[test]
    fn plain_role_is_limited_to_its_list() {
        let config = RolesConfig::from_yaml_str(ROLES_YAML).unwrap();
        assert!(config.has_permission(2, "records.read"));
        assert!(!config.has_permission(2, "staff.write"));
    }

    #[test]
    fn unknown_role_has_no_permissions() {
        let config = RolesConfig::from_yaml_str(ROLES_YAML).unwrap();
        assert!(!config.has_permission(9, "records.read"));
    }
}
