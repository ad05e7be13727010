use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{PocketBaseError, Result};

/// Name under which the host's credential vault stores these credentials.
pub const CREDENTIAL_NAME: &str = "pocketBaseAdminApi";

/// Superuser credentials for one PocketBase instance.
///
/// Created from host-managed secret storage at execution start; read-only
/// for the rest of the invocation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Decodes the vault payload, rejecting missing or empty fields.
    pub fn from_value(value: Value) -> Result<Self> {
        let credentials = serde_json::from_value::<Credentials>(value)
            .map_err(|err| PocketBaseError::Credential(format!("invalid credentials: {}", err)))?;

        for (field, value) in [
            ("url", &credentials.url),
            ("email", &credentials.email),
            ("password", &credentials.password),
        ] {
            if value.is_empty() {
                return Err(PocketBaseError::Credential(format!("credential field '{}' must not be empty", field)));
            }
        }

        Ok(credentials)
    }
}

/// Declarative credential descriptor consumed by the host's credential vault.
pub fn credential_descriptor() -> Value {
    json!({
        "name": CREDENTIAL_NAME,
        "displayName": "PocketBase Admin API",
        "documentationUrl": "https://pocketbase.io/docs/authentication/",
        "properties": [
            {
                "displayName": "URL",
                "description": "The URL of the PocketBase instance",
                "name": "url",
                "type": "string",
                "default": "",
                "required": true,
            },
            {
                "displayName": "Email",
                "description": "The email address of the PocketBase admin (superuser)",
                "name": "email",
                "type": "string",
                "default": "",
                "required": true,
            },
            {
                "displayName": "Password",
                "description": "The password of the PocketBase admin (superuser)",
                "name": "password",
                "type": "string",
                "default": "",
                "required": true,
                "typeOptions": {
                    "password": true,
                },
            },
        ],
    })
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_credentials_from_vault_payload() {
        let credentials = Credentials::from_value(json!({
            "url": "https://pb.example.com",
            "email": "admin@example.com",
            "password": "hunter22",
        }))
        .unwrap();
        assert_eq!(credentials.url, "https://pb.example.com");
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let result = Credentials::from_value(json!({
            "url": "https://pb.example.com",
            "email": "",
            "password": "hunter22",
        }));
        assert!(matches!(result, Err(PocketBaseError::Credential(_))));
    }

    #[test]
    fn test_descriptor_masks_password() {
        let descriptor = credential_descriptor();
        assert_eq!(descriptor["name"], "pocketBaseAdminApi");
        assert_eq!(descriptor["properties"][2]["typeOptions"]["password"], true);
    }
}
