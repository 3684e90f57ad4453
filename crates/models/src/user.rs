use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const COLLECTION: &str = "usuarios";

/// Stored shape of an admin-managed account. Wire field names match the
/// existing panel (`apellidoPaterno`, `fechaRegistro`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub nombre: String,
    #[serde(rename = "apellidoPaterno", skip_serializing_if = "Option::is_none")]
    pub apellido_paterno: Option<String>,
    #[serde(rename = "apellidoMaterno", skip_serializing_if = "Option::is_none")]
    pub apellido_materno: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(rename = "fechaRegistro")]
    pub fecha_registro: DateTime,
}

/// Create payload. Only nombre, email and password are required; the panel
/// submits the other fields as empty strings when left blank.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub nombre: String,
    #[serde(rename = "apellidoPaterno", default)]
    pub apellido_paterno: Option<String>,
    #[serde(rename = "apellidoMaterno", default)]
    pub apellido_materno: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.nombre.trim().is_empty() {
            return Err(ModelError::Validation("nombre is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(ModelError::Validation("email is required".into()));
        }
        if self.password.trim().is_empty() {
            return Err(ModelError::Validation("password is required".into()));
        }
        Ok(())
    }

    pub fn into_user(self) -> User {
        User {
            id: None,
            nombre: self.nombre,
            apellido_paterno: self.apellido_paterno,
            apellido_materno: self.apellido_materno,
            email: self.email,
            password: self.password,
            direccion: self.direccion,
            fecha_registro: DateTime::now(),
        }
    }
}

/// Update payload: any subset of the mutable fields.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub nombre: Option<String>,
    #[serde(rename = "apellidoPaterno")]
    pub apellido_paterno: Option<String>,
    #[serde(rename = "apellidoMaterno")]
    pub apellido_materno: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub direccion: Option<String>,
}

impl UpdateUser {
    /// Build the `$set` payload. An absent or empty password contributes
    /// nothing, so the stored password is never blanked by an edit form
    /// that leaves the field untouched.
    pub fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(v) = &self.nombre {
            set.insert("nombre", v);
        }
        if let Some(v) = &self.apellido_paterno {
            set.insert("apellidoPaterno", v);
        }
        if let Some(v) = &self.apellido_materno {
            set.insert("apellidoMaterno", v);
        }
        if let Some(v) = &self.email {
            set.insert("email", v);
        }
        if let Some(v) = &self.password {
            if !v.is_empty() {
                set.insert("password", v);
            }
        }
        if let Some(v) = &self.direccion {
            set.insert("direccion", v);
        }
        set
    }
}

/// Client-facing shape: hex `_id`, RFC 3339 timestamp, and no password.
#[derive(Clone, Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub nombre: String,
    #[serde(rename = "apellidoPaterno", skip_serializing_if = "Option::is_none")]
    pub apellido_paterno: Option<String>,
    #[serde(rename = "apellidoMaterno", skip_serializing_if = "Option::is_none")]
    pub apellido_materno: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(rename = "fechaRegistro")]
    pub fecha_registro: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            nombre: u.nombre,
            apellido_paterno: u.apellido_paterno,
            apellido_materno: u.apellido_materno,
            email: u.email,
            direccion: u.direccion,
            fecha_registro: u.fecha_registro.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_user() -> NewUser {
        NewUser {
            nombre: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secreta".into(),
            ..NewUser::default()
        }
    }

    #[test]
    fn new_user_requires_nombre_email_password() {
        assert!(valid_new_user().validate().is_ok());
        for blank in ["nombre", "email", "password"] {
            let mut input = valid_new_user();
            match blank {
                "nombre" => input.nombre = "  ".into(),
                "email" => input.email = String::new(),
                _ => input.password = String::new(),
            }
            assert!(input.validate().is_err(), "{blank} should be required");
        }
    }

    #[test]
    fn set_document_skips_absent_password() {
        let update = UpdateUser { nombre: Some("Ana".into()), ..UpdateUser::default() };
        let set = update.set_document();
        assert_eq!(set.get_str("nombre").unwrap(), "Ana");
        assert!(!set.contains_key("password"));
    }

    #[test]
    fn set_document_skips_empty_password() {
        let update = UpdateUser { password: Some(String::new()), ..UpdateUser::default() };
        assert!(!update.set_document().contains_key("password"));
    }

    #[test]
    fn set_document_keeps_real_password() {
        let update = UpdateUser { password: Some("p2".into()), ..UpdateUser::default() };
        assert_eq!(update.set_document().get_str("password").unwrap(), "p2");
    }

    #[test]
    fn response_excludes_password() {
        let user = valid_new_user().into_user();
        let resp = UserResponse::from(user);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("fechaRegistro").is_some());
    }
}
