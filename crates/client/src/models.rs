//! Wire models for the backend's `/armas` and `/usuarios` resources.
//!
//! Field names on the wire are the backend's (Spanish); Rust names are ours.
//! Responses are validated on the way in: a body that does not fit these
//! shapes becomes [`crate::RequestError::Malformed`].

use armeria_auth::Role;
use armeria_core::{DomainError, DomainResult, Entity, UserId, WeaponId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Weapons
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "FUEGO")]
    Firearm,
    #[serde(rename = "BLANCA")]
    Blade,
    #[serde(rename = "EXPLOSIVO")]
    Explosive,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Firearm => "Fuego",
            Category::Blade => "Blanca",
            Category::Explosive => "Explosivo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "NUEVO")]
    New,
    #[serde(rename = "USADO")]
    Used,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "Nuevo",
            Condition::Used => "Usado",
        }
    }
}

/// Who created a weapon record.
///
/// List endpoints embed the creator; write endpoints may only echo its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Creator {
    Profile(CreatorProfile),
    Reference(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol", default)]
    pub role: Option<Role>,
}

/// Weapon record. The identifier keeps its wire name `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(rename = "_id")]
    pub id: WeaponId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "tipo")]
    pub category: Category,
    #[serde(rename = "estado")]
    pub condition: Condition,
    #[serde(rename = "creadorId", default)]
    pub creator: Option<Creator>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Weapon {
    pub fn creator_name(&self) -> Option<&str> {
        match &self.creator {
            Some(Creator::Profile(p)) => Some(&p.name),
            _ => None,
        }
    }
}

impl Entity for Weapon {
    type Id = WeaponId;

    fn id(&self) -> &WeaponId {
        &self.id
    }
}

/// Body of `POST /armas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWeapon {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "tipo")]
    category: Category,
    #[serde(rename = "estado")]
    condition: Condition,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl NewWeapon {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        condition: Condition,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("weapon name is required"));
        }
        Ok(Self {
            name,
            category,
            condition,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// Body of `PUT /armas/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeaponPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl WeaponPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.condition.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// User record with its identifier normalized to `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUser")]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role: Option<Role>,
}

/// User as the backend sends it: `id`, `_id`, or both.
#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "_id", default)]
    document_id: Option<String>,
    nombre: String,
    #[serde(default)]
    rol: Option<Role>,
}

impl TryFrom<RawUser> for User {
    type Error = DomainError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.document_id)
            .ok_or_else(|| DomainError::invalid_id("user without `id` or `_id`"))?;

        Ok(Self {
            id: UserId::new(id)?,
            name: raw.nombre,
            role: raw.rol,
        })
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Body of `POST /usuarios/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(rename = "nombre")]
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Answer of `POST /usuarios/login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub rol: Option<Role>,
}

/// Body of `POST /usuarios/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    #[serde(rename = "nombre")]
    name: String,
    password: String,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

impl NewUser {
    /// Only `USER` and `ADMIN` accounts can be registered.
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        role: Option<Role>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let password = password.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("user name is required"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        if role.is_some_and(|r| !r.is_authenticated()) {
            return Err(DomainError::validation("accounts can only be USER or ADMIN"));
        }
        Ok(Self {
            name,
            password,
            role,
        })
    }
}

impl core::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Body of `PUT /usuarios/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weapon_parses_populated_creator() {
        let w: Weapon = serde_json::from_value(json!({
            "_id": "w1",
            "nombre": "Sable",
            "descripcion": "Caballería",
            "tipo": "BLANCA",
            "estado": "USADO",
            "creadorId": { "nombre": "ana", "rol": "ADMIN" },
            "createdAt": "2025-01-02T03:04:05.000Z",
            "updatedAt": "2025-01-02T03:04:05.000Z"
        }))
        .unwrap();

        assert_eq!(w.id.as_str(), "w1");
        assert_eq!(w.category, Category::Blade);
        assert_eq!(w.condition, Condition::Used);
        assert_eq!(w.creator_name(), Some("ana"));
        assert!(w.created_at.is_some());
    }

    #[test]
    fn weapon_accepts_bare_creator_reference() {
        let w: Weapon = serde_json::from_value(json!({
            "_id": "w2",
            "nombre": "Granada",
            "tipo": "EXPLOSIVO",
            "estado": "NUEVO",
            "creadorId": "u7"
        }))
        .unwrap();

        assert_eq!(w.creator, Some(Creator::Reference("u7".into())));
        assert_eq!(w.description, "");
    }

    #[test]
    fn weapon_rejects_unknown_category() {
        let res = serde_json::from_value::<Weapon>(json!({
            "_id": "w3", "nombre": "x", "tipo": "LASER", "estado": "NUEVO"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn user_id_is_normalized_from_document_id() {
        let u: User = serde_json::from_value(json!({ "_id": "abc", "nombre": "ana", "rol": "USER" })).unwrap();
        assert_eq!(u.id.as_str(), "abc");

        let u: User = serde_json::from_value(json!({ "id": "x", "_id": "y", "nombre": "bo" })).unwrap();
        assert_eq!(u.id.as_str(), "x");
        assert_eq!(u.role, None);

        assert!(serde_json::from_value::<User>(json!({ "nombre": "nobody" })).is_err());
    }

    #[test]
    fn patch_only_serializes_present_fields() {
        let patch = WeaponPatch {
            condition: Some(Condition::Used),
            ..WeaponPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "estado": "USADO" }));
        assert!(WeaponPatch::default().is_empty());
    }

    #[test]
    fn new_weapon_validates_and_serializes() {
        assert!(NewWeapon::new(" ", Category::Blade, Condition::New, None).is_err());

        let w = NewWeapon::new("Daga", Category::Blade, Condition::New, Some(String::new())).unwrap();
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({ "nombre": "Daga", "tipo": "BLANCA", "estado": "NUEVO" })
        );
    }

    #[test]
    fn new_user_rejects_guest_accounts() {
        assert!(NewUser::new("ana", "pw", Some(Role::Guest)).is_err());
        assert!(NewUser::new("ana", "", None).is_err());

        let u = NewUser::new("ana", "pw", Some(Role::Admin)).unwrap();
        assert_eq!(
            serde_json::to_value(&u).unwrap(),
            json!({ "nombre": "ana", "password": "pw", "rol": "ADMIN" })
        );
        assert!(!format!("{u:?}").contains("pw"));
    }
}
