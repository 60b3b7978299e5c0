//! `/armas`: weapon records.

use armeria_core::WeaponId;
use reqwest::Method;

use crate::client::parse;
use crate::{ApiClient, NewWeapon, RequestError, Weapon, WeaponPatch};

const ARMAS: &str = "/armas";

impl ApiClient {
    /// `GET /armas`.
    pub async fn list_weapons(&self, token: Option<&str>) -> Result<Vec<Weapon>, RequestError> {
        let req = self.request(Method::GET, ARMAS, token);
        let resp = self.send(req, "failed to fetch weapons").await?;
        parse(resp).await
    }

    /// `GET /armas/:id`.
    pub async fn get_weapon(&self, id: &WeaponId, token: Option<&str>) -> Result<Weapon, RequestError> {
        let req = self.request(Method::GET, &format!("{ARMAS}/{id}"), token);
        let resp = self.send(req, "failed to fetch weapon").await?;
        parse(resp).await
    }

    /// `POST /armas`.
    pub async fn create_weapon(&self, weapon: &NewWeapon, token: Option<&str>) -> Result<Weapon, RequestError> {
        let req = self.request(Method::POST, ARMAS, token).json(weapon);
        let resp = self.send(req, "failed to create weapon").await?;
        parse(resp).await
    }

    /// `PUT /armas/:id` with only the fields present in `patch`.
    pub async fn update_weapon(
        &self,
        id: &WeaponId,
        patch: &WeaponPatch,
        token: Option<&str>,
    ) -> Result<Weapon, RequestError> {
        let req = self.request(Method::PUT, &format!("{ARMAS}/{id}"), token).json(patch);
        let resp = self.send(req, "failed to update weapon").await?;
        parse(resp).await
    }

    /// `DELETE /armas/:id`. The confirmation body is not interpreted.
    pub async fn delete_weapon(&self, id: &WeaponId, token: Option<&str>) -> Result<(), RequestError> {
        let req = self.request(Method::DELETE, &format!("{ARMAS}/{id}"), token);
        self.send(req, "failed to delete weapon").await?;
        Ok(())
    }
}
