//! `/usuarios`: accounts and login.

use armeria_auth::SessionGrant;
use armeria_core::UserId;
use reqwest::Method;

use crate::client::parse;
use crate::models::LoginResponse;
use crate::{ApiClient, Credentials, NewUser, RequestError, User, UserUpdate};

const USUARIOS: &str = "/usuarios";

impl ApiClient {
    /// `POST /usuarios/login`.
    ///
    /// Any rejection is [`RequestError::CredentialsInvalid`]. A 2xx answer
    /// without a token, or with a role that cannot hold one, is `Malformed`.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionGrant, RequestError> {
        let req = self
            .request(Method::POST, &format!("{USUARIOS}/login"), None)
            .json(credentials);

        let resp = match self.send(req, "login rejected").await {
            Ok(resp) => resp,
            Err(RequestError::Status { .. }) => return Err(RequestError::CredentialsInvalid),
            Err(err) => return Err(err),
        };

        let body: LoginResponse = parse(resp).await?;
        match (body.token, body.rol) {
            (Some(token), Some(role)) => SessionGrant::authenticated(token, role)
                .map_err(|e| RequestError::Malformed(format!("login response: {e}"))),
            _ => Err(RequestError::Malformed(
                "login response without token or role".to_string(),
            )),
        }
    }

    /// `POST /usuarios/register`. Needs an admin token.
    ///
    /// Returns the backend's acknowledgement as-is; its shape varies between
    /// backend versions and nothing downstream depends on it.
    pub async fn register_user(
        &self,
        user: &NewUser,
        token: Option<&str>,
    ) -> Result<serde_json::Value, RequestError> {
        let req = self
            .request(Method::POST, &format!("{USUARIOS}/register"), token)
            .json(user);
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(RequestError::Status {
                status: status.as_u16(),
                message: format!("failed to register user: {detail}"),
            });
        }
        parse(resp).await
    }

    /// `GET /usuarios`.
    pub async fn list_users(&self, token: Option<&str>) -> Result<Vec<User>, RequestError> {
        let req = self.request(Method::GET, USUARIOS, token);
        let resp = self.send(req, "failed to fetch users").await?;
        parse(resp).await
    }

    /// `PUT /usuarios/:id`.
    pub async fn update_user(
        &self,
        id: &UserId,
        update: &UserUpdate,
        token: Option<&str>,
    ) -> Result<User, RequestError> {
        let req = self
            .request(Method::PUT, &format!("{USUARIOS}/{id}"), token)
            .json(update);
        let resp = self.send(req, "failed to update user").await?;
        parse(resp).await
    }

    /// `DELETE /usuarios/:id`.
    pub async fn delete_user(&self, id: &UserId, token: Option<&str>) -> Result<(), RequestError> {
        let req = self.request(Method::DELETE, &format!("{USUARIOS}/{id}"), token);
        self.send(req, "failed to delete user").await?;
        Ok(())
    }
}
