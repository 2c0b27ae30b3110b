// Authentication endpoints.
//
// The login exchange is form-encoded (OAuth2 password flow); everything
// else on the API speaks JSON.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AuthContext, TokenResponse};

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// `POST /auth/login` with form-encoded `username`/`password`.
    /// A success response without an `access_token` is an authentication
    /// failure. The returned token is NOT stored here -- the session
    /// coordinator owns the slot write so the token is only persisted
    /// once the whole login flow is committed to.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, Error> {
        debug!(username, "logging in");

        let fields = vec![
            ("username".to_owned(), username.to_owned()),
            ("password".to_owned(), password.expose_secret().to_owned()),
        ];

        let resp: TokenResponse = match self.post_form("/auth/login", fields).await {
            Ok(resp) => resp,
            Err(Error::Api { status, body }) => {
                return Err(Error::Authentication {
                    message: format!("login failed (HTTP {status}): {body}"),
                });
            }
            Err(e) => return Err(e),
        };

        match resp.access_token {
            Some(token) if !token.is_empty() => Ok(SecretString::from(token)),
            _ => Err(Error::Authentication {
                message: "no token received from server".into(),
            }),
        }
    }

    /// Fetch the authenticated user's context: profile, role grants,
    /// and the schools those roles are scoped to.
    ///
    /// `GET /auth/context`
    pub async fn auth_context(&self) -> Result<AuthContext, Error> {
        self.get("/auth/context").await
    }
}
