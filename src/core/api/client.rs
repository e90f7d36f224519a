//! Typed REST client for the AAR backend

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, Transport};
use crate::core::models::{Aar, Event, EventId, LoginRequest, NewAar, NewUser, Unit, User};

/// Thin wrapper that turns REST endpoints into typed async calls
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the body of a 2xx response
    async fn execute(&self, request: ApiRequest) -> Result<String, ApiError> {
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let body = self.execute(ApiRequest::get(path)).await?;
        decode(&body)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<R, ApiError> {
        let json = serde_json::to_string(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self.execute(ApiRequest::post(path, Some(json))).await?;
        decode(&body)
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_json("/api/auth/login", &request).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.execute(ApiRequest::post("/api/auth/logout", None))
            .await
            .map(|_| ())
    }

    /// `GET /api/auth/me`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/api/auth/me").await
    }

    /// `POST /api/users`
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post_json("/api/users", user).await
    }

    /// `GET /api/units/referral/{code}`
    pub async fn unit_by_referral(&self, code: &str) -> Result<Unit, ApiError> {
        let path = format!("/api/units/referral/{}", encode_path_segment(code.trim()));
        self.get_json(&path).await
    }

    /// `GET /api/units`
    pub async fn list_units(&self) -> Result<Vec<Unit>, ApiError> {
        self.get_json("/api/units").await
    }

    /// `GET /api/events`
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/api/events").await
    }

    /// `DELETE /api/events/{id}`
    pub async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/api/events/{}", id)))
            .await
            .map(|_| ())
    }

    /// `GET /api/aars`
    pub async fn list_aars(&self) -> Result<Vec<Aar>, ApiError> {
        self.get_json("/api/aars").await
    }

    /// `POST /api/aars`
    pub async fn create_aar(&self, aar: &NewAar) -> Result<Aar, ApiError> {
        self.post_json("/api/aars", aar).await
    }
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encode everything outside the RFC 3986 unreserved set
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::transport::Method;
    use crate::core::api::transport::testing::ScriptedTransport;
    use crate::core::models::Role;

    const USER_JSON: &str = r#"{"id":4,"username":"jsmith","name":"Smith","rank":"SGT","role":"squad_leader","unitId":7}"#;

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("ALPHA-7"), "ALPHA-7");
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_path_segment("ü"), "%C3%BC");
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let client = ApiClient::new(ScriptedTransport::new().respond(200, USER_JSON));

        let user = client.login("jsmith", "hunter22").await.unwrap();
        assert_eq!(user.role, Role::SquadLeader);

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/auth/login");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "jsmith");
        assert_eq!(body["password"], "hunter22");
    }

    #[tokio::test]
    async fn test_login_failure_carries_message() {
        let client = ApiClient::new(
            ScriptedTransport::new().respond(401, r#"{"message":"Invalid username or password"}"#),
        );

        let err = client.login("jsmith", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_logout_ignores_empty_body() {
        let client = ApiClient::new(ScriptedTransport::new().respond(204, ""));
        client.logout().await.unwrap();
        assert_eq!(client.transport().requests()[0].body, None);
    }

    #[tokio::test]
    async fn test_referral_lookup_encodes_code() {
        let client = ApiClient::new(ScriptedTransport::new().respond(
            200,
            r#"{"id":7,"name":"2nd Platoon","parentId":3,"unitLevel":"platoon","referralCode":"2 PLT"}"#,
        ));

        let unit = client.unit_by_referral(" 2 PLT ").await.unwrap();
        assert_eq!(unit.id, 7);
        assert_eq!(
            client.transport().requests()[0].path,
            "/api/units/referral/2%20PLT"
        );
    }

    #[tokio::test]
    async fn test_delete_event_path_and_error() {
        let client = ApiClient::new(
            ScriptedTransport::new()
                .respond(204, "")
                .respond(403, r#"{"message":"Only leaders can delete events"}"#),
        );

        client.delete_event(12).await.unwrap();
        let err = client.delete_event(13).await.unwrap_err();
        assert_eq!(err.status(), Some(403));

        let requests = client.transport().requests();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].path, "/api/events/12");
        assert_eq!(requests[1].path, "/api/events/13");
    }

    #[tokio::test]
    async fn test_malformed_list_is_decode_error() {
        let client = ApiClient::new(ScriptedTransport::new().respond(200, r#"{"events":[]}"#));
        let err = client.list_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        let client = ApiClient::new(ScriptedTransport::new().fail("offline"));
        let err = client.list_aars().await.unwrap_err();
        assert_eq!(err, ApiError::Network("offline".to_string()));
    }
}
