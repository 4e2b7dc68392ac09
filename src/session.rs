use std::sync::Arc;

use album_api::{ApiClient, LoginData, SessionMember};

/// The active login session: token holder plus the member behind it.
///
/// Built once at startup around the shared [`ApiClient`] and passed through
/// Dioxus context; components never read token state from anywhere else.
#[derive(Clone)]
pub struct Session {
    client: Arc<ApiClient>,
    member: Option<SessionMember>,
}

impl Session {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            member: None,
        }
    }

    /// Bind a successful login to this session.
    pub fn establish(&mut self, data: LoginData) {
        self.client.set_token(data.token.clone());
        self.member = Some(data.member);
    }

    /// Drop the token and member, used for logout and forced expiry.
    pub fn teardown(&mut self) {
        self.client.clear_token();
        self.member = None;
    }

    pub fn is_active(&self) -> bool {
        self.member.is_some()
    }

    pub fn member(&self) -> Option<&SessionMember> {
        self.member.as_ref()
    }

    pub fn member_id(&self) -> Option<i64> {
        self.member.as_ref().map(|m| m.id)
    }

    pub fn client(&self) -> Arc<ApiClient> {
        Arc::clone(&self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_api::ApiConfig;

    fn session() -> Session {
        Session::new(Arc::new(ApiClient::new(&ApiConfig::default()).unwrap()))
    }

    #[test]
    fn test_establish_and_teardown() {
        let mut session = session();
        assert!(!session.is_active());

        session.establish(LoginData {
            token: "t".to_string(),
            member: SessionMember {
                id: 3,
                name: "mother".to_string(),
                username: Some("mother".to_string()),
                email: None,
            },
        });
        assert!(session.is_active());
        assert_eq!(session.member_id(), Some(3));
        assert_eq!(session.client().token().as_deref(), Some("t"));

        session.teardown();
        assert!(!session.is_active());
        assert!(session.client().token().is_none());
    }
}
