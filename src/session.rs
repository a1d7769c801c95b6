//! Session context: the auth collaborator's surface, passed into the
//! controller explicitly rather than read from a global store.

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
        }
    }

    pub fn login(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
