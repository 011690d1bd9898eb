use flowdeck_auth::Principal;

/// Principal context for a request.
///
/// Inserted by the auth middleware on every `/v1` route; anonymous callers get
/// [`Principal::Anonymous`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn anonymous() -> Self {
        Self::new(Principal::Anonymous)
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
