use uuid::Uuid;

/// The tenant a request runs as, extracted from a validated access token.
///
/// Only the token verifier can construct one, so any function that takes a
/// `&VerifiedIdentity` is guaranteed to be scoped by an authenticated caller.
/// It lives in the request extensions and is dropped with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedIdentity {
    account_id: Uuid,
}

impl VerifiedIdentity {
    pub(super) fn from_subject(account_id: Uuid) -> Self {
        Self { account_id }
    }

    pub fn account_id(&self) -> Uuid {
        self.account_id
    }

    #[cfg(test)]
    pub(crate) fn for_tests(account_id: Uuid) -> Self {
        Self { account_id }
    }
}
