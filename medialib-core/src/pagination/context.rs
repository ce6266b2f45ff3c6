/// Who is asking for a listing.
///
/// Passed explicitly to every executor so access filtering never depends on
/// ambient state. `bypass_access` is for internal jobs that must see every
/// row regardless of ownership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub requester: Option<i32>,
    pub bypass_access: bool,
}

impl RequestContext {
    pub fn for_account(account_id: i32) -> Self {
        Self {
            requester: Some(account_id),
            bypass_access: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for maintenance work; access predicates are skipped.
    pub fn system() -> Self {
        Self {
            requester: None,
            bypass_access: true,
        }
    }
}
