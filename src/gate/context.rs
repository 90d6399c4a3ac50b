/// Per-request identity facts derived from a resolved session.
///
/// Attached to the request's extensions by the gate when resolution succeeds
/// and discarded with the request; never persisted. Downstream handlers read
/// it via `Extension<Identity>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub is_authenticated: bool,
}
