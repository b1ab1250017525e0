/// An authentication scope. A principal logged in under one guard is not
/// visible to any other guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Cookie-session authentication for browser traffic.
    Web,
}

impl Guard {
    pub(crate) const ALL: [Guard; 1] = [Guard::Web];

    /// Session key under which this guard stores the logged-in user id.
    pub(crate) fn user_id_key(self) -> &'static str {
        match self {
            Guard::Web => "web.user_id",
        }
    }
}
