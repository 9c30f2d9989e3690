use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the visible conversation. Immutable once created, except the
/// loading placeholder: its `content` is rewritten to show retry progress and
/// the whole entry is removed once a terminal outcome is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub role: Role,
    pub timestamp: OffsetDateTime,
    pub is_loading: bool,
}

impl Message {
    pub fn new(id: u64, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            role,
            timestamp: OffsetDateTime::now_utc(),
            is_loading: false,
        }
    }

    /// The transient "typing" placeholder shown while a reply is pending.
    pub fn loading(id: u64, content: impl Into<String>) -> Self {
        Self {
            is_loading: true,
            ..Self::new(id, Role::Assistant, content)
        }
    }
}
