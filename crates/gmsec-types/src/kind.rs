/// The three states a [`crate::Field`]-carrying message may be in.
///
/// Transitions happen only through an explicit `set_kind` call on the owning
/// `Message` (defined in `gmsec-message`); this crate only carries the tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MessageKind {
    #[default]
    Publish,
    Request,
    Reply,
}

impl MessageKind {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "PUBLISH" => Self::Publish,
            "REQUEST" => Self::Request,
            "REPLY" => Self::Reply,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "PUBLISH",
            Self::Request => "REQUEST",
            Self::Reply => "REPLY",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
