use std::fmt;

/// Who can see a documented element, as far as its prototype's modifiers say.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessLevel {
    #[default]
    Unknown,
    Public,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
}

impl AccessLevel {
    /// Folds an access modifier keyword into the level seen so far.
    ///
    /// `protected` combines with `internal` or `private` in either order. Only
    /// the most recent level takes part in a combination. Returns `None` if
    /// `keyword` isn't an access modifier.
    pub fn with_modifier(self, keyword: &str) -> Option<Self> {
        let level = match keyword {
            "public" => Self::Public,
            "private" => match self {
                Self::Protected => Self::PrivateProtected,
                _ => Self::Private,
            },
            "protected" => match self {
                Self::Internal => Self::ProtectedInternal,
                Self::Private => Self::PrivateProtected,
                _ => Self::Protected,
            },
            "internal" => match self {
                Self::Protected => Self::ProtectedInternal,
                _ => Self::Internal,
            },
            _ => return None,
        };
        Some(level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
