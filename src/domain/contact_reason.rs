/// Why someone is getting in touch. Each reason routes to its own inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactReason {
    #[default]
    General,
    Support,
    Business
}

impl ContactReason {
    pub const ALL: [ContactReason; 3] = [
        ContactReason::General,
        ContactReason::Support,
        ContactReason::Business
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactReason::General => "general",
            ContactReason::Support => "support",
            ContactReason::Business => "business"
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactReason::General => "General",
            ContactReason::Support => "Support",
            ContactReason::Business => "Business Inquiry"
        }
    }

    pub fn destination(&self) -> &'static str {
        match self {
            ContactReason::General => "contact@sofly.app",
            ContactReason::Support => "support@sofly.app",
            ContactReason::Business => "sales@sofly.app"
        }
    }
}

impl TryFrom<String> for ContactReason {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContactReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == value)
            .ok_or_else(|| format!(
                "{} is not a contact reason. `general`, `support` and `business` are acceptable.",
                value
            ))
    }
}
