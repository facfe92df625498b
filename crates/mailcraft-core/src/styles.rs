//! Static style tables: email types and copywriter personas.
//!
//! One shared, read-only table per category. The prompt builder and the
//! request validator both look keys up here, so the wording can never drift
//! between providers.

// ─────────────────────────────────────────────
// Email types
// ─────────────────────────────────────────────

/// Static description of one email type.
#[derive(Clone, Debug)]
pub struct EmailTypeSpec {
    /// Request key (e.g. `"cart-abandonment"`).
    pub key: &'static str,
    /// Human-readable label for UIs and the CLI.
    pub label: &'static str,
    /// Purpose phrase inserted into the prompt.
    pub description: &'static str,
}

/// Every supported email type, in display order.
pub static EMAIL_TYPES: &[EmailTypeSpec] = &[
    EmailTypeSpec {
        key: "promotional",
        label: "Promotional",
        description: "promotional email for offers and discounts",
    },
    EmailTypeSpec {
        key: "welcome",
        label: "Welcome",
        description: "welcome email for new subscribers",
    },
    EmailTypeSpec {
        key: "cart-abandonment",
        label: "Cart abandonment",
        description: "email to recover abandoned shopping carts",
    },
    EmailTypeSpec {
        key: "reactivation",
        label: "Reactivation",
        description: "email to win back inactive customers",
    },
    EmailTypeSpec {
        key: "newsletter",
        label: "Newsletter",
        description: "informative newsletter that delivers added value",
    },
    EmailTypeSpec {
        key: "product-launch",
        label: "Product launch",
        description: "email announcing the launch of a new product",
    },
];

// ─────────────────────────────────────────────
// Copywriter personas
// ─────────────────────────────────────────────

/// Persona key meaning "no persona styling".
pub const GENERAL_PERSONA: &str = "general";

/// Static description of one copywriter persona.
#[derive(Clone, Debug)]
pub struct PersonaSpec {
    /// Request key (e.g. `"gary-halbert"`).
    pub key: &'static str,
    /// Display name with a short hint of the style.
    pub display_name: &'static str,
    /// One-sentence style directive inserted into the prompt.
    pub directive: &'static str,
}

/// Every supported persona. `"general"` is not listed; it means "no persona".
pub static PERSONAS: &[PersonaSpec] = &[
    PersonaSpec {
        key: "dan-kennedy",
        display_name: "Dan Kennedy (direct and aggressive)",
        directive: "Use a direct, aggressive, no-nonsense style that creates urgency and pressure.",
    },
    PersonaSpec {
        key: "gary-halbert",
        display_name: "Gary Halbert (emotional storytelling)",
        directive: "Focus on emotional storytelling, using personal stories to connect with the reader.",
    },
    PersonaSpec {
        key: "david-ogilvy",
        display_name: "David Ogilvy (elegant and persuasive)",
        directive: "Keep an elegant, sophisticated and persuasive tone backed by data and facts.",
    },
    PersonaSpec {
        key: "joe-sugarman",
        display_name: "Joe Sugarman (consumer psychology)",
        directive: "Apply consumer psychology, using psychological triggers and curiosity.",
    },
    PersonaSpec {
        key: "russell-brunson",
        display_name: "Russell Brunson (modern digital marketing)",
        directive: "Write in a modern digital-marketing style with proven formulas and clear calls to action.",
    },
];

/// Find an email type by its request key.
pub fn find_email_type(key: &str) -> Option<&'static EmailTypeSpec> {
    EMAIL_TYPES.iter().find(|spec| spec.key == key)
}

/// Find a persona by its request key. Returns `None` for `"general"`.
pub fn find_persona(key: &str) -> Option<&'static PersonaSpec> {
    PERSONAS.iter().find(|spec| spec.key == key)
}

/// Whether `key` is acceptable as a `copywriterProfile` value.
pub fn is_known_persona(key: &str) -> bool {
    key == GENERAL_PERSONA || find_persona(key).is_some()
}
