/// A command failed a safety rule.
///
/// Always raised before any process spawns; the variant is the tagged
/// error kind callers inspect instead of matching on message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// The command tokenized to nothing
    #[error("empty command rejected: nothing to prove")]
    EmptyCommand,

    /// A token matched the forbidden set
    #[error("token '{token}' violates a safety invariant")]
    ForbiddenToken {
        /// The forbidden token that matched
        token: String,
    },

    /// The rejoined command contained a shell control character
    #[error("metacharacter '{symbol}' rejected: command must remain a flat argv vector")]
    Metacharacter {
        /// The control sequence that was found
        symbol: String,
    },

    /// The command could not be tokenized at all
    #[error("command could not be tokenized: {reason}")]
    Unparseable {
        /// Why shell-lexical splitting failed
        reason: String,
    },
}
