use strum_macros::Display;

/// The question asked before changing an offer's resolved state.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum ConfirmPrompt {
    /// The offer is unresolved and is about to be marked as resolved.
    #[strum(serialize = "Mark this offer as resolved?")]
    MarkResolved,
    /// The offer is resolved and is about to be reverted.
    #[strum(serialize = "Revert this offer to unresolved?")]
    Revert,
}
