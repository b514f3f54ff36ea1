use crate::offer_filter::FilterConfig;
use crate::types::OfferId;

/// An action to send to the polling task.
#[derive(Debug, Clone)]
pub enum PollAction {
    /// Perform a poll now.
    DoPoll,
    /// Toggle the resolved state of an offer.
    ToggleResolved(OfferId),
    /// The user dismissed the alert.
    DismissAlert,
    /// Replace the filters.
    SetFilters(FilterConfig),
}
