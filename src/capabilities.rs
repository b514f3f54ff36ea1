//! Effects the host provides: confirmation prompts, the alert sound and the new-offers modal.
//! Nothing else in the crate touches a user interface.

use crate::enums::ConfirmPrompt;
use crate::reconcile::TrackedOffer;

/// Asks the user a yes/no question.
pub trait Confirmer: Send {
    /// Returns `true` if the user agreed.
    fn confirm(&mut self, prompt: ConfirmPrompt, offer: &TrackedOffer) -> bool;
}

/// Plays the alert sound.
pub trait AlertPlayer: Send {
    fn play(&mut self);
    
    fn stop(&mut self);
}

/// Shows the modal listing offers when unseen offers arrive.
pub trait ModalController: Send {
    fn show(&mut self, offers: &[TrackedOffer]);
}

/// A [`Confirmer`] that agrees to everything. Suited to hosts where sending the action already
/// was the user's decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, _prompt: ConfirmPrompt, _offer: &TrackedOffer) -> bool {
        true
    }
}

/// An [`AlertPlayer`] and [`ModalController`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AlertPlayer for Silent {
    fn play(&mut self) {}
    
    fn stop(&mut self) {}
}

impl ModalController for Silent {
    fn show(&mut self, _offers: &[TrackedOffer]) {}
}

/// The set of effects handed to an [`crate::OfferTracker`].
pub struct Capabilities {
    pub confirmer: Box<dyn Confirmer>,
    pub alert: Box<dyn AlertPlayer>,
    pub modal: Box<dyn ModalController>,
}

impl Capabilities {
    /// Confirms every toggle and shows nothing.
    pub fn headless() -> Self {
        Self {
            confirmer: Box::new(AutoConfirm),
            alert: Box::new(Silent),
            modal: Box::new(Silent),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::headless()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}
