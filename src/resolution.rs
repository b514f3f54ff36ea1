use crate::capabilities::Confirmer;
use crate::enums::ConfirmPrompt;
use crate::reconcile::TrackedOffer;
use crate::types::OfferIdSet;

/// Flips the resolved state of `offer` after asking `confirmer`.
/// 
/// An unresolved offer is marked resolved and `id` is added to `resolved`. A resolved offer is
/// reverted and `id` is removed. Returns `false` without touching anything when the user
/// declines.
pub fn toggle_resolved<C>(
    id: &str,
    offer: &mut TrackedOffer,
    resolved: &mut OfferIdSet,
    confirmer: &mut C,
) -> bool
where
    C: Confirmer + ?Sized,
{
    if offer.resolved {
        if !confirmer.confirm(ConfirmPrompt::Revert, offer) {
            return false;
        }
        
        offer.resolved = false;
        resolved.remove(id);
    } else {
        if !confirmer.confirm(ConfirmPrompt::MarkResolved, offer) {
            return false;
        }
        
        offer.resolved = true;
        resolved.insert(id.to_owned());
    }
    
    true
}
