mod offer;
pub mod deserializers;

pub use offer::{Offer, OfferDate, Party, derive_offer_id, offers_from_values};
