use super::deserializers::{option_lenient, option_lenient_number};
use crate::error::MalformedOfferError;
use crate::time::{timestamp_to_server_time, ServerTime};
use crate::types::OfferId;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use std::fmt;

/// The date of one side of an offer. The server sends unix timestamps but the value is only
/// ever used as text for building IDs, so strings are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferDate {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OfferDate {
    /// The date as a time, if it is a timestamp.
    pub fn to_server_time(&self) -> Option<ServerTime> {
        match self {
            Self::Integer(timestamp) => timestamp_to_server_time(*timestamp),
            Self::Float(timestamp) => timestamp_to_server_time(timestamp.trunc() as i64),
            Self::Text(text) => text.trim().parse::<i64>().ok().and_then(timestamp_to_server_time),
        }
    }
}

impl fmt::Display for OfferDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Integer(timestamp) => write!(f, "{timestamp}"),
            // Whole floats print without a fractional part, e.g. 1449000000.0 as 1449000000.
            Self::Float(timestamp) if timestamp.fract() == 0.0 && timestamp.abs() < 1e21 => {
                write!(f, "{timestamp:.0}")
            },
            Self::Float(timestamp) => write!(f, "{timestamp}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One side of an offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<OfferDate>,
    /// Fields not otherwise known, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An offer as received from the server. Only the seller and buyer dates are required to track
/// an offer; everything else is shown to the user or used for filtering.
/// 
/// A field holding the wrong type of value is read as missing, so one odd field never fails the
/// list the offer came in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "option_lenient_number", skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub buy_count: Option<u64>,
    /// The amount of aden needed to buy the offer.
    #[serde(default, deserialize_with = "option_lenient_number", skip_serializing_if = "Option::is_none")]
    pub required_aden: Option<f64>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub seller: Option<Party>,
    #[serde(default, deserialize_with = "option_lenient", skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Party>,
    /// Fields not otherwise known, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Offer {
    /// The ID of this offer. See [`derive_offer_id`].
    pub fn id(&self) -> Result<OfferId, MalformedOfferError> {
        derive_offer_id(self)
    }
    
    /// Reads an offer from one entry of a fetched list. An entry that isn't an object gives an
    /// empty offer, which has no ID and is reported as malformed when reconciled.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|error| {
            log::debug!("Unreadable offer entry: {error}");
            Self::default()
        })
    }
}

/// Reads every entry of a fetched list on its own, keeping their positions.
pub fn offers_from_values(values: Vec<Value>) -> Vec<Offer> {
    values
        .into_iter()
        .map(Offer::from_value)
        .collect()
}

/// Derives the key of an offer: the seller's date followed directly by the buyer's date.
/// 
/// The server supplies no key of its own. The order and the lack of a delimiter must not change,
/// otherwise IDs persisted by earlier runs stop matching.
pub fn derive_offer_id(offer: &Offer) -> Result<OfferId, MalformedOfferError> {
    let seller = offer.seller.as_ref()
        .ok_or(MalformedOfferError::missing("seller"))?;
    let buyer = offer.buyer.as_ref()
        .ok_or(MalformedOfferError::missing("buyer"))?;
    let seller_date = seller.date.as_ref()
        .ok_or(MalformedOfferError::missing("seller.date"))?;
    let buyer_date = buyer.date.as_ref()
        .ok_or(MalformedOfferError::missing("buyer.date"))?;
    
    Ok(format!("{seller_date}{buyer_date}"))
}

struct OrUnknown<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrUnknown<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.write_str("?"),
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let seller = self.seller.clone().unwrap_or_default();
        let buyer = self.buyer.clone().unwrap_or_default();
        
        write!(
            f,
            "Dupe '{}', equity {} aden, required {} aden:\n\tbuy {} from \"{}\" ({}),\n\tsell to \"{}\" ({})",
            OrUnknown(&self.item_name),
            OrUnknown(&self.equity),
            OrUnknown(&self.required_aden),
            OrUnknown(&self.buy_count),
            OrUnknown(&seller.name),
            OrUnknown(&seller.city),
            OrUnknown(&buyer.name),
            OrUnknown(&buyer.city),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn get_offers() -> Vec<Offer> {
        serde_json::from_str(include_str!("fixtures/offers.json")).unwrap()
    }
    
    #[test]
    fn deserializes_offers() {
        let offers = get_offers();
        let offer = &offers[0];
        
        assert_eq!(offers.len(), 3);
        assert_eq!(offer.item_name.as_deref(), Some("Sword of Revolution"));
        assert_eq!(offer.equity, Some(1200000.0));
        assert_eq!(offer.required_aden, Some(4800000.0));
        assert_eq!(offer.seller.as_ref().unwrap().city.as_deref(), Some("Giran"));
    }
    
    #[test]
    fn keeps_unknown_fields() {
        let offers = get_offers();
        let json = serde_json::to_value(&offers[0]).unwrap();
        
        assert_eq!(json["grade"], "B");
        assert_eq!(json["seller"]["date"], 1449000000);
    }
    
    #[test]
    fn derives_id_from_seller_then_buyer() {
        let offers = get_offers();
        
        assert_eq!(offers[0].id().unwrap(), "14490000001449000300");
    }
    
    #[test]
    fn derives_id_from_text_dates() {
        let offer: Offer = serde_json::from_str(r#"{"seller":{"date":"A"},"buyer":{"date":"B"}}"#).unwrap();
        
        assert_eq!(derive_offer_id(&offer).unwrap(), "AB");
    }
    
    #[test]
    fn derives_id_from_whole_float_dates() {
        let offer: Offer = serde_json::from_str(r#"{"seller":{"date":12.0},"buyer":{"date":3.5}}"#).unwrap();
        
        assert_eq!(derive_offer_id(&offer).unwrap(), "123.5");
    }
    
    #[test]
    fn missing_date_is_malformed() {
        let offers = get_offers();
        let error = offers[2].id().unwrap_err();
        
        assert_eq!(error, MalformedOfferError::missing("buyer.date"));
    }
    
    #[test]
    fn missing_seller_is_malformed() {
        let offer: Offer = serde_json::from_str(r#"{"buyer":{"date":1}}"#).unwrap();
        
        assert_eq!(offer.id().unwrap_err().field, "seller");
    }
    
    #[test]
    fn converts_date_to_time() {
        let date = OfferDate::Integer(1449000000);
        
        assert_eq!(date.to_server_time().unwrap().to_rfc3339(), "2015-12-01T20:00:00+00:00");
    }
    
    #[test]
    fn formats_message() {
        let offers = get_offers();
        
        assert_eq!(
            offers[0].to_string(),
            "Dupe 'Sword of Revolution', equity 1200000 aden, required 4800000 aden:\n\tbuy 2 from \"Ashen\" (Giran),\n\tsell to \"Mirra\" (Aden)",
        );
    }
    
    #[test]
    fn reads_mistyped_fields_as_missing() {
        let offers = offers_from_values(serde_json::from_str(r#"[
            {"seller":{"date":1},"buyer":{"date":2}},
            {"seller":{"date":3},"buyer":{"date":4},"buy_count":"3","item_name":7},
            {"seller":{"date":true},"buyer":{"date":6}},
            {"seller":"x","buyer":{"date":8}},
            "nope"
        ]"#).unwrap());
        
        assert_eq!(offers.len(), 5);
        assert_eq!(offers[0].id().unwrap(), "12");
        assert_eq!(offers[1].id().unwrap(), "34");
        assert_eq!(offers[1].buy_count, None);
        assert_eq!(offers[1].item_name, None);
        assert_eq!(offers[2].id().unwrap_err().field, "seller.date");
        assert_eq!(offers[3].id().unwrap_err().field, "seller");
        assert_eq!(offers[4], Offer::default());
    }
}
