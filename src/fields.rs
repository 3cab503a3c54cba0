// Leaf records shared by every OTA message family.
//
// Each struct serializes in declaration order, which is the element order the
// schema requires. `@` names are attributes, `$text` is element content.
use serde::{Deserialize, Serialize};

use crate::codes::UniqueIdType;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CompanyName {
    #[serde(rename = "@Code", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "@CodeContext", skip_serializing_if = "Option::is_none")]
    pub code_context: Option<String>,
    #[serde(rename = "@TravelSelector", skip_serializing_if = "Option::is_none")]
    pub travel_selector: Option<String>,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PersonName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Telephone {
    #[serde(rename = "@PhoneTechType", skip_serializing_if = "Option::is_none")]
    pub phone_tech_type: Option<String>,
    #[serde(rename = "@PhoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Email {
    #[serde(rename = "@EmailType", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StateProv {
    #[serde(rename = "@StateCode", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CountryName {
    #[serde(rename = "@Code", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address_line: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_prov: Option<StateProv>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<CountryName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PaymentCard {
    #[serde(rename = "@CardCode", skip_serializing_if = "Option::is_none")]
    pub card_code: Option<String>,
    #[serde(rename = "@CardNumber", skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(rename = "@SeriesCode", skip_serializing_if = "Option::is_none")]
    pub series_code: Option<String>,
    #[serde(rename = "@ExpireDate", skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_holder_name: Option<String>,
}

/// Stay window, used both as `StayDateRange` and `TimeSpan`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DateTimeSpan {
    #[serde(rename = "@Start", skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(rename = "@End", skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(rename = "@Duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UniqueId {
    #[serde(rename = "@Type")]
    pub id_type: u32,
    #[serde(rename = "@ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@ID_Context", skip_serializing_if = "Option::is_none")]
    pub id_context: Option<String>,
    #[serde(rename = "@Instance", skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl UniqueId {
    pub fn kind(&self) -> Option<UniqueIdType> {
        UniqueIdType::ALL
            .into_iter()
            .find(|kind| kind.code() == self.id_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GuestCount {
    #[serde(rename = "@AgeQualifyingCode")]
    pub age_qualifying_code: u32,
    #[serde(rename = "@Count")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GuestCounts {
    #[serde(rename = "@IsPerRoom", skip_serializing_if = "Option::is_none")]
    pub is_per_room: Option<bool>,
    #[serde(rename = "GuestCount", skip_serializing_if = "Vec::is_empty")]
    pub guest_counts: Vec<GuestCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicPropertyInfo {
    #[serde(rename = "@ChainCode", skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    #[serde(rename = "@HotelCode", skip_serializing_if = "Option::is_none")]
    pub hotel_code: Option<String>,
    #[serde(rename = "@HotelName", skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelRef {
    #[serde(rename = "@ChainCode", skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    #[serde(rename = "@HotelCode", skip_serializing_if = "Option::is_none")]
    pub hotel_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GuaranteeAccepted {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_card: Option<PaymentCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GuaranteesAccepted {
    #[serde(rename = "GuaranteeAccepted", skip_serializing_if = "Vec::is_empty")]
    pub accepted: Vec<GuaranteeAccepted>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Guarantee {
    #[serde(rename = "@GuaranteeType", skip_serializing_if = "Option::is_none")]
    pub guarantee_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantees_accepted: Option<GuaranteesAccepted>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Comment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Comments {
    #[serde(rename = "Comment", skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SpecialRequest {
    #[serde(rename = "@Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpecialRequests {
    #[serde(rename = "SpecialRequest", skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<SpecialRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Service {
    #[serde(
        rename = "@ServiceInventoryCode",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_inventory_code: Option<String>,
    #[serde(rename = "@Quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(rename = "@ServicePricingType", skip_serializing_if = "Option::is_none")]
    pub service_pricing_type: Option<String>,
    #[serde(rename = "@Inclusive", skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Services {
    #[serde(rename = "Service", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}

/// Written confirmation instructions (confirmation e-mail settings).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WrittenConfInst {
    #[serde(rename = "@LanguageID", skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,
    #[serde(rename = "@AddresseeName", skip_serializing_if = "Option::is_none")]
    pub addressee_name: Option<String>,
    #[serde(rename = "@ConfirmInd", skip_serializing_if = "Option::is_none")]
    pub confirm_ind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplemental_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VerificationExtensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_property_info: Option<BasicPropertyInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<PersonName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "TPA_Extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<VerificationExtensions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = PaymentCard {
            card_code: Some("VI".to_string()),
            card_number: Some("4111111111111111".to_string()),
            expire_date: Some("1228".to_string()),
            ..Default::default()
        };
        let b = a.clone();

        assert_eq!(a, b);
        assert_ne!(
            a,
            PaymentCard {
                series_code: Some("123".to_string()),
                ..b
            }
        );
    }

    #[test]
    fn test_unique_id_kind_maps_back_to_code_list() {
        let id = UniqueId {
            id_type: 14,
            id: Some("ABC123".to_string()),
            ..Default::default()
        };
        assert_eq!(id.kind(), Some(UniqueIdType::Reservation));
        assert_eq!(UniqueId::default().kind(), None);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let name = PersonName {
            surname: Some("Doe".to_string()),
            ..Default::default()
        };
        let xml = quick_xml::se::to_string_with_root("PersonName", &name).unwrap();

        assert_eq!(xml, "<PersonName><Surname>Doe</Surname></PersonName>");
    }

    #[test]
    fn test_attributes_and_text_are_parsed() {
        let email: Email =
            quick_xml::de::from_str(r#"<Email EmailType="1">guest@example.com</Email>"#).unwrap();

        assert_eq!(email.email_type.as_deref(), Some("1"));
        assert_eq!(email.address.as_deref(), Some("guest@example.com"));
    }
}
