// Response schema trees, as returned by the CRS.
//
// Every field defaults, so partial replies parse; nothing here interprets
// the business outcome beyond exposing Success/Warnings/Errors.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codes::UniqueIdType;
use crate::fields::{
    Address, BasicPropertyInfo, DateTimeSpan, Email, GuestCounts, Telephone, UniqueId,
};
use crate::schema::reservation::{HotelReservation, HotelReservations, RatePlans, RoomTypes, Total};

/// Empty marker element, e.g. `<Success/>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Marker {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseMessage {
    #[serde(rename = "@Type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(rename = "@Code", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "@ShortText", skip_serializing_if = "Option::is_none")]
    pub short_text: Option<String>,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Warnings {
    #[serde(rename = "Warning")]
    pub warnings: Vec<ResponseMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Errors {
    #[serde(rename = "Error")]
    pub errors: Vec<ResponseMessage>,
}

/// Accessors common to every OTA response root.
pub trait OtaResponse: DeserializeOwned + Send + 'static {
    fn echo_token(&self) -> Option<&str>;
    fn is_success(&self) -> bool;
    fn warnings(&self) -> &[ResponseMessage];
    fn errors(&self) -> &[ResponseMessage];
}

macro_rules! ota_response {
    ($($response:ty),+ $(,)?) => {
        $(
            impl OtaResponse for $response {
                fn echo_token(&self) -> Option<&str> {
                    self.echo_token.as_deref()
                }

                fn is_success(&self) -> bool {
                    self.success.is_some()
                }

                fn warnings(&self) -> &[ResponseMessage] {
                    self.warnings.as_ref().map(|w| w.warnings.as_slice()).unwrap_or(&[])
                }

                fn errors(&self) -> &[ResponseMessage] {
                    self.errors.as_ref().map(|e| e.errors.as_slice()).unwrap_or(&[])
                }
            }
        )+
    };
}

ota_response!(
    HotelAvailRs,
    HotelResRs,
    ResRetrieveRs,
    HotelResModifyRs,
    CancelRs,
    HotelDescriptiveInfoRs,
);

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_HotelAvailRS", rename_all = "PascalCase")]
pub struct HotelAvailRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_stays: Option<AvailRoomStays>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AvailRoomStays {
    #[serde(rename = "RoomStay")]
    pub room_stays: Vec<AvailRoomStay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AvailRoomStay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_types: Option<RoomTypes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_plans: Option<RatePlans>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_rates: Option<RoomRates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_counts: Option<GuestCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_span: Option<DateTimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Total>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_property_info: Option<BasicPropertyInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomRates {
    #[serde(rename = "RoomRate")]
    pub room_rates: Vec<RoomRate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RoomRate {
    #[serde(rename = "@RoomTypeCode", skip_serializing_if = "Option::is_none")]
    pub room_type_code: Option<String>,
    #[serde(rename = "@RatePlanCode", skip_serializing_if = "Option::is_none")]
    pub rate_plan_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<Rates>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Rates {
    #[serde(rename = "Rate")]
    pub rates: Vec<Rate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Rate {
    #[serde(rename = "@EffectiveDate", skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(rename = "@ExpireDate", skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<Total>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_HotelResRS", rename_all = "PascalCase")]
pub struct HotelResRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "@ResResponseType", skip_serializing_if = "Option::is_none")]
    pub res_response_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_reservations: Option<HotelReservations>,
}

impl HotelResRs {
    /// Identifiers the CRS assigned to the booked reservations.
    pub fn confirmation_ids(&self) -> Vec<&UniqueId> {
        self.hotel_reservations
            .iter()
            .flat_map(|r| r.reservations.iter())
            .flat_map(|r| r.unique_ids.iter())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_ResRetrieveRS", rename_all = "PascalCase")]
pub struct ResRetrieveRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations_list: Option<ReservationsList>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReservationsList {
    #[serde(rename = "HotelReservation")]
    pub reservations: Vec<HotelReservation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_HotelResModifyRS", rename_all = "PascalCase")]
pub struct HotelResModifyRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_res_modifies: Option<ModifiedReservations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModifiedReservations {
    #[serde(rename = "HotelResModify")]
    pub reservations: Vec<HotelReservation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_CancelRS", rename_all = "PascalCase")]
pub struct CancelRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "@Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(rename = "UniqueID")]
    pub unique_ids: Vec<UniqueId>,
    #[serde(rename = "CancelInfoRS", skip_serializing_if = "Option::is_none")]
    pub cancel_info: Option<CancelInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CancelInfo {
    #[serde(rename = "UniqueID")]
    pub unique_ids: Vec<UniqueId>,
}

impl CancelRs {
    /// The cancellation number, when the CRS issued one.
    pub fn cancellation_id(&self) -> Option<&UniqueId> {
        self.unique_ids
            .iter()
            .chain(self.cancel_info.iter().flat_map(|info| info.unique_ids.iter()))
            .find(|id| id.kind() == Some(UniqueIdType::Cancellation))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename = "OTA_HotelDescriptiveInfoRS", rename_all = "PascalCase")]
pub struct HotelDescriptiveInfoRs {
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp", skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<String>,
    #[serde(rename = "@Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Warnings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Errors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_descriptive_contents: Option<HotelDescriptiveContents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelDescriptiveContents {
    #[serde(rename = "HotelDescriptiveContent")]
    pub contents: Vec<HotelDescriptiveContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HotelDescriptiveContent {
    #[serde(rename = "@HotelCode", skip_serializing_if = "Option::is_none")]
    pub hotel_code: Option<String>,
    #[serde(rename = "@HotelName", skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(rename = "@ChainCode", skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_info: Option<HotelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_infos: Option<ContactInfos>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HotelInfo {
    #[serde(rename = "@HotelStatus", skip_serializing_if = "Option::is_none")]
    pub hotel_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<Descriptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Descriptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multimedia_descriptions: Option<MultimediaDescriptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MultimediaDescriptions {
    #[serde(rename = "MultimediaDescription")]
    pub descriptions: Vec<MultimediaDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MultimediaDescription {
    #[serde(rename = "@InfoCode", skip_serializing_if = "Option::is_none")]
    pub info_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_items: Option<TextItems>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TextItems {
    #[serde(rename = "TextItem")]
    pub items: Vec<TextItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TextItem {
    #[serde(rename = "@Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactInfos {
    #[serde(rename = "ContactInfo")]
    pub contacts: Vec<ContactInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Addresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Phones>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Emails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Addresses {
    #[serde(rename = "Address")]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Phones {
    #[serde(rename = "Phone")]
    pub phones: Vec<Telephone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Emails {
    #[serde(rename = "Email")]
    pub emails: Vec<Email>,
}
