// Reservation create request (OTA_HotelResRQ) and the reservation records
// shared with modify requests and reservation responses.
use serde::{Deserialize, Serialize};

use super::groups::{self, CardRule};
use super::pos::Pos;
use super::{MessageHeader, OTA_NAMESPACE};
use crate::codes::AgeQualifyingCode;
use crate::error::MappingError;
use crate::fields::{
    Address, BasicPropertyInfo, Comments, DateTimeSpan, Email, Guarantee, GuestCounts,
    PersonName, Services, SpecialRequests, Telephone, UniqueId, WrittenConfInst,
};
use crate::params::ParameterMap;

pub const DEFAULT_RES_STATUS: &str = "Commit";
pub const DEFAULT_NUMBER_OF_UNITS: u32 = 1;

/// Top-level keys that describe a single stay on a new reservation.
pub(super) const ROOM_STAY_KEYS: [&str; 9] = [
    "Start",
    "End",
    "Duration",
    "Count",
    "RoomTypeCode",
    "RatePlanCode",
    "HotelCode",
    "ChainCode",
    "SpecialRequests",
];

/// Keys that change a stay on an existing reservation. The property alone
/// identifies the booking and does not open a stay.
pub(super) const STAY_CHANGE_KEYS: [&str; 7] = [
    "Start",
    "End",
    "Duration",
    "Count",
    "RoomTypeCode",
    "RatePlanCode",
    "SpecialRequests",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_HotelResRQ")]
pub struct HotelResRq {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "@EchoToken", skip_serializing_if = "Option::is_none")]
    pub echo_token: Option<String>,
    #[serde(rename = "@TimeStamp")]
    pub time_stamp: String,
    #[serde(rename = "@Target")]
    pub target: &'static str,
    #[serde(rename = "@Version")]
    pub version: String,
    #[serde(rename = "@PrimaryLangID", skip_serializing_if = "Option::is_none")]
    pub primary_lang_id: Option<String>,
    #[serde(rename = "@ResStatus")]
    pub res_status: String,
    #[serde(rename = "POS")]
    pub pos: Pos,
    #[serde(rename = "HotelReservations")]
    pub reservations: HotelReservations,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelReservations {
    #[serde(rename = "HotelReservation", skip_serializing_if = "Vec::is_empty")]
    pub reservations: Vec<HotelReservation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HotelReservation {
    #[serde(rename = "@ResStatus", skip_serializing_if = "Option::is_none")]
    pub res_status: Option<String>,
    #[serde(rename = "UniqueID", skip_serializing_if = "Vec::is_empty")]
    pub unique_ids: Vec<UniqueId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_stays: Option<RoomStays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_guests: Option<ResGuests>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_global_info: Option<ResGlobalInfo>,
    #[serde(rename = "TPA_Extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ReservationExtensions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomStays {
    #[serde(rename = "RoomStay", skip_serializing_if = "Vec::is_empty")]
    pub room_stays: Vec<RoomStay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RoomStay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_types: Option<RoomTypes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_plans: Option<RatePlans>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_counts: Option<GuestCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_span: Option<DateTimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Total>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_property_info: Option<BasicPropertyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Comments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<SpecialRequests>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomTypes {
    #[serde(rename = "RoomType", skip_serializing_if = "Vec::is_empty")]
    pub room_types: Vec<RoomType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomType {
    #[serde(rename = "@RoomTypeCode", skip_serializing_if = "Option::is_none")]
    pub room_type_code: Option<String>,
    #[serde(rename = "@NumberOfUnits", skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RatePlans {
    #[serde(rename = "RatePlan", skip_serializing_if = "Vec::is_empty")]
    pub rate_plans: Vec<RatePlan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RatePlan {
    #[serde(rename = "@RatePlanCode", skip_serializing_if = "Option::is_none")]
    pub rate_plan_code: Option<String>,
    #[serde(rename = "@RatePlanName", skip_serializing_if = "Option::is_none")]
    pub rate_plan_name: Option<String>,
}

/// Priced total, only ever filled in by the CRS.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Total {
    #[serde(rename = "@AmountBeforeTax", skip_serializing_if = "Option::is_none")]
    pub amount_before_tax: Option<String>,
    #[serde(rename = "@AmountAfterTax", skip_serializing_if = "Option::is_none")]
    pub amount_after_tax: Option<String>,
    #[serde(rename = "@CurrencyCode", skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResGuests {
    #[serde(rename = "ResGuest", skip_serializing_if = "Vec::is_empty")]
    pub guests: Vec<ResGuest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResGuest {
    #[serde(rename = "@ResGuestRPH", skip_serializing_if = "Option::is_none")]
    pub res_guest_rph: Option<u32>,
    #[serde(rename = "@AgeQualifyingCode", skip_serializing_if = "Option::is_none")]
    pub age_qualifying_code: Option<u32>,
    #[serde(rename = "@PrimaryIndicator", skip_serializing_if = "Option::is_none")]
    pub primary_indicator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Profiles>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Profiles {
    #[serde(rename = "ProfileInfo", skip_serializing_if = "Vec::is_empty")]
    pub profile_infos: Vec<ProfileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProfileInfo {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Profile {
    #[serde(rename = "@ProfileType", skip_serializing_if = "Option::is_none")]
    pub profile_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<PersonName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telephone: Vec<Telephone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResGlobalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Comments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantee: Option<Guarantee>,
    #[serde(rename = "HotelReservationIDs", skip_serializing_if = "Option::is_none")]
    pub hotel_reservation_ids: Option<HotelReservationIds>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelReservationIds {
    #[serde(rename = "HotelReservationID", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<HotelReservationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelReservationId {
    #[serde(rename = "@ResID_Type", skip_serializing_if = "Option::is_none")]
    pub res_id_type: Option<String>,
    #[serde(rename = "@ResID_Value", skip_serializing_if = "Option::is_none")]
    pub res_id_value: Option<String>,
    #[serde(rename = "@ResID_Source", skip_serializing_if = "Option::is_none")]
    pub res_id_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ReservationExtensions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_conf_inst: Option<WrittenConfInst>,
}

pub fn build(header: MessageHeader, params: &ParameterMap) -> Result<HotelResRq, MappingError> {
    let reservation = HotelReservation {
        res_status: None,
        unique_ids: Vec::new(),
        room_stays: room_stays(params, &ROOM_STAY_KEYS)?,
        services: groups::services(params)?,
        res_guests: res_guests(params)?,
        res_global_info: res_global_info(params, CardRule::Create)?,
        extensions: extensions(params)?,
    };

    Ok(HotelResRq {
        xmlns: OTA_NAMESPACE,
        echo_token: header.echo_token,
        time_stamp: header.time_stamp,
        target: header.target,
        version: header.version,
        primary_lang_id: header.primary_lang_id,
        res_status: params
            .text("ResStatus")?
            .unwrap_or_else(|| DEFAULT_RES_STATUS.to_string()),
        pos: header.pos,
        reservations: HotelReservations {
            reservations: vec![reservation],
        },
    })
}

/// Listed `RoomStays`, or a single stay described by the top-level keys.
///
/// Listed stays without their own `Count` or `SpecialRequests` take the
/// top-level ones.
pub(super) fn room_stays(
    params: &ParameterMap,
    trigger: &[&str],
) -> Result<Option<RoomStays>, MappingError> {
    let listed = params.groups("RoomStays")?;
    let room_stays = if listed.is_empty() {
        if !params.contains_any(trigger) {
            return Ok(None);
        }
        let mut stay = room_stay(params)?;
        // Top-level comments belong to the reservation, not the stay.
        stay.comments = None;
        vec![stay]
    } else {
        let guest_counts = groups::guest_counts(params, "Count")?;
        let special_requests = groups::special_requests(params)?;
        listed
            .iter()
            .map(|listed| {
                let mut stay = room_stay(listed)?;
                if stay.guest_counts.is_none() {
                    stay.guest_counts = guest_counts.clone();
                }
                if stay.special_requests.is_none() {
                    stay.special_requests = special_requests.clone();
                }
                Ok(stay)
            })
            .collect::<Result<Vec<_>, MappingError>>()?
    };

    Ok(Some(RoomStays { room_stays }))
}

fn room_stay(params: &ParameterMap) -> Result<RoomStay, MappingError> {
    let room_types = match params.text("RoomTypeCode")? {
        Some(code) => Some(RoomTypes {
            room_types: vec![RoomType {
                room_type_code: Some(code),
                number_of_units: Some(
                    params
                        .integer("NumberOfUnits")?
                        .unwrap_or(DEFAULT_NUMBER_OF_UNITS),
                ),
            }],
        }),
        None => None,
    };

    let rate_plans: Vec<RatePlan> = params
        .texts("RatePlanCode")?
        .into_iter()
        .map(|code| RatePlan {
            rate_plan_code: Some(code),
            rate_plan_name: None,
        })
        .collect();

    Ok(RoomStay {
        room_types,
        rate_plans: (!rate_plans.is_empty()).then_some(RatePlans { rate_plans }),
        guest_counts: groups::guest_counts(params, "Count")?,
        time_span: groups::stay_span(params)?,
        total: None,
        basic_property_info: groups::property_info(params)?,
        comments: groups::comments(params)?,
        special_requests: groups::special_requests(params)?,
    })
}

pub(super) fn res_guests(params: &ParameterMap) -> Result<Option<ResGuests>, MappingError> {
    let guests = params
        .groups("ResGuests")?
        .iter()
        .enumerate()
        .map(|(index, guest)| res_guest(index, guest))
        .collect::<Result<Vec<_>, MappingError>>()?;

    Ok((!guests.is_empty()).then_some(ResGuests { guests }))
}

fn res_guest(index: usize, guest: &ParameterMap) -> Result<ResGuest, MappingError> {
    let age_qualifying_code = match guest.text("AgeQualifyingCode")? {
        Some(name) => Some(
            AgeQualifyingCode::resolve(&format!("ResGuests[{index}].AgeQualifyingCode"), &name)?
                .code(),
        ),
        None => None,
    };

    let customer = Customer {
        person_name: groups::person_name(guest)?,
        telephone: groups::telephones(guest)?,
        email: groups::emails(guest)?,
        address: groups::address(guest)?,
    };
    let profile = Profile {
        profile_type: guest.text("ProfileType")?,
        customer: (customer != Customer::default()).then_some(customer),
    };
    let profiles = (profile != Profile::default()).then(|| Profiles {
        profile_infos: vec![ProfileInfo { profile }],
    });

    Ok(ResGuest {
        res_guest_rph: u32::try_from(index + 1).ok(),
        age_qualifying_code,
        primary_indicator: guest.flag("PrimaryIndicator")?,
        profiles,
    })
}

pub(super) fn res_global_info(
    params: &ParameterMap,
    rule: CardRule,
) -> Result<Option<ResGlobalInfo>, MappingError> {
    let info = ResGlobalInfo {
        comments: groups::comments(params)?,
        guarantee: groups::guarantee(params, rule)?,
        hotel_reservation_ids: None,
    };
    Ok((info != ResGlobalInfo::default()).then_some(info))
}

pub(super) fn extensions(params: &ParameterMap) -> Result<Option<ReservationExtensions>, MappingError> {
    Ok(groups::written_conf_inst(params)?.map(|inst| ReservationExtensions {
        written_conf_inst: Some(inst),
    }))
}
