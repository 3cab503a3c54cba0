// Reservation modification request (OTA_HotelResModifyRQ)
use serde::Serialize;

use super::groups::{self, CardRule};
use super::pos::Pos;
use super::reservation::{self, DEFAULT_RES_STATUS, STAY_CHANGE_KEYS};
use super::reservation::{ReservationExtensions, ResGlobalInfo, ResGuests, RoomStays};
use super::{MessageHeader, OTA_NAMESPACE};
use crate::error::MappingError;
use crate::fields::{Services, UniqueId, Verification};
use crate::params::ParameterMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_HotelResModifyRQ")]
pub struct HotelResModifyRq {
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
    #[serde(rename = "HotelResModifies")]
    pub modifies: HotelResModifies,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HotelResModifies {
    #[serde(rename = "HotelResModify")]
    pub modifies: Vec<HotelResModify>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelResModify {
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_stays: Option<RoomStays>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_guests: Option<ResGuests>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub res_global_info: Option<ResGlobalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(rename = "TPA_Extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ReservationExtensions>,
}

pub fn build(header: MessageHeader, params: &ParameterMap) -> Result<HotelResModifyRq, MappingError> {
    let modify = HotelResModify {
        unique_id: groups::unique_id(params)?,
        room_stays: reservation::room_stays(params, &STAY_CHANGE_KEYS)?,
        services: groups::services(params)?,
        res_guests: reservation::res_guests(params)?,
        res_global_info: reservation::res_global_info(params, CardRule::Modify)?,
        verification: groups::verification(params)?,
        extensions: reservation::extensions(params)?,
    };

    Ok(HotelResModifyRq {
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
        modifies: HotelResModifies {
            modifies: vec![modify],
        },
    })
}
