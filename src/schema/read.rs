// Reservation retrieval request (OTA_ReadRQ)
use serde::Serialize;

use super::groups;
use super::pos::Pos;
use super::{MessageHeader, OTA_NAMESPACE};
use crate::error::MappingError;
use crate::fields::{UniqueId, Verification};
use crate::params::ParameterMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_ReadRQ")]
pub struct ReadRq {
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
    #[serde(rename = "POS")]
    pub pos: Pos,
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    #[serde(rename = "ReadRequests", skip_serializing_if = "Option::is_none")]
    pub read_requests: Option<ReadRequests>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReadRequests {
    #[serde(rename = "HotelReadRequest")]
    pub requests: Vec<HotelReadRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelReadRequest {
    #[serde(rename = "@HotelCode", skip_serializing_if = "Option::is_none")]
    pub hotel_code: Option<String>,
    #[serde(rename = "@ChainCode", skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

pub fn build(header: MessageHeader, params: &ParameterMap) -> Result<ReadRq, MappingError> {
    let request = HotelReadRequest {
        hotel_code: params.text("HotelCode")?,
        chain_code: params.text("ChainCode")?,
        verification: groups::verification_identity(params)?,
    };
    let read_requests = (request != HotelReadRequest::default()).then(|| ReadRequests {
        requests: vec![request],
    });

    Ok(ReadRq {
        xmlns: OTA_NAMESPACE,
        echo_token: header.echo_token,
        time_stamp: header.time_stamp,
        target: header.target,
        version: header.version,
        primary_lang_id: header.primary_lang_id,
        pos: header.pos,
        unique_id: groups::unique_id(params)?,
        read_requests,
    })
}
