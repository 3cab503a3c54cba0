// Reservation cancellation request (OTA_CancelRQ)
use serde::Serialize;

use super::groups;
use super::pos::Pos;
use super::{MessageHeader, OTA_NAMESPACE};
use crate::error::MappingError;
use crate::fields::{UniqueId, Verification, WrittenConfInst};
use crate::params::ParameterMap;

pub const DEFAULT_CANCEL_TYPE: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_CancelRQ")]
pub struct CancelRq {
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
    #[serde(rename = "@CancelType")]
    pub cancel_type: String,
    #[serde(rename = "POS")]
    pub pos: Pos,
    #[serde(rename = "UniqueID")]
    pub unique_id: UniqueId,
    #[serde(rename = "Verification", skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
    #[serde(rename = "Reasons", skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Reasons>,
    #[serde(rename = "TPA_Extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<CancelExtensions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reasons {
    #[serde(rename = "Reason")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CancelExtensions {
    pub written_conf_inst: WrittenConfInst,
}

pub fn build(header: MessageHeader, params: &ParameterMap) -> Result<CancelRq, MappingError> {
    let reasons = params.texts("CancellationReason")?;

    Ok(CancelRq {
        xmlns: OTA_NAMESPACE,
        echo_token: header.echo_token,
        time_stamp: header.time_stamp,
        target: header.target,
        version: header.version,
        primary_lang_id: header.primary_lang_id,
        cancel_type: params
            .text("CancelType")?
            .unwrap_or_else(|| DEFAULT_CANCEL_TYPE.to_string()),
        pos: header.pos,
        unique_id: groups::unique_id(params)?,
        verification: groups::verification(params)?,
        reasons: (!reasons.is_empty()).then_some(Reasons { reasons }),
        extensions: groups::written_conf_inst(params)?
            .map(|written_conf_inst| CancelExtensions { written_conf_inst }),
    })
}
