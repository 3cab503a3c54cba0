// Point-of-sale / source block, first child of every request
use serde::Serialize;

use crate::config::Credentials;
use crate::error::MappingError;
use crate::fields::CompanyName;
use crate::params::ParameterMap;

pub const DEFAULT_BOOKING_CHANNEL_TYPE: &str = "7";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pos {
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Source {
    #[serde(rename = "RequestorID", skip_serializing_if = "Option::is_none")]
    pub requestor_id: Option<RequestorId>,
    #[serde(rename = "BookingChannel", skip_serializing_if = "Option::is_none")]
    pub booking_channel: Option<BookingChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RequestorId {
    #[serde(rename = "@ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@ID_Context", skip_serializing_if = "Option::is_none")]
    pub id_context: Option<String>,
    #[serde(rename = "@Instance", skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(rename = "@PinNumber", skip_serializing_if = "Option::is_none")]
    pub pin_number: Option<String>,
    #[serde(rename = "@MessagePassword", skip_serializing_if = "Option::is_none")]
    pub message_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BookingChannel {
    #[serde(rename = "@Type")]
    pub channel_type: String,
    #[serde(rename = "@Primary")]
    pub primary: bool,
    #[serde(rename = "CompanyName")]
    pub company_name: CompanyName,
}

/// Builds the source block. Request keys win over the credential context.
pub fn build(params: &ParameterMap, credentials: &Credentials) -> Result<Pos, MappingError> {
    let pos = &credentials.pos;

    let requestor = RequestorId {
        id: params.text("POS.ID")?.or_else(|| pos.requestor_id.clone()),
        id_context: params
            .text("POS.ID_Context")?
            .or_else(|| pos.id_context.clone()),
        instance: params.text("Instance")?,
        pin_number: params.text("PinNumber")?,
        message_password: params.text("MessagePassword")?,
    };
    let requestor_id = (requestor != RequestorId::default()).then_some(requestor);

    let company_code = params.text("POS.Code")?.or_else(|| pos.company_code.clone());
    let channel_type = params
        .text("POS.Type")?
        .or_else(|| pos.booking_channel_type.clone())
        .unwrap_or_else(|| DEFAULT_BOOKING_CHANNEL_TYPE.to_string());
    let booking_channel = company_code.map(|code| BookingChannel {
        channel_type,
        primary: true,
        company_name: CompanyName {
            code: Some(code),
            ..Default::default()
        },
    });

    Ok(Pos {
        source: Source {
            requestor_id,
            booking_channel,
        },
    })
}
