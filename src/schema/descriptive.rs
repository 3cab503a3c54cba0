// Hotel descriptive content request (OTA_HotelDescriptiveInfoRQ)
use serde::Serialize;

use super::pos::Pos;
use super::{MessageHeader, OTA_NAMESPACE};
use crate::error::MappingError;
use crate::params::ParameterMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_HotelDescriptiveInfoRQ")]
pub struct HotelDescriptiveInfoRq {
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
    #[serde(rename = "HotelDescriptiveInfos")]
    pub infos: HotelDescriptiveInfos,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HotelDescriptiveInfos {
    #[serde(rename = "HotelDescriptiveInfo")]
    pub infos: Vec<HotelDescriptiveInfo>,
}

/// Which content sections the CRS should return for one property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotelDescriptiveInfo {
    #[serde(rename = "@HotelCode", skip_serializing_if = "Option::is_none")]
    pub hotel_code: Option<String>,
    #[serde(rename = "@ChainCode", skip_serializing_if = "Option::is_none")]
    pub chain_code: Option<String>,
    pub hotel_info: SendData,
    pub facility_info: FacilityInfo,
    pub policies: SendPolicies,
    pub area_info: AreaInfo,
    pub affiliation_info: AffiliationInfo,
    pub contact_info: SendData,
    pub multimedia_objects: SendData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SendData {
    #[serde(rename = "@SendData")]
    pub send_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FacilityInfo {
    #[serde(rename = "@SendGuestRooms")]
    pub send_guest_rooms: bool,
    #[serde(rename = "@SendMeetingRooms")]
    pub send_meeting_rooms: bool,
    #[serde(rename = "@SendRestaurants")]
    pub send_restaurants: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SendPolicies {
    #[serde(rename = "@SendPolicies")]
    pub send_policies: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AreaInfo {
    #[serde(rename = "@SendRefPoints")]
    pub send_ref_points: bool,
    #[serde(rename = "@SendAttractions")]
    pub send_attractions: bool,
    #[serde(rename = "@SendRecreations")]
    pub send_recreations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AffiliationInfo {
    #[serde(rename = "@SendAwards")]
    pub send_awards: bool,
}

pub fn build(
    header: MessageHeader,
    params: &ParameterMap,
) -> Result<HotelDescriptiveInfoRq, MappingError> {
    let send = |key: &str| -> Result<bool, MappingError> { Ok(params.flag(key)?.unwrap_or(true)) };

    let template = HotelDescriptiveInfo {
        hotel_code: None,
        chain_code: params.text("ChainCode")?,
        hotel_info: SendData {
            send_data: send("SendHotelInfo")?,
        },
        facility_info: FacilityInfo {
            send_guest_rooms: send("SendGuestRooms")?,
            send_meeting_rooms: send("SendMeetingRooms")?,
            send_restaurants: send("SendRestaurants")?,
        },
        policies: SendPolicies {
            send_policies: send("SendPolicies")?,
        },
        area_info: AreaInfo {
            send_ref_points: send("SendRefPoints")?,
            send_attractions: send("SendAttractions")?,
            send_recreations: send("SendRecreations")?,
        },
        affiliation_info: AffiliationInfo {
            send_awards: send("SendAwards")?,
        },
        contact_info: SendData {
            send_data: send("SendContactInfo")?,
        },
        multimedia_objects: SendData {
            send_data: send("SendMultimedia")?,
        },
    };

    let hotel_codes = params.texts("HotelCode")?;
    let infos = if hotel_codes.is_empty() {
        vec![template]
    } else {
        hotel_codes
            .into_iter()
            .map(|code| HotelDescriptiveInfo {
                hotel_code: Some(code),
                ..template.clone()
            })
            .collect()
    };

    Ok(HotelDescriptiveInfoRq {
        xmlns: OTA_NAMESPACE,
        echo_token: header.echo_token,
        time_stamp: header.time_stamp,
        target: header.target,
        version: header.version,
        primary_lang_id: header.primary_lang_id,
        pos: header.pos,
        infos: HotelDescriptiveInfos { infos },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn header() -> MessageHeader {
        MessageHeader {
            pos: Pos::default(),
            echo_token: None,
            time_stamp: "2024-03-01T12:00:00+00:00".to_string(),
            target: "Production",
            version: "1.0".to_string(),
            primary_lang_id: Some("en-US".to_string()),
        }
    }

    fn build_from(value: Value) -> Result<HotelDescriptiveInfoRq, MappingError> {
        build(header(), &ParameterMap::try_from(value).unwrap())
    }

    #[test]
    fn test_one_info_per_hotel_with_all_sections() {
        let rq = build_from(json!({"HotelCode": ["H1", "H2"], "ChainCode": "C1"})).unwrap();

        assert_eq!(rq.infos.infos.len(), 2);
        let first = &rq.infos.infos[0];
        assert_eq!(first.hotel_code.as_deref(), Some("H1"));
        assert_eq!(first.chain_code.as_deref(), Some("C1"));
        assert!(first.hotel_info.send_data);
        assert!(first.facility_info.send_guest_rooms);
        assert!(first.multimedia_objects.send_data);
        assert_eq!(rq.infos.infos[1].hotel_code.as_deref(), Some("H2"));
    }

    #[test]
    fn test_sections_can_be_switched_off() {
        let rq = build_from(json!({
            "HotelCode": "H1",
            "SendMultimedia": false,
            "SendMeetingRooms": "0"
        }))
        .unwrap();

        let info = &rq.infos.infos[0];
        assert!(!info.multimedia_objects.send_data);
        assert!(!info.facility_info.send_meeting_rooms);
        assert!(info.facility_info.send_restaurants);

        let xml = quick_xml::se::to_string(&rq).unwrap();
        assert!(xml.contains(r#"PrimaryLangID="en-US""#));
        assert!(xml.contains(r#"<MultimediaObjects SendData="false"/>"#));
    }

    #[test]
    fn test_bad_flag_names_its_field() {
        let error = build_from(json!({"SendAwards": "sometimes"})).unwrap_err();
        assert_eq!(error.field(), Some("SendAwards"));
    }
}
