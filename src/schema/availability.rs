// Availability search request (OTA_HotelAvailRQ)
use serde::Serialize;

use super::groups;
use super::pos::Pos;
use super::{MessageHeader, OTA_NAMESPACE};
use crate::error::MappingError;
use crate::fields::{DateTimeSpan, GuestCounts, HotelRef};
use crate::params::ParameterMap;

pub const DEFAULT_MAX_RESPONSES: u32 = 10;
pub const DEFAULT_AVAIL_REQ_TYPE: &str = "Room";
pub const DEFAULT_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "OTA_HotelAvailRQ")]
pub struct HotelAvailRq {
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
    #[serde(rename = "@MaxResponses")]
    pub max_responses: u32,
    #[serde(rename = "@ExactMatchOnly")]
    pub exact_match_only: bool,
    #[serde(rename = "@BestOnly")]
    pub best_only: bool,
    #[serde(rename = "@SummaryOnly")]
    pub summary_only: bool,
    #[serde(rename = "POS")]
    pub pos: Pos,
    #[serde(rename = "AvailRequestSegments")]
    pub segments: AvailRequestSegments,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AvailRequestSegments {
    #[serde(rename = "AvailRequestSegment")]
    pub segments: Vec<AvailRequestSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AvailRequestSegment {
    #[serde(rename = "@AvailReqType")]
    pub avail_req_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_date_range: Option<DateTimeSpan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_plan_candidates: Option<RatePlanCandidates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_stay_candidates: Option<RoomStayCandidates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_search_criteria: Option<HotelSearchCriteria>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RatePlanCandidates {
    #[serde(rename = "RatePlanCandidate")]
    pub candidates: Vec<RatePlanCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RatePlanCandidate {
    #[serde(rename = "@RatePlanCode", skip_serializing_if = "Option::is_none")]
    pub rate_plan_code: Option<String>,
    #[serde(rename = "@PromotionCode", skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoomStayCandidates {
    #[serde(rename = "RoomStayCandidate")]
    pub candidates: Vec<RoomStayCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomStayCandidate {
    #[serde(rename = "@RoomTypeCode", skip_serializing_if = "Option::is_none")]
    pub room_type_code: Option<String>,
    #[serde(rename = "@Quantity")]
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_counts: Option<GuestCounts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HotelSearchCriteria {
    #[serde(rename = "Criterion")]
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Criterion {
    pub hotel_ref: HotelRef,
}

pub fn build(header: MessageHeader, params: &ParameterMap) -> Result<HotelAvailRq, MappingError> {
    let segment = AvailRequestSegment {
        avail_req_type: params
            .text("AvailReqType")?
            .unwrap_or_else(|| DEFAULT_AVAIL_REQ_TYPE.to_string()),
        stay_date_range: groups::stay_span(params)?,
        rate_plan_candidates: rate_plan_candidates(params)?,
        room_stay_candidates: room_stay_candidates(params)?,
        hotel_search_criteria: hotel_search_criteria(params)?,
    };

    Ok(HotelAvailRq {
        xmlns: OTA_NAMESPACE,
        echo_token: header.echo_token,
        time_stamp: header.time_stamp,
        target: header.target,
        version: header.version,
        primary_lang_id: header.primary_lang_id,
        max_responses: params
            .integer("MaxResponses")?
            .unwrap_or(DEFAULT_MAX_RESPONSES),
        exact_match_only: params.flag("ExactMatchOnly")?.unwrap_or(false),
        best_only: params.flag("BestOnly")?.unwrap_or(false),
        summary_only: params.flag("SummaryOnly")?.unwrap_or(false),
        pos: header.pos,
        segments: AvailRequestSegments {
            segments: vec![segment],
        },
    })
}

fn rate_plan_candidates(params: &ParameterMap) -> Result<Option<RatePlanCandidates>, MappingError> {
    let promotion_code = params.text("PromotionCode")?;
    let mut candidates: Vec<RatePlanCandidate> = params
        .texts("RatePlanCode")?
        .into_iter()
        .map(|code| RatePlanCandidate {
            rate_plan_code: Some(code),
            promotion_code: promotion_code.clone(),
        })
        .collect();

    // A promotion on its own still narrows the search.
    if candidates.is_empty() && promotion_code.is_some() {
        candidates.push(RatePlanCandidate {
            rate_plan_code: None,
            promotion_code,
        });
    }

    Ok((!candidates.is_empty()).then_some(RatePlanCandidates { candidates }))
}

fn room_stay_candidates(params: &ParameterMap) -> Result<Option<RoomStayCandidates>, MappingError> {
    let listed = params.groups("RoomStayCandidates")?;
    let candidates = if listed.is_empty() {
        if !params.contains_any(&["Count", "RoomTypeCode", "Quantity"]) {
            return Ok(None);
        }
        vec![room_stay_candidate(params)?]
    } else {
        listed
            .iter()
            .map(room_stay_candidate)
            .collect::<Result<Vec<_>, MappingError>>()?
    };

    Ok(Some(RoomStayCandidates { candidates }))
}

fn room_stay_candidate(params: &ParameterMap) -> Result<RoomStayCandidate, MappingError> {
    Ok(RoomStayCandidate {
        room_type_code: params.text("RoomTypeCode")?,
        quantity: params.integer("Quantity")?.unwrap_or(DEFAULT_QUANTITY),
        guest_counts: groups::guest_counts(params, "Count")?,
    })
}

fn hotel_search_criteria(params: &ParameterMap) -> Result<Option<HotelSearchCriteria>, MappingError> {
    let chain_code = params.text("ChainCode")?;
    let mut criteria: Vec<Criterion> = params
        .texts("HotelCode")?
        .into_iter()
        .map(|hotel_code| Criterion {
            hotel_ref: HotelRef {
                chain_code: chain_code.clone(),
                hotel_code: Some(hotel_code),
            },
        })
        .collect();

    if criteria.is_empty() && chain_code.is_some() {
        criteria.push(Criterion {
            hotel_ref: HotelRef {
                chain_code,
                hotel_code: None,
            },
        });
    }

    Ok((!criteria.is_empty()).then_some(HotelSearchCriteria { criteria }))
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
            target: "Test",
            version: "1.0".to_string(),
            primary_lang_id: None,
        }
    }

    fn build_from(value: Value) -> Result<HotelAvailRq, MappingError> {
        build(header(), &ParameterMap::try_from(value).unwrap())
    }

    #[test]
    fn test_search_flags_default_to_explicit_false() {
        let rq = build_from(json!({"HotelCode": "H1"})).unwrap();

        assert!(!rq.exact_match_only);
        assert!(!rq.best_only);
        assert!(!rq.summary_only);
        assert_eq!(rq.max_responses, 10);
        assert_eq!(rq.segments.segments[0].avail_req_type, "Room");

        let xml = quick_xml::se::to_string(&rq).unwrap();
        assert!(xml.contains(r#"ExactMatchOnly="false""#));
        assert!(xml.contains(r#"MaxResponses="10""#));
    }

    #[test]
    fn test_search_flags_follow_parameters() {
        let rq = build_from(json!({"ExactMatchOnly": true, "MaxResponses": "3"})).unwrap();

        assert!(rq.exact_match_only);
        assert_eq!(rq.max_responses, 3);
    }

    #[test]
    fn test_one_criterion_per_hotel_in_order() {
        let rq = build_from(json!({"HotelCode": ["H2", "H1", "H3"], "ChainCode": "C1"})).unwrap();

        let criteria = rq.segments.segments[0]
            .hotel_search_criteria
            .as_ref()
            .unwrap();
        let hotels: Vec<_> = criteria
            .criteria
            .iter()
            .map(|c| c.hotel_ref.hotel_code.as_deref().unwrap())
            .collect();
        assert_eq!(hotels, vec!["H2", "H1", "H3"]);
        assert!(criteria
            .criteria
            .iter()
            .all(|c| c.hotel_ref.chain_code.as_deref() == Some("C1")));
    }

    #[test]
    fn test_top_level_candidate_from_counts() {
        let rq = build_from(json!({
            "Start": "2024-05-01",
            "End": "2024-05-03",
            "Count": {"adult": 2, "child": 1}
        }))
        .unwrap();

        let segment = &rq.segments.segments[0];
        assert_eq!(
            segment.stay_date_range.as_ref().unwrap().start.as_deref(),
            Some("2024-05-01")
        );
        let candidates = &segment.room_stay_candidates.as_ref().unwrap().candidates;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].quantity, 1);
        let counts = &candidates[0].guest_counts.as_ref().unwrap().guest_counts;
        assert_eq!(counts[0].age_qualifying_code, 10);
        assert_eq!(counts[1].age_qualifying_code, 8);
    }

    #[test]
    fn test_listed_candidates_replace_top_level_one() {
        let rq = build_from(json!({
            "Count": {"adult": 4},
            "RoomStayCandidates": [
                {"RoomTypeCode": "KING", "Count": {"adult": 2}},
                {"RoomTypeCode": "TWIN", "Quantity": 2}
            ]
        }))
        .unwrap();

        let candidates = &rq.segments.segments[0]
            .room_stay_candidates
            .as_ref()
            .unwrap()
            .candidates;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].room_type_code.as_deref(), Some("KING"));
        assert_eq!(candidates[1].quantity, 2);
        assert_eq!(candidates[1].guest_counts, None);
    }

    #[test]
    fn test_unknown_category_fails_the_build() {
        let error = build_from(json!({"Count": {"teen": 1}})).unwrap_err();
        assert_eq!(error.field(), Some("Count.teen"));
    }

    #[test]
    fn test_promotion_without_rate_plan() {
        let rq = build_from(json!({"PromotionCode": "SUMMER"})).unwrap();
        let candidates = &rq.segments.segments[0]
            .rate_plan_candidates
            .as_ref()
            .unwrap()
            .candidates;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rate_plan_code, None);
        assert_eq!(candidates[0].promotion_code.as_deref(), Some("SUMMER"));
    }

    #[test]
    fn test_empty_segment_omits_optional_groups() {
        let rq = build_from(json!({})).unwrap();
        let xml = quick_xml::se::to_string(&rq).unwrap();

        assert!(xml.starts_with("<OTA_HotelAvailRQ "));
        assert!(xml.contains(r#"<AvailRequestSegment AvailReqType="Room""#));
        assert!(!xml.contains("RoomStayCandidates"));
        assert!(!xml.contains("HotelSearchCriteria"));
    }
}
