// Operation mapper: ParameterMap -> request schema tree
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use crate::codec;
use crate::config::{Credentials, Target};
use crate::error::MappingError;
use crate::params::ParameterMap;
use crate::schema::availability::{self, HotelAvailRq};
use crate::schema::cancel::{self, CancelRq};
use crate::schema::descriptive::{self, HotelDescriptiveInfoRq};
use crate::schema::modify::{self, HotelResModifyRq};
use crate::schema::read::{self, ReadRq};
use crate::schema::reservation::{self, HotelResRq};
use crate::schema::{pos, MessageHeader};
use crate::transport::MessageContract;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CheckAvailability,
    CreateReservations,
    ReadReservations,
    ModifyReservations,
    CancelReservations,
    GetHotelDescriptiveInfo,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::CheckAvailability,
        Self::CreateReservations,
        Self::ReadReservations,
        Self::ModifyReservations,
        Self::CancelReservations,
        Self::GetHotelDescriptiveInfo,
    ];

    /// Remote operation name.
    pub const fn name(self) -> &'static str {
        self.contract().operation
    }

    pub const fn contract(self) -> MessageContract {
        let (operation, request_type, response_type) = match self {
            Self::CheckAvailability => ("CheckAvailability", "OTA_HotelAvailRQ", "OTA_HotelAvailRS"),
            Self::CreateReservations => ("CreateReservations", "OTA_HotelResRQ", "OTA_HotelResRS"),
            Self::ReadReservations => ("ReadReservations", "OTA_ReadRQ", "OTA_ResRetrieveRS"),
            Self::ModifyReservations => (
                "ModifyReservations",
                "OTA_HotelResModifyRQ",
                "OTA_HotelResModifyRS",
            ),
            Self::CancelReservations => ("CancelReservations", "OTA_CancelRQ", "OTA_CancelRS"),
            Self::GetHotelDescriptiveInfo => (
                "GetHotelDescriptiveInfo",
                "OTA_HotelDescriptiveInfoRQ",
                "OTA_HotelDescriptiveInfoRS",
            ),
        };
        MessageContract {
            operation,
            request_type,
            response_type,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a build needs besides the parameters. Shared read-only.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub credentials: &'a Credentials,
    pub target: Target,
    pub version: &'a str,
    pub zone: FixedOffset,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTree {
    Availability(HotelAvailRq),
    Reservation(HotelResRq),
    Read(ReadRq),
    Modify(HotelResModifyRq),
    Cancel(CancelRq),
    DescriptiveInfo(HotelDescriptiveInfoRq),
}

impl RequestTree {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Availability(_) => Operation::CheckAvailability,
            Self::Reservation(_) => Operation::CreateReservations,
            Self::Read(_) => Operation::ReadReservations,
            Self::Modify(_) => Operation::ModifyReservations,
            Self::Cancel(_) => Operation::CancelReservations,
            Self::DescriptiveInfo(_) => Operation::GetHotelDescriptiveInfo,
        }
    }

    pub fn time_stamp(&self) -> &str {
        match self {
            Self::Availability(rq) => &rq.time_stamp,
            Self::Reservation(rq) => &rq.time_stamp,
            Self::Read(rq) => &rq.time_stamp,
            Self::Modify(rq) => &rq.time_stamp,
            Self::Cancel(rq) => &rq.time_stamp,
            Self::DescriptiveInfo(rq) => &rq.time_stamp,
        }
    }

    pub fn to_xml(&self) -> Result<String, MappingError> {
        match self {
            Self::Availability(rq) => codec::encode(rq),
            Self::Reservation(rq) => codec::encode(rq),
            Self::Read(rq) => codec::encode(rq),
            Self::Modify(rq) => codec::encode(rq),
            Self::Cancel(rq) => codec::encode(rq),
            Self::DescriptiveInfo(rq) => codec::encode(rq),
        }
    }
}

/// Timestamp in the fixed protocol zone, `YYYY-MM-DDTHH:MM:SS+HH:MM`.
pub fn format_timestamp(instant: DateTime<Utc>, zone: FixedOffset) -> String {
    instant.with_timezone(&zone).format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the request tree for one operation. Pure: no I/O, no state.
pub fn build(
    operation: Operation,
    params: &ParameterMap,
    ctx: &RequestContext<'_>,
) -> Result<RequestTree, MappingError> {
    debug!(operation = operation.name(), "Building request tree");

    let header = MessageHeader {
        pos: pos::build(params, ctx.credentials)?,
        echo_token: params.text("EchoToken")?,
        time_stamp: format_timestamp(ctx.now, ctx.zone),
        target: ctx.target.as_str(),
        version: ctx.version.to_string(),
        primary_lang_id: params.text("LangCode")?,
    };

    let tree = match operation {
        Operation::CheckAvailability => {
            RequestTree::Availability(availability::build(header, params)?)
        }
        Operation::CreateReservations => RequestTree::Reservation(reservation::build(header, params)?),
        Operation::ReadReservations => RequestTree::Read(read::build(header, params)?),
        Operation::ModifyReservations => RequestTree::Modify(modify::build(header, params)?),
        Operation::CancelReservations => RequestTree::Cancel(cancel::build(header, params)?),
        Operation::GetHotelDescriptiveInfo => {
            RequestTree::DescriptiveInfo(descriptive::build(header, params)?)
        }
    };
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use test_case::test_case;

    fn credentials() -> Credentials {
        Credentials::new("SYS", "agent", "secret")
    }

    fn context(credentials: &Credentials, now: DateTime<Utc>) -> RequestContext<'_> {
        RequestContext {
            credentials,
            target: Target::Test,
            version: "1.0",
            zone: FixedOffset::west_opt(6 * 3600).unwrap(),
            now,
        }
    }

    fn params(value: Value) -> ParameterMap {
        ParameterMap::try_from(value).unwrap()
    }

    fn instant(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, second).unwrap()
    }

    #[test]
    fn test_format_timestamp_in_fixed_zone() {
        let zone = FixedOffset::west_opt(6 * 3600).unwrap();
        assert_eq!(
            format_timestamp(instant(5), zone),
            "2024-03-01T12:30:05-06:00"
        );

        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_timestamp(instant(5), utc), "2024-03-01T18:30:05+00:00");
    }

    #[test_case(Operation::CheckAvailability, json!({"HotelCode": ["H1", "H2"], "Count": {"adult": 2}}); "availability")]
    #[test_case(Operation::CreateReservations, json!({"HotelCode": "H1", "ResGuests": [{"Surname": "A"}], "CardCode": "VI", "CardNumber": "4111", "CardExpireDate": "1228"}); "create")]
    #[test_case(Operation::ReadReservations, json!({"ID": "ABC123"}); "read")]
    #[test_case(Operation::ModifyReservations, json!({"ID": "ABC123", "Start": "2024-06-01"}); "modify")]
    #[test_case(Operation::CancelReservations, json!({"ID": "ABC123", "HotelCode": "H1"}); "cancel")]
    #[test_case(Operation::GetHotelDescriptiveInfo, json!({"HotelCode": "H1"}); "descriptive")]
    fn test_build_is_deterministic_apart_from_timestamp(operation: Operation, value: Value) {
        let credentials = credentials();
        let p = params(value);

        let first = build(operation, &p, &context(&credentials, instant(1))).unwrap();
        let again = build(operation, &p, &context(&credentials, instant(1))).unwrap();
        let later = build(operation, &p, &context(&credentials, instant(59))).unwrap();

        assert_eq!(first, again);
        assert_eq!(first.operation(), operation);
        assert_ne!(first.time_stamp(), later.time_stamp());

        let first_xml = first.to_xml().unwrap();
        let later_xml = later
            .to_xml()
            .unwrap()
            .replace(later.time_stamp(), first.time_stamp());
        assert_eq!(first_xml, later_xml);
        assert!(first_xml.starts_with(&format!("<{} ", operation.contract().request_type)));
    }

    #[test]
    fn test_message_stamp_attributes() {
        let credentials = credentials();
        let tree = build(
            Operation::ReadReservations,
            &params(json!({"ID": "ABC123", "EchoToken": "e-42", "LangCode": "en-US"})),
            &context(&credentials, instant(0)),
        )
        .unwrap();

        let xml = tree.to_xml().unwrap();
        assert!(xml.contains(r#"xmlns="http://www.opentravel.org/OTA/2003/05""#));
        assert!(xml.contains(r#"EchoToken="e-42""#));
        assert!(xml.contains(r#"TimeStamp="2024-03-01T12:30:00-06:00""#));
        assert!(xml.contains(r#"Target="Test""#));
        assert!(xml.contains(r#"Version="1.0""#));
        assert!(xml.contains(r#"PrimaryLangID="en-US""#));
    }

    #[test]
    fn test_mapping_errors_stop_the_build() {
        let credentials = credentials();
        let error = build(
            Operation::CheckAvailability,
            &params(json!({"Count": {"teen": 1}})),
            &context(&credentials, instant(0)),
        )
        .unwrap_err();

        assert!(matches!(error, MappingError::UnknownCode { .. }));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let credentials = credentials();
        let plain = params(json!({"ID": "ABC123"}));
        let noisy = params(json!({"ID": "ABC123", "Foo": 1, "POS.Bogus": "x", "Nested": {"a": [1]}}));

        for operation in Operation::ALL {
            let expected = build(operation, &plain, &context(&credentials, instant(0)))
                .and_then(|tree| tree.to_xml())
                .unwrap();
            let actual = build(operation, &noisy, &context(&credentials, instant(0)))
                .and_then(|tree| tree.to_xml())
                .unwrap();

            assert_eq!(actual, expected, "{operation}");
        }
    }

    #[test]
    fn test_every_operation_has_a_distinct_contract() {
        let mut request_types: Vec<_> = Operation::ALL
            .iter()
            .map(|op| op.contract().request_type)
            .collect();
        request_types.sort_unstable();
        request_types.dedup();

        assert_eq!(request_types.len(), Operation::ALL.len());
        assert_eq!(Operation::ReadReservations.contract().response_type, "OTA_ResRetrieveRS");
        assert_eq!(Operation::CancelReservations.to_string(), "CancelReservations");
    }
}
