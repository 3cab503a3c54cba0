// XML encoding of request trees and unwrapping of raw replies
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::transport::TransportFault;

pub fn encode<T: Serialize>(tree: &T) -> Result<String, MappingError> {
    quick_xml::se::to_string(tree).map_err(|e| MappingError::Encoding(e.to_string()))
}

/// Finds the first element with the given local name and returns its full
/// XML, start tag to end tag. Prefixes and enclosing envelopes are ignored.
pub fn extract_element<'a>(
    xml: &'a str,
    local_name: &str,
) -> Result<Option<&'a str>, TransportFault> {
    let mut reader = Reader::from_str(xml);

    loop {
        let start = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == local_name.as_bytes() => {
                let end_tag = e.to_end().into_owned();
                reader
                    .read_to_end(end_tag.name())
                    .map_err(|e| TransportFault::MalformedReply(e.to_string()))?;
                return slice(xml, start, reader.buffer_position()).map(Some);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == local_name.as_bytes() => {
                return slice(xml, start, reader.buffer_position()).map(Some);
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(TransportFault::MalformedReply(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => (),
        }
    }
}

fn slice(xml: &str, start: u64, end: u64) -> Result<&str, TransportFault> {
    let range = usize::try_from(start).ok().zip(usize::try_from(end).ok());
    range
        .and_then(|(start, end)| xml.get(start..end))
        .map(str::trim_start)
        .ok_or_else(|| TransportFault::MalformedReply("element offsets out of range".to_string()))
}

// SOAP 1.1 puts code/text in faultcode/faultstring, SOAP 1.2 in Code/Reason.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SoapFault {
    faultcode: Option<String>,
    faultstring: Option<String>,
    #[serde(rename = "Code")]
    code: Option<FaultCode>,
    #[serde(rename = "Reason")]
    reason: Option<FaultReason>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FaultCode {
    #[serde(rename = "Value")]
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FaultReason {
    #[serde(rename = "Text")]
    text: Option<String>,
}

impl From<SoapFault> for TransportFault {
    fn from(fault: SoapFault) -> Self {
        TransportFault::Fault {
            code: fault
                .faultcode
                .or_else(|| fault.code.and_then(|c| c.value))
                .unwrap_or_default(),
            message: fault
                .faultstring
                .or_else(|| fault.reason.and_then(|r| r.text))
                .unwrap_or_default(),
        }
    }
}

/// Turns a raw reply into the expected response tree.
///
/// The reply may be the bare response element or a full SOAP envelope. A SOAP
/// fault, or a reply without the expected element, is a transport fault.
pub fn decode_reply<R: DeserializeOwned>(
    reply: &str,
    response_type: &str,
) -> Result<R, TransportFault> {
    if let Some(element) = extract_element(reply, response_type)? {
        return quick_xml::de::from_str(element)
            .map_err(|e| TransportFault::MalformedReply(format!("{response_type}: {e}")));
    }

    if let Some(element) = extract_element(reply, "Fault")? {
        let fault: SoapFault = quick_xml::de::from_str(element)
            .map_err(|e| TransportFault::MalformedReply(format!("Fault: {e}")))?;
        return Err(fault.into());
    }

    Err(TransportFault::MalformedReply(format!(
        "reply does not contain {response_type}"
    )))
}
