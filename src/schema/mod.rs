// Request schema trees, one module per OTA message family.
pub mod availability;
pub mod cancel;
pub mod descriptive;
pub(crate) mod groups;
pub mod modify;
pub mod pos;
pub mod read;
pub mod reservation;

use pos::Pos;

pub const OTA_NAMESPACE: &str = "http://www.opentravel.org/OTA/2003/05";

/// Root attributes and source block shared by every request root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub pos: Pos,
    pub echo_token: Option<String>,
    pub time_stamp: String,
    pub target: &'static str,
    pub version: String,
    pub primary_lang_id: Option<String>,
}
