// CRS connector: maps flat booking parameters onto OTA/HTNG hotel messages

pub mod codec;
pub mod codes;
pub mod config;
pub mod connector;
pub mod error;
pub mod exchange_log;
pub mod fields;
pub mod mapper;
pub mod params;
pub mod response;
pub mod schema;
pub mod transport;

// Re-export key types for convenience
pub use codes::{AgeQualifyingCode, UniqueIdType};
pub use config::{ConnectorConfig, Credentials, PointOfSale, Target};
pub use connector::{CallOutcome, CrsConnector};
pub use error::{ConfigError, ConnectorError, MappingError};
pub use exchange_log::{Exchange, ExchangeLog, MemoryExchangeLog, TracingExchangeLog};
pub use mapper::{format_timestamp, Operation, RequestContext, RequestTree};
pub use params::ParameterMap;
pub use response::{
    CancelRs, HotelAvailRs, HotelDescriptiveInfoRs, HotelResModifyRs, HotelResRs, OtaResponse,
    ResRetrieveRs,
};
pub use transport::{
    MessageContract, SessionOptions, SoapHeader, Transport, TransportFault, TransportSession,
};
