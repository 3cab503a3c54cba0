// Caller-facing connector facade
use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::{ConnectorConfig, Credentials};
use crate::error::{ConfigError, ConnectorError, MappingError};
use crate::exchange_log::{ExchangeLog, TracingExchangeLog};
use crate::mapper::{self, Operation, RequestContext, RequestTree};
use crate::params::ParameterMap;
use crate::response::{
    CancelRs, HotelAvailRs, HotelDescriptiveInfoRs, HotelResModifyRs, HotelResRs, OtaResponse,
    ResRetrieveRs,
};
use crate::transport::{
    SessionOptions, SoapHeader, Transport, TransportFault, TransportSession,
    HTNG_HEADER_NAMESPACE,
};

/// Result of a call that got past mapping and session setup.
///
/// Any transport-level failure, including a fault returned by the CRS, ends
/// up as `NoResult`. Business errors inside a response are `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Completed(T),
    NoResult(TransportFault),
}

impl<T> CallOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(response) => Some(response),
            Self::NoResult(_) => None,
        }
    }

    pub fn fault(&self) -> Option<&TransportFault> {
        match self {
            Self::Completed(_) => None,
            Self::NoResult(fault) => Some(fault),
        }
    }

    pub fn into_result(self) -> Result<T, TransportFault> {
        match self {
            Self::Completed(response) => Ok(response),
            Self::NoResult(fault) => Err(fault),
        }
    }
}

#[derive(Serialize)]
#[serde(rename = "HTNGHeader")]
struct HtngHeader<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "From")]
    from: HeaderFrom<'a>,
}

#[derive(Serialize)]
struct HeaderFrom<'a> {
    #[serde(rename = "systemId")]
    system_id: &'a str,
    #[serde(rename = "Credential")]
    credential: HeaderCredential<'a>,
}

#[derive(Serialize)]
struct HeaderCredential<'a> {
    #[serde(rename = "userName")]
    user_name: &'a str,
    password: &'a str,
}

fn auth_header(credentials: &Credentials) -> Result<SoapHeader, MappingError> {
    let header = HtngHeader {
        xmlns: HTNG_HEADER_NAMESPACE,
        from: HeaderFrom {
            system_id: &credentials.system_id,
            credential: HeaderCredential {
                user_name: &credentials.username,
                password: &credentials.password,
            },
        },
    };
    Ok(SoapHeader {
        namespace: HTNG_HEADER_NAMESPACE,
        name: "HTNGHeader",
        content: codec::encode(&header)?,
    })
}

/// Connector to one CRS endpoint.
///
/// Every operation opens its own transport session, so a connector can be
/// shared across concurrent callers without locking.
pub struct CrsConnector<T: Transport> {
    transport: T,
    config: ConnectorConfig,
    credentials: Arc<Credentials>,
    zone: FixedOffset,
    auth_header: SoapHeader,
    exchange_log: Option<Arc<dyn ExchangeLog>>,
}

impl<T: Transport> CrsConnector<T> {
    pub fn new(
        transport: T,
        config: ConnectorConfig,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        credentials.validate()?;
        let zone = config.time_zone()?;
        let auth_header = auth_header(&credentials).map_err(|e| {
            ConfigError::InvalidCredentials(format!("header could not be encoded: {e}"))
        })?;

        let exchange_log: Option<Arc<dyn ExchangeLog>> = if config.capture_exchanges {
            Some(Arc::new(TracingExchangeLog))
        } else {
            None
        };

        info!(
            endpoint = %config.endpoint,
            target = config.target.as_str(),
            version = %config.message_version,
            "CRS connector ready"
        );

        Ok(Self {
            transport,
            config,
            credentials: Arc::new(credentials),
            zone,
            auth_header,
            exchange_log,
        })
    }

    /// Routes captured payloads to `log` instead of the default tracing sink.
    #[must_use]
    pub fn with_exchange_log(mut self, log: Arc<dyn ExchangeLog>) -> Self {
        self.exchange_log = Some(log);
        self
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub async fn check_availability(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<HotelAvailRs>, ConnectorError> {
        self.execute(Operation::CheckAvailability, params).await
    }

    pub async fn create_reservation(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<HotelResRs>, ConnectorError> {
        self.execute(Operation::CreateReservations, params).await
    }

    pub async fn read_reservation(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<ResRetrieveRs>, ConnectorError> {
        self.execute(Operation::ReadReservations, params).await
    }

    pub async fn modify_reservation(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<HotelResModifyRs>, ConnectorError> {
        self.execute(Operation::ModifyReservations, params).await
    }

    pub async fn cancel_reservation(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<CancelRs>, ConnectorError> {
        self.execute(Operation::CancelReservations, params).await
    }

    pub async fn hotel_descriptive_info(
        &self,
        params: &ParameterMap,
    ) -> Result<CallOutcome<HotelDescriptiveInfoRs>, ConnectorError> {
        self.execute(Operation::GetHotelDescriptiveInfo, params).await
    }

    /// Builds the request tree an operation would send, without sending it.
    pub fn build_request(
        &self,
        operation: Operation,
        params: &ParameterMap,
    ) -> Result<RequestTree, MappingError> {
        mapper::build(operation, params, &self.context())
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            credentials: &self.credentials,
            target: self.config.target,
            version: &self.config.message_version,
            zone: self.zone,
            now: Utc::now(),
        }
    }

    async fn execute<R: OtaResponse>(
        &self,
        operation: Operation,
        params: &ParameterMap,
    ) -> Result<CallOutcome<R>, ConnectorError> {
        let contract = operation.contract();
        let options = SessionOptions {
            contract,
            timeout: self.config.timeout(),
            trace: self.exchange_log.is_some(),
        };

        let mut session = self
            .transport
            .open_session(&self.config.endpoint, options)
            .await?;
        session.set_header(self.auth_header.clone());

        let body = self.build_request(operation, params)?.to_xml()?;
        debug!(
            operation = contract.operation,
            request_type = contract.request_type,
            body_len = body.len(),
            "Dispatching CRS request"
        );

        let reply = match session.call(contract.operation, body).await {
            Ok(reply) => reply,
            Err(fault) => {
                warn!(operation = contract.operation, error = %fault, "CRS call returned no result");
                return Ok(CallOutcome::NoResult(fault));
            }
        };

        let response = match codec::decode_reply::<R>(&reply, contract.response_type) {
            Ok(response) => response,
            Err(fault) => {
                warn!(operation = contract.operation, error = %fault, "CRS call returned no result");
                return Ok(CallOutcome::NoResult(fault));
            }
        };

        if let Some(log) = &self.exchange_log {
            if let Some(exchange) = session.last_exchange() {
                log.record(contract.operation, exchange);
            }
        }

        debug!(
            operation = contract.operation,
            success = response.is_success(),
            "CRS call completed"
        );
        Ok(CallOutcome::Completed(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use crate::exchange_log::MemoryExchangeLog;
    use crate::transport::mock_transport::MockTransport;
    use futures::future::join_all;
    use serde_json::json;
    use std::time::Duration;

    const CANCEL_REPLY: &str = r#"<OTA_CancelRS Status="Cancelled"><Success/><UniqueID Type="14" ID="ABC123"/><CancelInfoRS><UniqueID Type="15" ID="CXL-1"/></CancelInfoRS></OTA_CancelRS>"#;

    fn config() -> ConnectorConfig {
        ConnectorConfig {
            target: Target::Test,
            timeout_ms: Some(2_000),
            ..ConnectorConfig::new("https://crs.example.com/ota")
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("SYS-1", "agent", "s3cret")
    }

    fn connector(transport: &MockTransport) -> CrsConnector<MockTransport> {
        CrsConnector::new(transport.clone(), config(), credentials()).unwrap()
    }

    fn params(value: serde_json::Value) -> ParameterMap {
        ParameterMap::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn test_cancel_end_to_end() {
        let transport = MockTransport::new();
        transport.reply("CancelReservations", CANCEL_REPLY);
        let connector = connector(&transport);

        let outcome = connector
            .cancel_reservation(&params(json!({"ID": "ABC123", "HotelCode": "H1", "ChainCode": "C1"})))
            .await
            .unwrap();

        let response = outcome.completed().unwrap();
        assert!(response.is_success());
        assert_eq!(response.cancellation_id().unwrap().id.as_deref(), Some("CXL-1"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.endpoint, "https://crs.example.com/ota");
        assert_eq!(call.operation, "CancelReservations");
        assert_eq!(call.options.contract.request_type, "OTA_CancelRQ");
        assert_eq!(call.options.contract.response_type, "OTA_CancelRS");
        assert_eq!(call.options.timeout, Some(Duration::from_millis(2_000)));
        assert!(call.body.starts_with("<OTA_CancelRQ "));
        assert!(call.body.contains(r#"<UniqueID Type="14" ID="ABC123" ID_Context="CrsConfirmNumber"/>"#));
        assert!(call.body.contains(r#"HotelCode="H1""#));
        assert!(call.body.contains(r#"ChainCode="C1""#));
        assert!(!call.body.contains("WrittenConfInst"));
    }

    #[tokio::test]
    async fn test_auth_header_is_injected() {
        let transport = MockTransport::new();
        transport.reply("CancelReservations", CANCEL_REPLY);
        let connector = connector(&transport);

        connector
            .cancel_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();

        let headers = &transport.calls()[0].headers;
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].namespace, "http://htng.org/1.1/Header/");
        assert_eq!(headers[0].name, "HTNGHeader");
        assert_eq!(
            headers[0].content,
            r#"<HTNGHeader xmlns="http://htng.org/1.1/Header/"><From><systemId>SYS-1</systemId><Credential><userName>agent</userName><password>s3cret</password></Credential></From></HTNGHeader>"#
        );
    }

    #[tokio::test]
    async fn test_transport_fault_collapses_to_no_result() {
        let transport = MockTransport::new();
        transport.fail(
            "CancelReservations",
            TransportFault::Fault {
                code: "soap:Server".to_string(),
                message: "Reservation locked".to_string(),
            },
        );
        let connector = connector(&transport);

        let outcome = connector
            .cancel_reservation(&params(json!({"ID": "ABC123", "HotelCode": "H1", "ChainCode": "C1"})))
            .await
            .unwrap();

        assert!(!outcome.is_completed());
        assert!(matches!(outcome.fault(), Some(TransportFault::Fault { .. })));
    }

    #[tokio::test]
    async fn test_timeouts_and_network_errors_are_no_result() {
        let transport = MockTransport::new();
        transport.fail(
            "CheckAvailability",
            TransportFault::Timeout(Duration::from_secs(2)),
        );
        let connector = connector(&transport);

        let outcome = connector
            .check_availability(&params(json!({"HotelCode": "H1"})))
            .await
            .unwrap();
        assert_eq!(
            outcome.into_result().unwrap_err(),
            TransportFault::Timeout(Duration::from_secs(2))
        );

        // Nothing scripted for reads: the mock answers with a network error.
        let outcome = connector
            .read_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();
        assert!(matches!(outcome, CallOutcome::NoResult(TransportFault::Network(_))));
    }

    #[tokio::test]
    async fn test_fault_reply_and_garbage_are_no_result() {
        let transport = MockTransport::new();
        transport.reply(
            "ReadReservations",
            r#"<Envelope><Body><Fault><faultcode>Client</faultcode><faultstring>Bad ID</faultstring></Fault></Body></Envelope>"#,
        );
        transport.reply("ModifyReservations", "<html>gateway error</html>");
        let connector = connector(&transport);

        let read = connector
            .read_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();
        assert_eq!(
            read.fault(),
            Some(&TransportFault::Fault {
                code: "Client".to_string(),
                message: "Bad ID".to_string(),
            })
        );

        let modify = connector
            .modify_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();
        assert!(matches!(modify.fault(), Some(TransportFault::MalformedReply(_))));
    }

    #[tokio::test]
    async fn test_session_refusal_is_a_config_error() {
        let transport = MockTransport::new();
        transport.refuse_sessions();
        let connector = connector(&transport);

        let error = connector
            .cancel_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap_err();

        assert!(matches!(error, ConnectorError::Config(ConfigError::Session(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mapping_error_surfaces_before_any_call() {
        let transport = MockTransport::new();
        transport.reply("CheckAvailability", "<OTA_HotelAvailRS><Success/></OTA_HotelAvailRS>");
        let connector = connector(&transport);

        let error = connector
            .check_availability(&params(json!({"Count": {"adult": 1, "teen": 1}})))
            .await
            .unwrap_err();

        match error {
            ConnectorError::Mapping(mapping) => assert_eq!(mapping.field(), Some("Count.teen")),
            other => panic!("expected a mapping error, got {:?}", other),
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_business_errors_are_returned_unchanged() {
        let transport = MockTransport::new();
        transport.reply(
            "CreateReservations",
            r#"<OTA_HotelResRS><Errors><Error Code="322">No availability</Error></Errors></OTA_HotelResRS>"#,
        );
        let connector = connector(&transport);

        let outcome = connector
            .create_reservation(&params(json!({"HotelCode": "H1", "Surname": "Doe"})))
            .await
            .unwrap();

        let response = outcome.completed().unwrap();
        assert!(!response.is_success());
        assert_eq!(response.errors()[0].code.as_deref(), Some("322"));
    }

    #[tokio::test]
    async fn test_concurrent_calls_use_separate_sessions() {
        let transport = MockTransport::new();
        transport.reply("CancelReservations", CANCEL_REPLY);
        let connector = Arc::new(connector(&transport));

        let ids: Vec<String> = (0..16).map(|i| format!("RES{i:03}")).collect();
        let calls = ids.iter().map(|id| {
            let connector = Arc::clone(&connector);
            let p = params(json!({"ID": id}));
            async move { connector.cancel_reservation(&p).await }
        });
        let outcomes = join_all(calls).await;

        assert!(outcomes
            .into_iter()
            .all(|outcome| outcome.unwrap().is_completed()));
        assert_eq!(transport.sessions_opened(), ids.len());

        let recorded = transport.calls();
        assert_eq!(recorded.len(), ids.len());
        for call in &recorded {
            assert_eq!(call.headers.len(), 1);
        }
        for id in &ids {
            let matching = recorded
                .iter()
                .filter(|call| call.body.contains(&format!(r#"ID="{id}""#)))
                .count();
            assert_eq!(matching, 1, "request for {id} should be sent exactly once");
        }
    }

    #[tokio::test]
    async fn test_exchange_capture() {
        let transport = MockTransport::new();
        transport.reply("CancelReservations", CANCEL_REPLY);
        let log = Arc::new(MemoryExchangeLog::new());
        let connector = connector(&transport).with_exchange_log(log.clone());

        connector
            .cancel_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();

        assert!(transport.calls()[0].options.trace);
        let exchange = log.last("CancelReservations").unwrap();
        assert!(exchange.request.starts_with("<OTA_CancelRQ "));
        assert_eq!(exchange.response, CANCEL_REPLY);
    }

    #[tokio::test]
    async fn test_no_capture_by_default() {
        let transport = MockTransport::new();
        transport.reply("CancelReservations", CANCEL_REPLY);
        let connector = connector(&transport);

        connector
            .cancel_reservation(&params(json!({"ID": "ABC123"})))
            .await
            .unwrap();

        assert!(!transport.calls()[0].options.trace);
    }

    #[tokio::test]
    async fn test_each_operation_binds_its_own_contract() {
        let transport = MockTransport::new();
        transport.reply("CheckAvailability", "<OTA_HotelAvailRS><Success/></OTA_HotelAvailRS>");
        transport.reply(
            "GetHotelDescriptiveInfo",
            "<OTA_HotelDescriptiveInfoRS><Success/></OTA_HotelDescriptiveInfoRS>",
        );
        let connector = connector(&transport);
        let p = params(json!({"HotelCode": "H1"}));

        assert!(connector.check_availability(&p).await.unwrap().is_completed());
        assert!(connector.hotel_descriptive_info(&p).await.unwrap().is_completed());

        let contracts: Vec<_> = transport
            .calls()
            .iter()
            .map(|call| call.options.contract)
            .collect();
        assert_eq!(contracts[0], Operation::CheckAvailability.contract());
        assert_eq!(contracts[1], Operation::GetHotelDescriptiveInfo.contract());
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let transport = MockTransport::new();

        let bad_endpoint = CrsConnector::new(
            transport.clone(),
            ConnectorConfig::new("ftp://crs.example.com"),
            credentials(),
        );
        assert!(matches!(bad_endpoint, Err(ConfigError::InvalidEndpoint(_))));

        let bad_credentials = CrsConnector::new(
            transport,
            config(),
            Credentials::new("SYS-1", "", "s3cret"),
        );
        assert!(matches!(bad_credentials, Err(ConfigError::InvalidCredentials(_))));
    }

    #[test]
    fn test_build_request_without_sending() {
        let transport = MockTransport::new();
        let connector = connector(&transport);

        let tree = connector
            .build_request(
                Operation::CreateReservations,
                &params(json!({"HotelCode": "H1", "ResGuests": [{"Surname": "A"}, {"Surname": "B"}]})),
            )
            .unwrap();

        assert_eq!(tree.operation(), Operation::CreateReservations);
        assert!(tree.to_xml().unwrap().contains(r#"Target="Test""#));
        assert_eq!(transport.sessions_opened(), 0);
    }
}
