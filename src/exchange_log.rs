// Diagnostic capture of raw request/response payloads
use dashmap::DashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request: String,
    pub response: String,
}

/// Receives the last payloads exchanged for an operation after a successful call.
pub trait ExchangeLog: Send + Sync {
    fn record(&self, operation: &str, exchange: Exchange);
}

/// Emits payloads as `debug` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExchangeLog;

impl ExchangeLog for TracingExchangeLog {
    fn record(&self, operation: &str, exchange: Exchange) {
        debug!(
            operation,
            request = %exchange.request,
            response = %exchange.response,
            "CRS exchange captured"
        );
    }
}

/// Keeps the most recent exchange per operation.
#[derive(Debug, Default)]
pub struct MemoryExchangeLog {
    last: DashMap<String, Exchange>,
}

impl MemoryExchangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self, operation: &str) -> Option<Exchange> {
        self.last.get(operation).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

impl ExchangeLog for MemoryExchangeLog {
    fn record(&self, operation: &str, exchange: Exchange) {
        self.last.insert(operation.to_string(), exchange);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(request: &str, response: &str) -> Exchange {
        Exchange {
            request: request.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_memory_log_keeps_last_exchange_per_operation() {
        let log = MemoryExchangeLog::new();
        assert!(log.is_empty());

        log.record("CheckAvailability", exchange("<a/>", "<b/>"));
        log.record("CheckAvailability", exchange("<c/>", "<d/>"));
        log.record("CancelReservations", exchange("<e/>", "<f/>"));

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.last("CheckAvailability"),
            Some(exchange("<c/>", "<d/>"))
        );
        assert!(log.last("ReadReservations").is_none());
    }

    #[test]
    fn test_tracing_log_accepts_exchanges() {
        TracingExchangeLog.record("CheckAvailability", exchange("<a/>", "<b/>"));
    }
}
