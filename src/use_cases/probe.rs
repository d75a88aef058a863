use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::entities::{PhaseTimings, ProbeLogLine, SessionKey, SessionRecord};
use crate::domain::errors::ProbeError;
use crate::domain::ports::{Clock, ProbeLogSink, StoreConnector};
use crate::interface_adapters::protocol::{
    ErrorResponse, InvocationContext, InvocationEvent, InvocationResponse, SuccessResponse,
};

// Probe use case with injected dependencies.
pub struct ProbeUseCase<S, L, C> {
    pub connector: S,
    pub sink: L,
    pub clock: C,
}

impl<S, L, C> ProbeUseCase<S, L, C>
where
    S: StoreConnector,
    L: ProbeLogSink,
    C: Clock,
{
    // Connect, write, read, log once, respond. Never retries.
    pub async fn execute(
        &self,
        event: InvocationEvent,
        context: InvocationContext,
    ) -> InvocationResponse {
        if let Some(caller_request_id) = event.caller_request_id() {
            info!(%caller_request_id, "caller request id");
        }

        match self.run_phases().await {
            Ok(timings) => {
                self.sink
                    .emit(&ProbeLogLine::success(&context.request_id, &timings));
                InvocationResponse::Success(SuccessResponse::from_timings(&timings))
            }
            Err(err) => {
                warn!(phase = err.phase(), error = %err, "probe failed");
                self.sink.emit(&ProbeLogLine::failure(
                    self.clock.now(),
                    &context.request_id,
                    err.message(),
                ));
                InvocationResponse::Failure(ErrorResponse {
                    error: err.message().to_string(),
                })
            }
        }
    }

    async fn run_phases(&self) -> Result<PhaseTimings, ProbeError> {
        // The connection lives only for this call.
        let started = Instant::now();
        let mut connection = self
            .connector
            .connect()
            .await
            .map_err(ProbeError::Connect)?;
        let connection_secs = started.elapsed().as_secs_f64();

        let key = SessionKey::generate();
        let record = SessionRecord::synthetic();

        let started = Instant::now();
        connection
            .write_session(&key, &record)
            .await
            .map_err(ProbeError::Write)?;
        let write_secs = started.elapsed().as_secs_f64();

        // Read time includes encoding the hash back to JSON.
        let started = Instant::now();
        let fields = connection
            .read_session(&key)
            .await
            .map_err(ProbeError::Read)?;
        let encoded =
            serde_json::to_string(&fields).map_err(|err| ProbeError::Read(err.to_string()))?;
        let read_secs = started.elapsed().as_secs_f64();

        debug!(%key, fields = fields.len(), bytes = encoded.len(), "session read back");

        Ok(PhaseTimings {
            connection: connection_secs,
            write: write_secs,
            read: read_secs,
        })
    }
}
