//! Instance (§3) and poll scheduler (C9): the single top-level owner of all
//! per-server state, and the cooperative entry point the host calls at
//! least every few milliseconds.

use crate::config::ServerConfig;
use crate::download::{DownloadHandlerConfig, DownloadRegistry};
use crate::error::Error;
use crate::middleware::Middleware;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::{self, EnableOutcome, ServiceTable};
use crate::response_buffer::ResponseBuffer;
use crate::routine::{RoutineEntry, RoutineRegistry};
use crate::session::{ResetLatch, SessionState};
use crate::transport::TransportLink;
use crate::wire::time_after;

pub struct Instance<Ctx> {
    pub(crate) config: ServerConfig<Ctx>,
    pub(crate) ctx: Ctx,
    pub(crate) services: ServiceTable<Ctx>,
    pub(crate) routines: RoutineRegistry<Ctx>,
    pub(crate) downloads: DownloadRegistry<Ctx>,
    pub(crate) session: SessionState,
    pub(crate) reset_latch: ResetLatch,
    pub(crate) response: ResponseBuffer,
    p2_timer: u32,
}

impl<Ctx> Instance<Ctx> {
    #[must_use]
    pub fn new(config: ServerConfig<Ctx>, ctx: Ctx, now_ms: u32) -> Self {
        let session = SessionState::new(now_ms, config.s3_ms);
        let p2_timer = now_ms.wrapping_sub(config.p2_ms);
        Self {
            config,
            ctx,
            services: ServiceTable::new(),
            routines: RoutineRegistry::new(),
            downloads: DownloadRegistry::new(),
            session,
            reset_latch: ResetLatch::new(),
            response: ResponseBuffer::default(),
            p2_timer,
        }
    }

    #[must_use]
    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Enable dispatch for `sid` (§4.1). Call before the first [`poll`](Self::poll).
    pub fn enable(&mut self, sid: u8) -> Result<EnableOutcome, Error> {
        self.services.enable(sid)
    }

    pub fn register_routine(&mut self, entry: RoutineEntry<Ctx>) -> Result<(), Error> {
        self.routines.register(entry)
    }

    pub fn register_download_handler(
        &mut self,
        config: DownloadHandlerConfig<Ctx>,
    ) -> Result<(), Error> {
        self.downloads.register(config)
    }

    /// Finish a handler with a positive response: `[sid + 0x40][payload]`
    /// (§4.2). Dropped (with a log) if a response is already pending or the
    /// serialized form would exceed the response buffer's capacity.
    pub(crate) fn send_positive(&mut self, sid: u8, payload: &[u8]) {
        let mut bytes = Vec::with_capacity(1 + payload.len());
        bytes.push(sid.wrapping_add(0x40));
        bytes.extend_from_slice(payload);
        if !self.response.try_set(&bytes) {
            tracing::debug!(sid, len = bytes.len(), "dropping positive response");
        }
    }

    /// Finish a handler with a negative response: `[0x7F, sid, code]`
    /// (§4.2). Always attempted, even if the request's suppress-positive
    /// bit was set — suppression only ever applies to positive responses.
    pub(crate) fn send_negative(&mut self, sid: u8, code: NegativeResponseCode) {
        let bytes = [0x7F, sid, code.into()];
        if !self.response.try_set(&bytes) {
            tracing::warn!(sid, ?code, "dropping negative response");
        }
    }

    /// Cooperative poll entry point (§4.11). Call at least every few ms.
    /// `phys` and `func` are the two logical transport links (physical and
    /// functional addressing); responses are always shipped via `phys`,
    /// matching the single `send_id` the original source's config carries
    /// (there is only one transmit channel even though there are two
    /// receive channels).
    pub fn poll(
        &mut self,
        now_ms: u32,
        phys: &mut dyn TransportLink,
        func: &mut dyn TransportLink,
        middleware: Option<&mut dyn Middleware<Ctx>>,
    ) {
        phys.tick();
        func.tick();

        self.session.tick(now_ms);
        if self.reset_latch.due(now_ms) {
            (self.config.hard_reset)(&mut self.ctx);
            self.reset_latch.clear();
        }

        if let Some(mw) = middleware {
            mw.poll(self);
        }

        if self.response.pending() && time_after(self.p2_timer, now_ms) {
            phys.send(self.response.bytes());
            phys.tick();
            self.p2_timer = now_ms.wrapping_add(self.config.p2_ms);
            self.response.clear();
            return;
        }

        if let Some(payload) = phys.receive_reassembled() {
            registry::dispatch(self, &payload, now_ms);
            self.p2_timer = now_ms.wrapping_add(self.config.p2_ms);
            return;
        }

        if let Some(payload) = func.receive_reassembled() {
            registry::dispatch(self, &payload, now_ms);
            self.p2_timer = now_ms.wrapping_add(self.config.p2_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::LoopbackTransportLink;

    fn hard_reset(_ctx: &mut u32) {}

    fn config() -> ServerConfig<u32> {
        ServerConfig::new(0x7A0, 0x7DF, 0x7A8, hard_reset, 50, 2000, 5000)
    }

    #[test]
    fn p2_timer_starts_elapsed() {
        let mut instance = Instance::new(config(), 0u32, 1000);
        instance.enable(crate::service_id::ServiceId::TesterPresent.into()).unwrap();
        let mut phys = LoopbackTransportLink::new();
        let mut func = LoopbackTransportLink::new();
        phys.inject(vec![0x3E, 0x00]);
        instance.poll(1000, &mut phys, &mut func, None);
        assert!(instance.response.pending());
    }

    #[test]
    fn physical_preferred_over_functional() {
        let mut instance = Instance::new(config(), 0u32, 1000);
        instance.enable(crate::service_id::ServiceId::TesterPresent.into()).unwrap();
        let mut phys = LoopbackTransportLink::new();
        let mut func = LoopbackTransportLink::new();
        phys.inject(vec![0x3E, 0x00]);
        func.inject(vec![0x3E, 0x80]);
        instance.poll(1000, &mut phys, &mut func, None);
        instance.poll(2000, &mut phys, &mut func, None);
        let sent = phys.take_sent();
        assert_eq!(sent, vec![vec![0x7E, 0x00]]);
        assert!(func.receive_reassembled().is_some());
    }
}
