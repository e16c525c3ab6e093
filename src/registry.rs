//! Service registry & dispatcher (C4).
//!
//! The table is a flat array indexed by the raw SID byte rather than a map
//! or a table of trait objects (§9 "Variant services"): lookup is O(1), the
//! table is heap-free, and each known SID always maps to the same built-in
//! handler function — `enable`/`disable` only flips whether dispatch is
//! allowed to reach it.

use crate::error::Error;
use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::service_id::ServiceId;
use crate::services;

/// Request handed to a service handler: `sid` is the raw request byte,
/// `data` is everything after it.
pub struct ServiceRequest<'a> {
    pub sid: u8,
    pub data: &'a [u8],
    pub now_ms: u32,
}

pub type HandlerFn<Ctx> = fn(&mut Instance<Ctx>, ServiceRequest<'_>);

#[derive(Clone, Copy)]
enum Slot<Ctx> {
    Disabled,
    Enabled(HandlerFn<Ctx>),
}

impl<Ctx> Slot<Ctx> {
    const fn disabled() -> Self {
        Slot::Disabled
    }
}

/// Result of a call to [`ServiceTable::enable`], mirroring the three
/// outcomes spec.md §4.1 requires without putting anything on the wire.
#[derive(Debug, Eq, PartialEq)]
pub enum EnableOutcome {
    Enabled,
    AlreadyEnabled,
}

pub struct ServiceTable<Ctx> {
    slots: [Slot<Ctx>; 256],
}

fn builtin_handler<Ctx>(sid: u8) -> Option<HandlerFn<Ctx>> {
    match ServiceId::try_from(sid).ok()? {
        ServiceId::DiagnosticSessionControl => Some(services::diagnostic_session_control::handle),
        ServiceId::EcuReset => Some(services::ecu_reset::handle),
        ServiceId::ReadDataByIdentifier => Some(services::read_data_by_identifier::handle),
        ServiceId::CommunicationControl => Some(services::communication_control::handle),
        ServiceId::WriteDataByIdentifier => Some(services::write_data_by_identifier::handle),
        ServiceId::RoutineControl => Some(services::routine_control::handle),
        ServiceId::RequestDownload => Some(services::download::handle_request_download),
        ServiceId::TransferData => Some(services::download::handle_transfer_data),
        ServiceId::RequestTransferExit => Some(services::download::handle_request_transfer_exit),
        ServiceId::TesterPresent => Some(services::tester_present::handle),
    }
}

impl<Ctx> ServiceTable<Ctx> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [Slot::disabled(); 256],
        }
    }

    /// Enable dispatch for `sid`. Fails with [`Error::UnknownServiceId`] if
    /// `sid` isn't one of the ten services this core implements.
    pub fn enable(&mut self, sid: u8) -> Result<EnableOutcome, Error> {
        let handler = builtin_handler::<Ctx>(sid).ok_or(Error::UnknownServiceId(sid))?;
        match self.slots[sid as usize] {
            Slot::Enabled(_) => Ok(EnableOutcome::AlreadyEnabled),
            Slot::Disabled => {
                self.slots[sid as usize] = Slot::Enabled(handler);
                Ok(EnableOutcome::Enabled)
            }
        }
    }

    #[must_use]
    pub fn is_enabled(&self, sid: u8) -> bool {
        matches!(self.slots[sid as usize], Slot::Enabled(_))
    }

    fn handler(&self, sid: u8) -> Option<HandlerFn<Ctx>> {
        match self.slots[sid as usize] {
            Slot::Enabled(handler) => Some(handler),
            Slot::Disabled => None,
        }
    }
}

impl<Ctx> Default for ServiceTable<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatch a reassembled request (§4.1). Empty payloads are dropped
/// silently; unknown or disabled SIDs get `ServiceNotSupported`.
pub fn dispatch<Ctx>(instance: &mut Instance<Ctx>, payload: &[u8], now_ms: u32) {
    let Some((&sid, data)) = payload.split_first() else {
        tracing::debug!("dropping empty inbound payload");
        return;
    };
    match instance.services.handler(sid) {
        Some(handler) => handler(instance, ServiceRequest { sid, data, now_ms }),
        None => {
            tracing::debug!(sid, "rejecting disabled/unknown service");
            instance.send_negative(sid, NegativeResponseCode::ServiceNotSupported);
        }
    }
}
