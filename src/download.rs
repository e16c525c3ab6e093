//! Download sequencer (C8): the state machine covering RequestDownload
//! (0x34) → TransferData (0x36, repeated) → RequestTransferExit (0x37),
//! with per-block sequence-counter tracking (§4.9).

use crate::error::Error;
use crate::negative_response_code::NegativeResponseCode;

pub type DownloadRequestCallback<Ctx> =
    fn(ctx: &mut Ctx, data_format_identifier: u8, address: u32, size: u32, max_block_length_out: &mut u16) -> NegativeResponseCode;
pub type DownloadTransferCallback<Ctx> = fn(ctx: &mut Ctx, data: &[u8]) -> NegativeResponseCode;
pub type DownloadExitCallback<Ctx> = fn(ctx: &mut Ctx) -> NegativeResponseCode;

pub struct DownloadHandlerConfig<Ctx> {
    pub on_request: DownloadRequestCallback<Ctx>,
    pub on_transfer: DownloadTransferCallback<Ctx>,
    pub on_exit: DownloadExitCallback<Ctx>,
}

/// `{ config, block_sequence_counter, active }` per §3. On registration the
/// counter starts at 1 and the handler is inactive; the first successful
/// TransferData post-increments it (wrapping `u8`).
pub struct DownloadHandler<Ctx> {
    pub config: DownloadHandlerConfig<Ctx>,
    block_sequence_counter: u8,
    active: bool,
}

impl<Ctx> DownloadHandler<Ctx> {
    #[must_use]
    pub fn new(config: DownloadHandlerConfig<Ctx>) -> Self {
        Self {
            config,
            block_sequence_counter: 1,
            active: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn block_sequence_counter(&self) -> u8 {
        self.block_sequence_counter
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Any TransferData failure, or a completed exit, re-initializes the
    /// handler back to its just-registered state (§4.9).
    pub fn reinitialize(&mut self) {
        self.active = false;
        self.block_sequence_counter = 1;
    }

    /// Post-increment the counter after a successful TransferData,
    /// wrapping `u8` (P6).
    pub fn advance_counter(&mut self) {
        self.block_sequence_counter = self.block_sequence_counter.wrapping_add(1);
    }
}

/// Compile-time maximum registered download handlers,
/// `ISO14229_USER_DEFINED_MAX_DOWNLOAD_HANDLERS` in the original source.
/// Only one handler is ever concurrently active; the table exists because
/// the original source allocates one too (§9 "Download handler
/// multiplicity"), and the selection heuristic — "first registered" — is
/// the same documented limitation, left for a future per-memory-range
/// routing scheme.
pub const MAX_DOWNLOAD_HANDLERS: usize = crate::MAX_DOWNLOAD_HANDLERS;

pub struct DownloadRegistry<Ctx> {
    handlers: Vec<DownloadHandler<Ctx>>,
}

impl<Ctx> DownloadRegistry<Ctx> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, config: DownloadHandlerConfig<Ctx>) -> Result<(), Error> {
        if self.handlers.len() >= MAX_DOWNLOAD_HANDLERS {
            return Err(Error::DownloadHandlerRegistryFull);
        }
        self.handlers.push(DownloadHandler::new(config));
        Ok(())
    }

    /// The "first registered" handler, or `None` if none has been
    /// registered yet.
    pub fn selected_mut(&mut self) -> Option<&mut DownloadHandler<Ctx>> {
        self.handlers.first_mut()
    }
}

impl<Ctx> Default for DownloadRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_request(_ctx: &mut (), _dfi: u8, _addr: u32, _size: u32, max_block: &mut u16) -> NegativeResponseCode {
        *max_block = 4096;
        NegativeResponseCode::PositiveResponse
    }
    fn noop_transfer(_ctx: &mut (), _data: &[u8]) -> NegativeResponseCode {
        NegativeResponseCode::PositiveResponse
    }
    fn noop_exit(_ctx: &mut ()) -> NegativeResponseCode {
        NegativeResponseCode::PositiveResponse
    }

    fn config() -> DownloadHandlerConfig<()> {
        DownloadHandlerConfig {
            on_request: noop_request,
            on_transfer: noop_transfer,
            on_exit: noop_exit,
        }
    }

    #[test]
    fn registration_starts_inactive_with_counter_one() {
        let mut registry = DownloadRegistry::<()>::new();
        registry.register(config()).unwrap();
        let handler = registry.selected_mut().unwrap();
        assert!(!handler.is_active());
        assert_eq!(handler.block_sequence_counter(), 1);
    }

    #[test]
    fn counter_wraps() {
        let mut handler = DownloadHandler::new(config());
        handler.activate();
        for _ in 0..255 {
            handler.advance_counter();
        }
        assert_eq!(handler.block_sequence_counter(), 0);
        handler.advance_counter();
        assert_eq!(handler.block_sequence_counter(), 1);
    }

    #[test]
    fn reinitialize_resets_state() {
        let mut handler = DownloadHandler::new(config());
        handler.activate();
        handler.advance_counter();
        handler.reinitialize();
        assert!(!handler.is_active());
        assert_eq!(handler.block_sequence_counter(), 1);
    }

    #[test]
    fn registry_bounded_at_max() {
        let mut registry = DownloadRegistry::<()>::new();
        for _ in 0..MAX_DOWNLOAD_HANDLERS {
            registry.register(config()).unwrap();
        }
        assert!(matches!(
            registry.register(config()),
            Err(Error::DownloadHandlerRegistryFull)
        ));
    }
}
