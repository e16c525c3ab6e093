//! Configuration (ambient stack, §3 "Configuration"): the Rust analogue of
//! `Iso14229ServerConfig` in the original source's `iso14229.h`. Assembled
//! by the integrator and handed to [`crate::instance::Instance::new`];
//! immutable thereafter.

use crate::negative_response_code::NegativeResponseCode;

/// `rdbi(dataId) -> Result<data, code>` — permitted failure codes are
/// `IncorrectMessageLengthOrInvalidFormat`, `ConditionsNotCorrect`,
/// `RequestOutOfRange`, `SecurityAccessDenied` (§6).
pub type RdbiCallback<Ctx> = fn(ctx: &mut Ctx, data_id: u16) -> Result<&[u8], NegativeResponseCode>;

/// `wdbi(dataId, data) -> code` — additionally permits
/// `GeneralProgrammingFailure` on top of the RDBI code set (§6).
pub type WdbiCallback<Ctx> = fn(ctx: &mut Ctx, data_id: u16, data: &[u8]) -> NegativeResponseCode;

/// `hard_reset()` — invoked once the deferred-reset deadline has elapsed
/// (§4.4, §4.10). Takes no action on its own return value: by the time
/// this runs the positive response has already left the wire.
pub type HardResetCallback<Ctx> = fn(ctx: &mut Ctx);

pub struct ServerConfig<Ctx> {
    pub phys_recv_id: u32,
    pub func_recv_id: u32,
    pub send_id: u32,
    pub rdbi: Option<RdbiCallback<Ctx>>,
    pub wdbi: Option<WdbiCallback<Ctx>>,
    pub hard_reset: HardResetCallback<Ctx>,
    pub p2_ms: u32,
    pub p2_star_ms: u32,
    pub s3_ms: u32,
}

impl<Ctx> ServerConfig<Ctx> {
    #[must_use]
    pub fn new(
        phys_recv_id: u32,
        func_recv_id: u32,
        send_id: u32,
        hard_reset: HardResetCallback<Ctx>,
        p2_ms: u32,
        p2_star_ms: u32,
        s3_ms: u32,
    ) -> Self {
        Self {
            phys_recv_id,
            func_recv_id,
            send_id,
            rdbi: None,
            wdbi: None,
            hard_reset,
            p2_ms,
            p2_star_ms,
            s3_ms,
        }
    }

    #[must_use]
    pub fn with_rdbi(mut self, rdbi: RdbiCallback<Ctx>) -> Self {
        self.rdbi = Some(rdbi);
        self
    }

    #[must_use]
    pub fn with_wdbi(mut self, wdbi: WdbiCallback<Ctx>) -> Self {
        self.wdbi = Some(wdbi);
        self
    }
}
