//! Extension hook (C10): an optional surrounding layer that can enable
//! services and otherwise mutate the instance once at init time, and again
//! on every poll iteration. Grounded in `Iso14229UserMiddleware` in the
//! original source (`initFunc`/`pollFunc` pair) and in `appsoftware.c`,
//! which uses exactly this hook to enable the demo's service set.

use crate::error::Error;
use crate::instance::Instance;

pub trait Middleware<Ctx> {
    /// Called once, immediately after [`Instance::new`], before the first
    /// poll. Typical use: `instance.enable(sid)` for each service the
    /// surrounding application wants live.
    fn init(&mut self, instance: &mut Instance<Ctx>) -> Result<(), Error>;

    /// Called once per poll iteration (§4.11 step 3), before inbound
    /// dispatch is considered.
    fn poll(&mut self, instance: &mut Instance<Ctx>);
}
