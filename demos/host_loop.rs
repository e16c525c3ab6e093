//! Minimal host loop demonstrating `Instance::poll` driven over loopback
//! transport links instead of a real CAN socket (§6: the concrete
//! socketCAN glue is an integrator responsibility, out of scope for this
//! core). Grounded in the original source's `example/linux_host.c` main
//! loop (bind socket, `while (!should_exit) { periodic_task(); sleep(); }`)
//! and `appsoftware.c`'s `udsAppInit`, which enables a fixed set of
//! services at startup via the same extension-hook shape as
//! [`Middleware`].
//!
//! Run with `cargo run --example host_loop`.

use std::{thread, time::Duration};

use uds_server_core::config::ServerConfig;
use uds_server_core::error::Error;
use uds_server_core::instance::Instance;
use uds_server_core::middleware::Middleware;
use uds_server_core::negative_response_code::NegativeResponseCode;
use uds_server_core::service_id::ServiceId;
use uds_server_core::transport::{Clock, FixedClock, LoopbackTransportLink};

struct EcuContext {
    serial_number: [u8; 4],
}

/// `iso14229UserGetms`/`iso14229UserSendCAN`-equivalent callbacks, wired
/// the way `appsoftware.c` wires its RDBI/hard-reset handlers.
fn rdbi(ctx: &mut EcuContext, data_id: u16) -> Result<&[u8], NegativeResponseCode> {
    match data_id {
        0xF18C => Ok(&ctx.serial_number),
        _ => Err(NegativeResponseCode::RequestOutOfRange),
    }
}

fn hard_reset(_ctx: &mut EcuContext) {
    tracing::info!("userHardReset() invoked by the deferred reset latch");
}

/// Enables the same service set `udsAppInit` does in the original source:
/// session control, reset, RDBI, WDBI, and tester-present.
struct AppInit;

impl Middleware<EcuContext> for AppInit {
    fn init(&mut self, instance: &mut Instance<EcuContext>) -> Result<(), Error> {
        for sid in [
            ServiceId::DiagnosticSessionControl,
            ServiceId::EcuReset,
            ServiceId::ReadDataByIdentifier,
            ServiceId::WriteDataByIdentifier,
            ServiceId::TesterPresent,
        ] {
            instance.enable(sid.into())?;
        }
        Ok(())
    }

    fn poll(&mut self, _instance: &mut Instance<EcuContext>) {}
}

fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::new(0x7A0, 0x7DF, 0x7A8, hard_reset, 50, 2000, 5000).with_rdbi(rdbi);
    let ctx = EcuContext {
        serial_number: [0xDE, 0xAD, 0xBE, 0xEF],
    };
    let mut clock = FixedClock::new(0);
    let mut instance = Instance::new(config, ctx, clock.now_ms());

    let mut app_init = AppInit;
    app_init.init(&mut instance).expect("service registration failed");

    let mut phys = LoopbackTransportLink::new();
    let mut func = LoopbackTransportLink::new();

    // Simulate a tester sending TesterPresent, then reading the serial
    // number DID, in place of the real socketCAN link the original
    // `linux_host.c` binds before entering its periodic loop.
    phys.inject(vec![0x3E, 0x00]);
    phys.inject(vec![0x22, 0xF1, 0x8C]);

    for _ in 0..6 {
        instance.poll(clock.now_ms(), &mut phys, &mut func, Some(&mut app_init));
        for response in phys.take_sent() {
            println!("-> {response:02X?}");
        }
        clock.advance(10);
        thread::sleep(Duration::from_millis(1));
    }
}
