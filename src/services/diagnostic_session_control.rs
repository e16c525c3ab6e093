//! DiagnosticSessionControl (0x10, §4.3).

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::session_type::SessionType;
use crate::suppress::split_suppress_bit;
use crate::wire::be16;

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some(&raw) = req.data.first() else {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    };
    let (suppress, masked) = split_suppress_bit(raw);
    let Ok(session_type) = SessionType::try_from(masked) else {
        instance.send_negative(req.sid, NegativeResponseCode::ServiceNotSupported);
        return;
    };

    instance.session.set_diag_mode(session_type);
    if suppress {
        return;
    }

    let mut payload = Vec::with_capacity(5);
    payload.push(masked);
    payload.extend_from_slice(&be16(instance.config.p2_ms as u16));
    payload.extend_from_slice(&be16((instance.config.p2_star_ms / 10) as u16));
    instance.send_positive(req.sid, &payload);
}
