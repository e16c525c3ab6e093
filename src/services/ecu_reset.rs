//! ECUReset (0x11, §4.4). Always responds positively — unlike most other
//! services in this core, suppression of the positive response does not
//! apply here.

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::reset_type::ResetType;

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some(&raw) = req.data.first() else {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    };
    let reset_type = ResetType::from(raw);

    if matches!(reset_type, ResetType::HardReset) {
        instance.reset_latch.arm(req.now_ms);
    }

    instance.send_positive(req.sid, &[u8::from(reset_type), 0x00]);
}
