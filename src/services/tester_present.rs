//! TesterPresent (0x3E): refreshes the S3 inactivity timer (§4.10).

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::suppress::split_suppress_bit;

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some(&raw) = req.data.first() else {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    };
    let (suppress, masked) = split_suppress_bit(raw);
    if masked != 0x00 {
        instance.send_negative(req.sid, NegativeResponseCode::SubFunctionNotSupported);
        return;
    }
    instance.session.refresh_s3(req.now_ms, instance.config.s3_ms);
    if suppress {
        return;
    }
    instance.send_positive(req.sid, &[masked]);
}
