//! ReadDataByIdentifier (0x22, §4.5).

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::wire::{be16, from_be16};

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    let Some(rdbi) = instance.config.rdbi else {
        instance.send_negative(req.sid, NegativeResponseCode::ServiceNotSupported);
        return;
    };
    if req.data.is_empty() || req.data.len() % 2 != 0 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }

    // Response SID byte is accounted for up front; each DID is checked for
    // capacity as it is appended rather than only on the final total (§9
    // open question, resolved in favor of the incremental check).
    let mut payload = Vec::new();
    for chunk in req.data.chunks_exact(2) {
        let did = from_be16([chunk[0], chunk[1]]);
        match rdbi(&mut instance.ctx, did) {
            Ok(data) => {
                let needed = 1 + payload.len() + 2 + data.len();
                if needed > instance.response.capacity() {
                    instance.send_negative(req.sid, NegativeResponseCode::ResponseTooLong);
                    return;
                }
                payload.extend_from_slice(&be16(did));
                payload.extend_from_slice(data);
            }
            Err(code) => {
                instance.send_negative(req.sid, code);
                return;
            }
        }
    }
    instance.send_positive(req.sid, &payload);
}
