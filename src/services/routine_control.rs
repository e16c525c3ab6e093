//! RoutineControl (0x31, §4.8).

use crate::instance::Instance;
use crate::negative_response_code::NegativeResponseCode;
use crate::registry::ServiceRequest;
use crate::routine::RoutineControlArgs;
use crate::wire::{be16, from_be16};

const START_ROUTINE: u8 = 0x01;
const STOP_ROUTINE: u8 = 0x02;
const REQUEST_ROUTINE_RESULTS: u8 = 0x03;

pub fn handle<Ctx>(instance: &mut Instance<Ctx>, req: ServiceRequest<'_>) {
    if req.data.len() < 3 {
        instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
        return;
    }
    let control_type = req.data[0];
    let routine_id = from_be16([req.data[1], req.data[2]]);
    let option_record = &req.data[3..];

    let Some(entry) = instance.routines.lookup_mut(routine_id) else {
        instance.send_negative(req.sid, NegativeResponseCode::SubFunctionNotSupported);
        return;
    };

    let callback = match control_type {
        START_ROUTINE => entry.start,
        STOP_ROUTINE => entry.stop,
        REQUEST_ROUTINE_RESULTS => entry.results,
        _ => {
            instance.send_negative(req.sid, NegativeResponseCode::IncorrectMessageLengthOrInvalidFormat);
            return;
        }
    };
    let Some(callback) = callback else {
        instance.send_negative(req.sid, NegativeResponseCode::SubFunctionNotSupported);
        return;
    };
    let user_ctx = entry.user_ctx.as_mut();

    let mut status_record = [0u8; 255];
    let mut status_record_len = 0usize;
    let code = callback(
        &mut instance.ctx,
        RoutineControlArgs {
            option_record,
            status_record_out: &mut status_record,
            status_record_len_out: &mut status_record_len,
            user_ctx,
        },
    );
    if code != NegativeResponseCode::PositiveResponse {
        instance.send_negative(req.sid, code);
        return;
    }
    if status_record_len > status_record.len() {
        instance.send_negative(req.sid, NegativeResponseCode::GeneralProgrammingFailure);
        return;
    }

    let mut payload = Vec::with_capacity(4 + status_record_len);
    payload.push(control_type);
    payload.extend_from_slice(&be16(routine_id));
    payload.push(0x00); // routineInfo: unused by this core
    payload.extend_from_slice(&status_record[..status_record_len]);
    instance.send_positive(req.sid, &payload);
}
