//! Routine registry (C7): user-registered routine descriptors indexed by
//! routine ID, with start/stop/results callbacks, consumed by
//! RoutineControl (0x31, §4.8).

use std::any::Any;

use crate::error::Error;
use crate::negative_response_code::NegativeResponseCode;

/// Argument bundle handed to a routine callback (§4.8). `status_record_out`
/// is the caller-owned scratch area the routine may fill in; writing past
/// `status_record_len_out > status_record_out.len()` is rejected by the
/// handler with `GeneralProgrammingFailure` rather than trusted blindly.
/// `user_ctx` is the registering routine's own per-entry state (§3
/// `Routine Entry.user_ctx`), downcast to whatever concrete type the
/// routine registered it as.
pub struct RoutineControlArgs<'a> {
    pub option_record: &'a [u8],
    pub status_record_out: &'a mut [u8],
    pub status_record_len_out: &'a mut usize,
    pub user_ctx: &'a mut dyn Any,
}

pub type RoutineCallback<Ctx> = fn(&mut Ctx, RoutineControlArgs<'_>) -> NegativeResponseCode;

/// `{ routine_id, start, stop, results, user_ctx }` per §3. `user_ctx` is
/// the Rust analogue of the original source's per-routine `void *userCtx`:
/// unlike the callbacks' shared `&mut Ctx` (one instance-wide context),
/// `user_ctx` is owned by the entry itself, so distinct registered
/// routines each carry independent state. Defaults to `Box::new(())` for
/// routines that don't need any.
pub struct RoutineEntry<Ctx> {
    pub routine_id: u16,
    pub start: Option<RoutineCallback<Ctx>>,
    pub stop: Option<RoutineCallback<Ctx>>,
    pub results: Option<RoutineCallback<Ctx>>,
    pub user_ctx: Box<dyn Any>,
}

/// Compile-time maximum registered routines, `ISO14229_USER_DEFINED_MAX_ROUTINES`
/// in the original source's `iso14229_config.h`.
pub const MAX_ROUTINES: usize = crate::MAX_ROUTINES;

pub struct RoutineRegistry<Ctx> {
    entries: Vec<RoutineEntry<Ctx>>,
}

impl<Ctx> RoutineRegistry<Ctx> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a routine. Additive only — there is no de-registration
    /// (§5): registrations are expected to happen before the first poll.
    pub fn register(&mut self, entry: RoutineEntry<Ctx>) -> Result<(), Error> {
        if self.entries.len() >= MAX_ROUTINES {
            return Err(Error::RoutineRegistryFull);
        }
        if self.entries.iter().any(|e| e.routine_id == entry.routine_id) {
            return Err(Error::DuplicateRoutineId(entry.routine_id));
        }
        self.entries.push(entry);
        Ok(())
    }

    #[must_use]
    pub fn lookup(&self, routine_id: u16) -> Option<&RoutineEntry<Ctx>> {
        self.entries.iter().find(|e| e.routine_id == routine_id)
    }

    #[must_use]
    pub fn lookup_mut(&mut self, routine_id: u16) -> Option<&mut RoutineEntry<Ctx>> {
        self.entries.iter_mut().find(|e| e.routine_id == routine_id)
    }
}

impl<Ctx> Default for RoutineRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}
