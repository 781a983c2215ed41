//! Creation flows for requests and offers.
//!
//! Each flow owns its draft form state, validates it, synthesizes the entity
//! and reports completion through a caller-supplied callback.

mod images;
mod notice;
mod offer_form;
mod request_form;

pub use images::*;
pub use notice::*;
pub use offer_form::*;
pub use request_form::*;

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use rand::Rng;

use crate::errors::{AppError, ValidationErrors};

/// A successfully created entity and the notice to show for it.
#[derive(Debug, Clone)]
pub struct Submitted<T> {
    pub entity: T,
    pub notice: Notice,
}

/// Why a submission did not complete.
#[derive(Debug)]
pub enum SubmitError {
    /// The form was rejected before anything was synthesized.
    Invalid {
        errors: ValidationErrors,
        notice: Option<Notice>,
    },
    /// Synthesis or the completion callback failed; the form is kept for a retry.
    Failed { source: AppError, notice: Notice },
}

impl SubmitError {
    pub fn into_parts(self) -> (AppError, Option<Notice>) {
        match self {
            SubmitError::Invalid { errors, notice } => (AppError::Validation(errors), notice),
            SubmitError::Failed { source, notice } => (source, Some(notice)),
        }
    }
}

static LAST_REQUEST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// `req_<millis>`, strictly increasing within the process.
pub(crate) fn next_request_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_REQUEST_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_REQUEST_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return format!("req_{}", next),
            Err(actual) => last = actual,
        }
    }
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `offer-<millis>-<9 random base36 chars>`
pub(crate) fn next_offer_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("offer-{}-{}", Utc::now().timestamp_millis(), suffix)
}
