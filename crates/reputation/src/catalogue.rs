//! Named records applied by the retrieval layer.
//!
//! | Record | Point | Violation |
//! |--------|------:|:---------:|
//! | [`network_error`] | -5 | yes |
//! | [`invalid_response`] | -10 | yes |
//! | [`invalid_response_after_payment`] | -50 | yes |
//! | [`offer_verification_failed`] | -20 | yes |
//! | [`retrieval_success`] | 5 | no |
//! | [`payment_success`] | 10 | no |

use crate::Record;

pub fn network_error() -> Record {
    Record::new("network error", -5, true)
}

pub fn invalid_response() -> Record {
    Record::new("invalid response", -10, true)
}

/// The peer took payment and then served bad data.
pub fn invalid_response_after_payment() -> Record {
    Record::new("invalid response after payment", -50, true)
}

pub fn offer_verification_failed() -> Record {
    Record::new("offer verification failed", -20, true)
}

pub fn retrieval_success() -> Record {
    Record::new("retrieval success", 5, false)
}

pub fn payment_success() -> Record {
    Record::new("payment success", 10, false)
}

/// Every catalogue record.
pub fn all() -> Vec<Record> {
    vec![
        network_error(),
        invalid_response(),
        invalid_response_after_payment(),
        offer_verification_failed(),
        retrieval_success(),
        payment_success(),
    ]
}
