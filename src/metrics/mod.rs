//! Metrics calculation modules for boundary evaluation.

pub mod ap;
pub mod f1_score;
pub mod precision_recall;

pub use ap::average_precision;
pub use f1_score::f1_score;
pub use precision_recall::{ratio, rec_prec_f1, rec_prec_f1_curve};
