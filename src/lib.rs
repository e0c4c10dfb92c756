#![deny(rust_2018_idioms, warnings)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::similar_names,
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::match_same_arms,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]
mod authorizer;
mod decision;
mod errors;
mod receiver;
mod validator;

pub use authorizer::{Args, Authorizer};
pub use decision::{Decision, ExpectAllowed, ExpectDenied, Outcome, Reason};
pub use errors::{Error, Result, Unauthorized};
pub use receiver::{ActionRegistry, Receiver};
pub use validator::Validator;
