use thiserror::Error;

use crate::authorizer::Args;
use crate::decision::Reason;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A second resolution call on a decision whose single permitted
    /// resolution is already spent. Signals a bug in the caller.
    #[error("decision has already been resolved")]
    AlreadyResolved,

    /// The receiver has no authorization handler for the requested action.
    #[error("receiver has no authorization handler for action `{0}`")]
    UnknownAction(String),

    /// A denial surfaced through the strict entry point.
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
}

/// Denial raised by `Authorizer::authorize`. Carries the original reason
/// together with the call context for logging or presentation.
#[derive(Debug, Error)]
#[error("not authorized to `{action}`: {reason}")]
pub struct Unauthorized {
    reason: Reason,
    action: String,
    receiver: &'static str,
    args: Args,
}

impl Unauthorized {
    pub(crate) fn new(reason: Reason, action: &str, receiver: &'static str, args: Args) -> Self {
        Self {
            reason,
            action: action.to_string(),
            receiver,
            args,
        }
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Type name of the receiver the denied query targeted.
    pub fn receiver(&self) -> &'static str {
        self.receiver
    }

    /// The fully merged call arguments, defaults included.
    pub fn args(&self) -> &Args {
        &self.args
    }
}
