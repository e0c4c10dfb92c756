use std::collections::BTreeMap;
use std::fmt;

use crate::authorizer::Args;
use crate::decision::Outcome;
use crate::errors::{Error, Result};

/// External collaborator that performs the domain-specific authorization
/// check for the actions it supports.
///
/// Implementations must return [`Error::UnknownAction`] for actions they
/// do not support; the authorizer propagates it to the caller uninspected.
pub trait Receiver {
    fn authorize_to(&self, action: &str, args: &Args) -> Result<Outcome>;
}

type Handler = Box<dyn Fn(&Args) -> Outcome>;

/// A [`Receiver`] backed by a map of per-action handlers, for callers that
/// prefer registering closures over implementing the trait.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for one action, replacing any previous one.
    pub fn register<F>(mut self, action: &str, handler: F) -> Self
    where
        F: Fn(&Args) -> Outcome + 'static,
    {
        self.handlers.insert(action.to_string(), Box::new(handler));
        self
    }
}

impl Receiver for ActionRegistry {
    fn authorize_to(&self, action: &str, args: &Args) -> Result<Outcome> {
        match self.handlers.get(action) {
            Some(handler) => Ok(handler(args)),
            None => Err(Error::UnknownAction(action.to_string())),
        }
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::Value;

    #[test]
    fn dispatches_registered_handler_with_args() {
        let registry = ActionRegistry::new().register("show", |args: &Args| {
            if args.named("d") == Some(&Value::from(4)) {
                Outcome::Allowed
            } else {
                Outcome::denied("missing d")
            }
        });

        let args = Args::new().with_named("d", 4);
        assert_matches!(registry.authorize_to("show", &args), Ok(Outcome::Allowed));

        assert_matches!(
            registry.authorize_to("show", &Args::new()),
            Ok(Outcome::Denied(reason)) if reason.as_str() == Some("missing d")
        );
    }

    #[test]
    fn unknown_action_is_a_misuse_error() {
        let registry = ActionRegistry::new().register("show", |_: &Args| Outcome::Allowed);

        assert_matches!(
            registry.authorize_to("destroy", &Args::new()),
            Err(Error::UnknownAction(action)) if action == "destroy"
        );
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let registry = ActionRegistry::new()
            .register("show", |_: &Args| Outcome::denied("old"))
            .register("show", |_: &Args| Outcome::Allowed);

        assert_matches!(registry.authorize_to("show", &Args::new()), Ok(Outcome::Allowed));
    }
}
