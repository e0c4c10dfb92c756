use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decision::{Decision, ExpectAllowed, ExpectDenied, Outcome, Reason};
use crate::errors::{Result, Unauthorized};
use crate::receiver::Receiver;
use crate::validator::Validator;

/// Call context for an authorization check: an ordered list of positional
/// values plus named values. Values are opaque `serde_json::Value`s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Args {
    positional: Vec<Value>,
    named: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn with_named(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.named.insert(name.to_string(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Merges `overrides` on top of `self`: positional values of `self`
    /// come first, named values from `overrides` win on name conflicts.
    pub fn merged_with(&self, overrides: &Args) -> Args {
        let mut positional = self.positional.clone();
        positional.extend(overrides.positional.iter().cloned());

        let mut named = self.named.clone();
        named.extend(
            overrides
                .named
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        Args { positional, named }
    }
}

/// Context-carrying dispatcher.
///
/// An authorizer holds default call arguments and an ordered chain of
/// validators over those defaults. Every query runs the validator chain,
/// merges the defaults into the per-call arguments and delegates the
/// actual check to the receiver, wrapping the raw outcome in a
/// [`Decision`] where requested.
///
/// Configuration is immutable after construction except for validator
/// registration, which is append-only and chainable.
pub struct Authorizer {
    defaults: Args,
    validators: Vec<Box<dyn Validator + Send + Sync>>,
}

impl Authorizer {
    pub fn new() -> Self {
        Self::with_defaults(Args::new())
    }

    pub fn with_defaults(defaults: Args) -> Self {
        Self {
            defaults,
            validators: Vec::new(),
        }
    }

    /// Registers a precondition over the default context. Validators run
    /// in registration order before every query; the first denial
    /// short-circuits the query and the receiver is never contacted.
    pub fn with_validator<T>(mut self, validator: T) -> Self
    where
        T: Validator + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Runs the validator chain and, if it passes, delegates the check to
    /// `receiver` with the merged arguments. A denial is a normal answer,
    /// returned as `Ok(Outcome::Denied(..))`; `Err` is reserved for
    /// misuse such as an unknown action.
    pub fn query<R>(&self, action: &str, receiver: &R, args: &Args) -> Result<Outcome>
    where
        R: Receiver,
    {
        self.dispatch(action, receiver, args)
            .map(|(outcome, _)| outcome)
    }

    /// Queries and wraps the outcome in an expect-allowed decision.
    pub fn can<R, V>(&self, action: &str, receiver: &R, args: &Args) -> Result<Decision<ExpectAllowed, V>>
    where
        R: Receiver,
    {
        Ok(Decision::expect_allowed(self.query(action, receiver, args)?))
    }

    /// Like [`can`](Authorizer::can), with a grant handler that runs
    /// immediately when the query is allowed.
    pub fn can_then<R, V, F>(
        &self,
        action: &str,
        receiver: &R,
        args: &Args,
        on_allowed: F,
    ) -> Result<Decision<ExpectAllowed, V>>
    where
        R: Receiver,
        F: FnOnce() -> V,
    {
        Ok(Decision::expect_allowed_then(
            self.query(action, receiver, args)?,
            on_allowed,
        ))
    }

    /// Queries and wraps the outcome in an expect-denied decision.
    pub fn cannot<R, V>(&self, action: &str, receiver: &R, args: &Args) -> Result<Decision<ExpectDenied, V>>
    where
        R: Receiver,
    {
        Ok(Decision::expect_denied(self.query(action, receiver, args)?))
    }

    /// Like [`cannot`](Authorizer::cannot), with a denial handler that
    /// runs immediately with the reason when the query is denied.
    pub fn cannot_then<R, V, F>(
        &self,
        action: &str,
        receiver: &R,
        args: &Args,
        on_denied: F,
    ) -> Result<Decision<ExpectDenied, V>>
    where
        R: Receiver,
        F: FnOnce(&Reason) -> V,
    {
        Ok(Decision::expect_denied_then(
            self.query(action, receiver, args)?,
            on_denied,
        ))
    }

    /// Exact boolean form of [`query`](Authorizer::query); reasons never
    /// propagate.
    pub fn is_allowed<R>(&self, action: &str, receiver: &R, args: &Args) -> Result<bool>
    where
        R: Receiver,
    {
        Ok(self.query(action, receiver, args)?.is_allowed())
    }

    pub fn is_denied<R>(&self, action: &str, receiver: &R, args: &Args) -> Result<bool>
    where
        R: Receiver,
    {
        Ok(!self.is_allowed(action, receiver, args)?)
    }

    /// Strict form: returns `Ok(())` on a grant and raises
    /// [`Unauthorized`] carrying the reason, action, receiver and merged
    /// arguments on a denial.
    pub fn authorize<R>(&self, action: &str, receiver: &R, args: &Args) -> Result<()>
    where
        R: Receiver,
    {
        let (outcome, merged) = self.dispatch(action, receiver, args)?;
        match outcome {
            Outcome::Allowed => Ok(()),
            Outcome::Denied(reason) => {
                Err(Unauthorized::new(reason, action, type_name::<R>(), merged).into())
            }
        }
    }

    fn dispatch<R>(&self, action: &str, receiver: &R, args: &Args) -> Result<(Outcome, Args)>
    where
        R: Receiver,
    {
        let merged = self.defaults.merged_with(args);
        if let Some(denial) = self.validate() {
            return Ok((denial, merged));
        }
        let outcome = receiver.authorize_to(action, &merged)?;
        Ok((outcome, merged))
    }

    fn validate(&self) -> Option<Outcome> {
        for validator in &self.validators {
            match validator.validate(&self.defaults) {
                Outcome::Allowed => {}
                denied => return Some(denied),
            }
        }
        None
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorizer")
            .field("defaults", &self.defaults)
            .field("validators", &self.validators.len())
            .finish()
    }
}
