use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result};

/// Raw answer from an authorization check: either the check passed, or it
/// was denied with an opaque reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Allowed,
    Denied(Reason),
}

impl Outcome {
    /// Builds a `Denied` outcome from anything convertible to a `Reason`.
    pub fn denied(reason: impl Into<Reason>) -> Self {
        Outcome::Denied(reason.into())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allowed)
    }

    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Outcome::Allowed => None,
            Outcome::Denied(reason) => Some(reason),
        }
    }
}

/// Opaque denial cause: a message, an error code, or a structured payload.
/// The library never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(Value);

impl Reason {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }
}

impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        Reason(value)
    }
}

impl From<&str> for Reason {
    fn from(value: &str) -> Self {
        Reason(Value::from(value))
    }
}

impl From<String> for Reason {
    fn from(value: String) -> Self {
        Reason(Value::from(value))
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(message) => f.write_str(message),
            other => write!(f, "{}", other),
        }
    }
}

/// Mode marker for decisions built around an expected grant ("can").
#[derive(Debug, Clone, Copy)]
pub struct ExpectAllowed;

/// Mode marker for decisions built around an expected denial ("cannot").
#[derive(Debug, Clone, Copy)]
pub struct ExpectDenied;

/// One-shot result of an authorization query.
///
/// A decision wraps the raw `Outcome` together with at most one branch
/// handler's return value. The mode marker decides which branch counts as
/// the primary one: in `ExpectAllowed` mode the primary branch fires on a
/// grant, in `ExpectDenied` mode on a denial. The alternate branch is
/// reached through [`or_else`](Decision::or_else).
///
/// The outcome is fixed at construction. Exactly one resolution call
/// (`run` or `or_else`) is permitted over a decision's lifetime; the call
/// spends the permission whether or not its handler fired, and a second
/// call fails with [`Error::AlreadyResolved`].
#[derive(Debug)]
pub struct Decision<M, V = ()> {
    outcome: Outcome,
    value: Option<V>,
    resolved: bool,
    mode: PhantomData<M>,
}

impl<M, V> Decision<M, V> {
    fn from_parts(outcome: Outcome, value: Option<V>) -> Self {
        Self {
            outcome,
            value,
            resolved: false,
            mode: PhantomData,
        }
    }

    /// Spends the single permitted resolution.
    fn consume(mut self) -> Result<Self> {
        if self.resolved {
            return Err(Error::AlreadyResolved);
        }
        self.resolved = true;
        Ok(self)
    }

    pub fn allowed(&self) -> bool {
        self.outcome.is_allowed()
    }

    pub fn reason(&self) -> Option<&Reason> {
        self.outcome.reason()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Return value of whichever branch handler executed, if any.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }
}

impl<V> Decision<ExpectAllowed, V> {
    /// Wraps an outcome expecting a grant.
    pub fn expect_allowed(outcome: Outcome) -> Self {
        Self::from_parts(outcome, None)
    }

    /// Wraps an outcome expecting a grant; `on_allowed` runs immediately
    /// iff the outcome is a grant. Construction does not spend the
    /// resolution, so a later `or_else` still covers the denial branch.
    pub fn expect_allowed_then<F>(outcome: Outcome, on_allowed: F) -> Self
    where
        F: FnOnce() -> V,
    {
        let value = if outcome.is_allowed() {
            Some(on_allowed())
        } else {
            None
        };
        Self::from_parts(outcome, value)
    }

    /// Alternate branch: fires with the reason iff the outcome was a
    /// denial. No-op on a grant, but still spends the resolution.
    pub fn or_else<F>(self, on_denied: F) -> Result<Self>
    where
        F: FnOnce(&Reason) -> V,
    {
        let mut decision = self.consume()?;
        if let Outcome::Denied(reason) = &decision.outcome {
            decision.value = Some(on_denied(reason));
        }
        Ok(decision)
    }

    /// Primary branch: fires iff the outcome was a grant. Same once-only
    /// contract as `or_else`.
    pub fn run<F>(self, on_allowed: F) -> Result<Self>
    where
        F: FnOnce() -> V,
    {
        let mut decision = self.consume()?;
        if decision.outcome.is_allowed() {
            decision.value = Some(on_allowed());
        }
        Ok(decision)
    }
}

impl<V> Decision<ExpectDenied, V> {
    /// Wraps an outcome expecting a denial.
    pub fn expect_denied(outcome: Outcome) -> Self {
        Self::from_parts(outcome, None)
    }

    /// Wraps an outcome expecting a denial; `on_denied` runs immediately
    /// with the reason iff the outcome is a denial.
    pub fn expect_denied_then<F>(outcome: Outcome, on_denied: F) -> Self
    where
        F: FnOnce(&Reason) -> V,
    {
        let value = match &outcome {
            Outcome::Denied(reason) => Some(on_denied(reason)),
            Outcome::Allowed => None,
        };
        Self::from_parts(outcome, value)
    }

    /// Alternate branch: fires iff the outcome was, against expectation, a
    /// grant.
    pub fn or_else<F>(self, on_allowed: F) -> Result<Self>
    where
        F: FnOnce() -> V,
    {
        let mut decision = self.consume()?;
        if decision.outcome.is_allowed() {
            decision.value = Some(on_allowed());
        }
        Ok(decision)
    }

    /// Primary branch: fires with the reason iff the outcome was a denial.
    pub fn run<F>(self, on_denied: F) -> Result<Self>
    where
        F: FnOnce(&Reason) -> V,
    {
        let mut decision = self.consume()?;
        if let Outcome::Denied(reason) = &decision.outcome {
            decision.value = Some(on_denied(reason));
        }
        Ok(decision)
    }
}
