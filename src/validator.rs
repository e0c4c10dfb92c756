use crate::authorizer::Args;
use crate::decision::Outcome;

/// Precondition over the authorizer's default context, run before every
/// query. Returns `Allowed` to pass, or a denial reason that fails the
/// whole query before the receiver is contacted.
///
/// Validators never see per-call arguments; they model global
/// preconditions independent of the specific action being checked.
pub trait Validator {
    fn validate(&self, defaults: &Args) -> Outcome;
}

impl<F> Validator for F
where
    F: Fn(&Args) -> Outcome,
{
    fn validate(&self, defaults: &Args) -> Outcome {
        (self)(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_validators() {
        let validator = |defaults: &Args| {
            if defaults.is_empty() {
                Outcome::denied("subject must be set")
            } else {
                Outcome::Allowed
            }
        };

        assert_eq!(
            validator.validate(&Args::new()),
            Outcome::denied("subject must be set")
        );
        assert_eq!(
            validator.validate(&Args::new().with_positional("subject")),
            Outcome::Allowed
        );
    }
}
