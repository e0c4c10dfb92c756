use canny::{ActionRegistry, Args, Authorizer, Error, Outcome, Result};
use serde_json::Value;

fn main() -> Result<()> {
    // The first positional argument is the acting subject, prepended to
    // every call by the authorizer's defaults.
    let vault = ActionRegistry::new().register("open", |args: &Args| {
        match args.positional().first().and_then(Value::as_str) {
            Some("alice") => Outcome::Allowed,
            _ => Outcome::denied("unknown subject"),
        }
    });

    let authorizer =
        Authorizer::with_defaults(Args::new().with_positional("alice").with_named("tenant", "acme"))
            .with_validator(|defaults: &Args| {
                if defaults.named("tenant").is_some() {
                    Outcome::Allowed
                } else {
                    Outcome::denied("tenant must be set")
                }
            });

    // Strict form: a grant returns unit, a denial raises Unauthorized.
    authorizer.authorize("open", &vault, &Args::new())?;
    println!("vault opened");

    let stranger = Authorizer::with_defaults(Args::new().with_positional("mallory"));
    if let Err(Error::Unauthorized(denial)) = stranger.authorize("open", &vault, &Args::new()) {
        println!("denied `{}`: {}", denial.action(), denial.reason());
    }

    Ok(())
}
