use canny::{ActionRegistry, Args, Authorizer, Outcome, Result};
use serde_json::Value;

fn main() -> Result<()> {
    // Per-action checks live on the receiver.
    let articles = ActionRegistry::new()
        .register("read", |_: &Args| Outcome::Allowed)
        .register("publish", |args: &Args| {
            match args.named("role").and_then(Value::as_str) {
                Some("editor") => Outcome::Allowed,
                _ => Outcome::denied("only editors may publish"),
            }
        });

    let authorizer = Authorizer::new();

    // Success-oriented flow: the grant handler runs immediately, the
    // denial branch is covered by or_else.
    let call = Args::new().with_named("role", "viewer");
    let decision = authorizer
        .can_then("publish", &articles, &call, || "published".to_string())?
        .or_else(|reason| format!("denied: {}", reason))?;

    println!("{}", decision.into_value().unwrap_or_default());

    Ok(())
}
