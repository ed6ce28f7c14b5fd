use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use carta_access::access::policy::RoutePolicy;
use carta_access::{evaluate, AccessRequest, Decision, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_POLICY_PATH: &str = "policy/default.toml";
const USAGE: &str = "usage: carta-access <ROLE|-> <PATH>";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("carta_access=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// `-` means no session role.
fn session_for(token: &str) -> Session {
    if token == "-" {
        Session::anonymous()
    } else {
        Session::new("cli", token)
    }
}

fn run(role: &str, path: &str) -> anyhow::Result<bool> {
    let policy_path = std::env::var("CARTA_POLICY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_POLICY_PATH));

    let policy = RoutePolicy::load(&policy_path)
        .with_context(|| format!("loading route policy from {}", policy_path.display()))?;

    let (_, decision) = evaluate(AccessRequest::new(session_for(role), path), &policy);
    match decision {
        Decision::Allow(_) => {
            println!("allow");
            Ok(true)
        }
        Decision::Deny { required: Some(required) } => {
            println!("deny (requires {required})");
            Ok(false)
        }
        Decision::Deny { required: None } => {
            println!("deny (malformed path)");
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [role, path] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(role, path) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
