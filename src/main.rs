use chrono::Utc;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colored::*;
use std::error::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mercure_token::helpers::{print_error, print_output};
use mercure_token::types::Output;
use mercure_token::{Clock, Expiry, FixedClock, IssuerConfig, Role, TokenIssuer, TokenVerifier};

fn main() {
    if let Err(e) = run() {
        print_error(e.as_ref());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for the token
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let role_arg = Arg::with_name("role")
        .help("Token role: publisher or subscriber")
        .required(true)
        .index(1);
    let topic_arg = Arg::with_name("topic")
        .help("Topic to grant (overrides MERCURE_TOPIC)")
        .short("t")
        .long("topic")
        .takes_value(true);

    let matches = App::new("Mercure Token Issuer")
        .version("1.0")
        .about("Issues and checks HS256 tokens for a Mercure hub")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("issue")
                .about("Sign a publisher or subscriber token")
                .arg(role_arg.clone())
                .arg(topic_arg.clone())
                .arg(
                    Arg::with_name("ttl")
                        .help("Token lifetime in seconds")
                        .long("ttl")
                        .takes_value(true)
                        .conflicts_with("exp"),
                )
                .arg(
                    Arg::with_name("exp")
                        .help("Absolute expiry as a Unix timestamp")
                        .long("exp")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("format")
                        .help("The output format (text, json)")
                        .short("f")
                        .long("format")
                        .takes_value(true)
                        .possible_values(&["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Check a token against the secret of a role")
                .arg(role_arg)
                .arg(
                    Arg::with_name("token")
                        .help("The JWT token to verify")
                        .required(true)
                        .index(2),
                )
                .arg(topic_arg.help("Also check that the token authorizes this topic")),
        )
        .get_matches();

    let config = IssuerConfig::from_env();

    match matches.subcommand() {
        ("issue", Some(args)) => issue(config, args),
        ("verify", Some(args)) => verify(config, args),
        _ => Ok(()),
    }
}

fn issue(mut config: IssuerConfig, args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let role: Role = args.value_of("role").unwrap_or_default().parse()?;
    if let Some(topic) = args.value_of("topic") {
        config = config.with_topic(topic);
    }

    let expiry = match (args.value_of("ttl"), args.value_of("exp")) {
        (Some(ttl), _) => Some(Expiry::from_secs(ttl.parse()?)),
        (None, Some(exp)) => Some(Expiry::At(exp.parse()?)),
        (None, None) => None,
    };

    // One clock reading shared by the token and the reported expiry
    let issuer = TokenIssuer::with_clock(config, FixedClock::new(Utc::now()));
    let token = issuer.issue(role, expiry)?;
    info!(%role, "token issued");

    let output = Output {
        role,
        topic: issuer.config().topic().unwrap_or_default().to_string(),
        exp: expiry.map(|e| e.resolve(issuer.clock().now())),
        token: token.into_string(),
    };
    print_output(args.value_of("format").unwrap_or("text"), &output)?;

    Ok(())
}

fn verify(config: IssuerConfig, args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let role: Role = args.value_of("role").unwrap_or_default().parse()?;
    let token = args.value_of("token").unwrap_or_default();
    let verifier = TokenVerifier::new(config);

    let claims = verifier.verify(role, token)?;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    if let Some(topic) = args.value_of("topic") {
        if !claims.allows(role, topic) {
            return Err(format!("token does not allow {} on topic '{}'", role, topic).into());
        }
        eprintln!("{} {} allowed on {}", "[+]".green(), role, topic);
    }

    Ok(())
}
