use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the terminal dashboard.
    Dashboard,
    /// Run the HTTP gateway in front of Jira.
    Serve { port: Option<u16> },
    Help,
}

const USAGE_HINT: &str = "Run `sprintdesk help` for usage.";

/// Parse everything after the program name.
///
/// Supported forms:
///   sprintdesk
///   sprintdesk serve
///   sprintdesk serve --port 4000
///   sprintdesk serve -p 4000
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Dashboard);
    };

    match first.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "serve" => parse_serve_args(&args[1..]),
        other => bail!("Unknown command: {other}\n{USAGE_HINT}"),
    }
}

fn parse_serve_args(args: &[String]) -> Result<Command> {
    let mut port = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--port" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    bail!("Missing value for --port\n{USAGE_HINT}");
                };
                port = Some(parse_port(value)?);
            }
            other => {
                if let Some(value) = other.strip_prefix("--port=") {
                    port = Some(parse_port(value)?);
                } else {
                    bail!("Unexpected argument: {other}\n{USAGE_HINT}");
                }
            }
        }
        i += 1;
    }

    Ok(Command::Serve { port })
}

fn parse_port(value: &str) -> Result<u16> {
    let port: u16 = value
        .parse()
        .with_context(|| format!("Invalid port: {value}"))?;
    if port == 0 {
        bail!("Invalid port: 0");
    }
    Ok(port)
}

pub fn print_help() {
    println!("sprintdesk — sprint dashboard for Jira\n");
    println!("USAGE:");
    println!("  sprintdesk                    Launch the terminal dashboard");
    println!("  sprintdesk serve [--port N]   Run the Jira gateway (default port 3000)");
    println!();
    println!("ENVIRONMENT:");
    println!("  JIRA_BASE_URL, JIRA_EMAIL, JIRA_API_TOKEN   Jira credentials (gateway)");
    println!("  PORT                                        Gateway listen port");
    println!("  SPRINTDESK_GATEWAY_URL                      Gateway URL used by the dashboard");
    println!("  RUST_LOG                                    Log filter");
    println!();
    println!("Settings can also live in ~/.sprintdesk/config.toml.");
}
