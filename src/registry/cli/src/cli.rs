use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use stakepool_registry::validation::check_all;
use stakepool_registry::{
    AddressError, RegistryError, RegistryOptions, TenantConfig, TenantRegistry, ValidationPolicy,
};
use thiserror::Error;

use crate::output::{OutputFormat, render_tenant, render_tenants};

/// Errors reported by a CLI invocation
#[derive(Debug, Error)]
pub enum CommandError {
    /// The registry file could not be loaded
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A supplied pool address is malformed
    #[error(transparent)]
    Address(#[from] AddressError),
    /// No tenant matches the query
    #[error("No tenant matches '{0}'")]
    NotFound(String),
    /// Result could not be rendered
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
    /// `check --strict` found legacy entries; `summary` is the full report
    #[error("{count} validation finding(s)")]
    Findings {
        /// Number of findings
        count: usize,
        /// The report `check` would have printed
        summary: String,
    },
    /// The parser accepted a subcommand that has no handler
    #[error("Unsupported command '{0}'")]
    UnknownCommand(String),
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn found<'a>(
    tenant: Option<&'a TenantConfig>,
    query: &str,
) -> Result<&'a TenantConfig, CommandError> {
    tenant.ok_or_else(|| CommandError::NotFound(query.to_string()))
}

fn check(registry: &TenantRegistry, strict: bool) -> Result<String, CommandError> {
    let findings = check_all(registry.list_all());
    let mut out = String::new();
    for finding in &findings {
        out.push_str(&format!("warning: {finding}\n"));
    }
    out.push_str(&format!("tenants: {}\n", registry.len()));
    out.push_str(&format!("visible: {}\n", registry.list_visible().len()));
    out.push_str(&format!("fingerprint: {}\n", registry.fingerprint()));

    if strict && !findings.is_empty() {
        return Err(CommandError::Findings {
            count: findings.len(),
            summary: out,
        });
    }
    Ok(out)
}

fn run(matches: &ArgMatches) -> Result<String, CommandError> {
    let path = required(matches, "registry");
    let format = OutputFormat::parse(required(matches, "output")).unwrap_or(OutputFormat::Text);
    let strict = matches.get_flag("strict");

    let Some((subcommand, args)) = matches.subcommand() else {
        return Ok(String::new());
    };

    // `check` reports legacy findings itself instead of failing the load on them
    let options = RegistryOptions {
        validation: if strict && subcommand != "check" {
            ValidationPolicy::Reject
        } else {
            ValidationPolicy::Warn
        },
    };
    let registry = TenantRegistry::load(path, &options)?;

    let rendered = match subcommand {
        "name" => {
            let name = required(args, "name");
            let tenant = if args.get_flag("ignore-case") {
                registry.find_by_name_ignore_case(name)
            } else {
                registry.find_by_name(name)
            };
            render_tenant(found(tenant, name)?, format)?
        }
        "address" => {
            let address = required(args, "address");
            let tenant = registry.find_by_address_str(address)?;
            render_tenant(found(tenant, address)?, format)?
        }
        "hostname" => {
            let hostname = required(args, "hostname");
            let tenant = registry.find_by_hostname(hostname);
            render_tenant(found(tenant, hostname)?, format)?
        }
        "resolve" => {
            let identifier = required(args, "identifier");
            let tenant = registry.resolve(identifier);
            render_tenant(found(tenant, identifier)?, format)?
        }
        "list" => {
            let tenants: Vec<&TenantConfig> = if args.get_flag("all") {
                registry.iter().collect()
            } else {
                registry.list_visible()
            };
            render_tenants(&tenants, format)?
        }
        "links" => {
            let name = required(args, "name");
            found(registry.find_by_name(name), name)?;
            render_tenants(&registry.linked_tenants(name), format)?
        }
        "check" => check(&registry, strict)?,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(rendered)
}

/// app cli
pub struct Cli;
impl Cli {
    /// Builds the argument parser
    #[must_use]
    pub fn command() -> Command {
        let query = |name: &'static str, value_name: &'static str, help: &'static str| {
            Arg::new(name).value_name(value_name).help(help).required(true)
        };

        Command::new("stakepool-registry")
            .version("1.0")
            .about("Looks up stake pool tenants in a registry file")
            .subcommand_required(true)
            .arg(
                Arg::new("registry")
                    .short('r')
                    .long("registry")
                    .value_name("PATH")
                    .help("Registry JSON file")
                    .required(true),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FORMAT")
                    .help("Output format")
                    .value_parser(["text", "json"])
                    .default_value("text"),
            )
            .arg(
                Arg::new("strict")
                    .long("strict")
                    .help("Treat legacy-entry findings as errors")
                    .action(ArgAction::SetTrue),
            )
            .subcommand(
                Command::new("name")
                    .about("Find a tenant by its name")
                    .arg(query("name", "NAME", "Tenant name (case-sensitive)"))
                    .arg(
                        Arg::new("ignore-case")
                            .short('i')
                            .long("ignore-case")
                            .help("Match the name ignoring ASCII case")
                            .action(ArgAction::SetTrue),
                    ),
            )
            .subcommand(
                Command::new("address")
                    .about("Find a tenant by its base58 pool address")
                    .arg(query("address", "ADDRESS", "Pool address")),
            )
            .subcommand(
                Command::new("hostname")
                    .about("Find a tenant by its hostname override")
                    .arg(query("hostname", "HOST", "Hostname")),
            )
            .subcommand(
                Command::new("resolve")
                    .about("Resolve a hostname or tenant name")
                    .arg(query("identifier", "IDENTIFIER", "Hostname or tenant name")),
            )
            .subcommand(
                Command::new("list")
                    .about("List visible tenants in registry order")
                    .arg(
                        Arg::new("all")
                            .short('a')
                            .long("all")
                            .help("Include hidden tenants")
                            .action(ArgAction::SetTrue),
                    ),
            )
            .subcommand(
                Command::new("links")
                    .about("List tenants referenced by a tenant's internal links")
                    .arg(query("name", "NAME", "Tenant name")),
            )
            .subcommand(Command::new("check").about("Validate the registry and print a summary"))
    }

    /// Executes the CLI application, parsing command line arguments and printing the result
    #[must_use]
    pub fn execute() -> ExitCode {
        let matches = Self::command().get_matches();

        match run(&matches) {
            Ok(rendered) => {
                println!("{}", rendered.trim_end());
                ExitCode::SUCCESS
            }
            Err(err) => {
                if let CommandError::Findings { summary, .. } = &err {
                    println!("{}", summary.trim_end());
                }
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path() -> String {
        stakepool_registry::test_utils::bundled_data_path()
            .display()
            .to_string()
    }

    fn run_args(args: &[&str]) -> Result<String, CommandError> {
        let path = data_path();
        let mut argv = vec!["stakepool-registry", "--registry", path.as_str()];
        argv.extend_from_slice(args);
        let matches = Cli::command()
            .try_get_matches_from(argv)
            .unwrap_or_else(|e| panic!("invalid test arguments: {e}"));
        run(&matches)
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_by_hostname_and_name() {
        let by_host = run_args(&["resolve", "stake.1space.me"]).unwrap_or_default();
        let by_name = run_args(&["resolve", "onespace"]).unwrap_or_default();
        assert!(by_host.starts_with("name: onespace\n"));
        assert_eq!(by_host, by_name);
    }

    #[test]
    fn test_name_lookup_case() {
        assert!(matches!(
            run_args(&["name", "orbit"]),
            Err(CommandError::NotFound(_))
        ));
        let found = run_args(&["name", "orbit", "--ignore-case"]).unwrap_or_default();
        assert!(found.starts_with("name: Orbit\n"));
    }

    #[test]
    fn test_invalid_address_is_reported() {
        assert!(matches!(
            run_args(&["address", "not-an-address"]),
            Err(CommandError::Address(_))
        ));
    }

    #[test]
    fn test_strict_load_fails_on_legacy_entries() {
        assert!(matches!(
            run_args(&["--strict", "name", "cardinal"]),
            Err(CommandError::Registry(RegistryError::Validation(_)))
        ));
    }

    #[test]
    fn test_check_summary() {
        let summary = run_args(&["check"]).unwrap_or_default();
        assert!(summary.contains("warning: 'AOM': name is not lower kebab-case\n"));
        assert!(summary.contains("tenants: 53\n"));
        assert!(summary.contains("visible: 51\n"));

        match run_args(&["--strict", "check"]) {
            Err(CommandError::Findings { count, summary }) => {
                assert_eq!(summary, run_args(&["check"]).unwrap_or_default());
                assert_eq!(summary.matches("warning: ").count(), count);
            }
            other => panic!("expected findings, got {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_without_handler_is_an_error() {
        let path = data_path();
        let matches = Cli::command()
            .subcommand(Command::new("stats"))
            .try_get_matches_from(["stakepool-registry", "--registry", path.as_str(), "stats"])
            .unwrap_or_else(|e| panic!("invalid test arguments: {e}"));
        match run(&matches) {
            Err(err @ CommandError::UnknownCommand(_)) => {
                assert_eq!(err.to_string(), "Unsupported command 'stats'");
            }
            other => panic!("expected unknown command error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommandError::NotFound("cardinal-x".to_string()).to_string(),
            "No tenant matches 'cardinal-x'"
        );
        let Err(address) = run_args(&["address", "AxHia"]) else {
            panic!("expected an address error");
        };
        assert!(address.to_string().starts_with("Invalid address length for 'AxHia'"));
    }
}
