//! MechTrack CLI - Main entry point for CLI binary
//!
//! This binary provides the `mechtrack-access` tool for checking access
//! decisions and inspecting a project's route table.

use mechtrack_lib::engine::{
    cli::{
        formatter::{format_list, CliFormatter},
        Cli, Commands, OutputFormat,
    },
    config::Config,
    guard::RouteTable,
    rbac::{
        can_write, equivalence_closure, equivalence_table, evaluate, is_read_only,
        positions_equivalent_to, resolve_equivalent, AccessPolicy, Position, Subject,
    },
};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run_cli(cli) {
        CliFormatter::error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mechtrack_lib=debug" } else { "mechtrack_lib=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let project_dir = cli.get_project_dir();
    let json_output = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Init { name, force } => {
            cmd_init(&project_dir, name.as_deref(), force, json_output)?;
        }
        Commands::Check { role, posisi, roles, positions } => {
            cmd_check(&role, &posisi, roles, positions, json_output)?;
        }
        Commands::Resolve { posisi } => {
            cmd_resolve(&posisi, json_output)?;
        }
        Commands::Equivalents => {
            cmd_equivalents(json_output)?;
        }
        Commands::ReadOnly { role, posisi } => {
            cmd_read_only(&role, &posisi, json_output)?;
        }
        Commands::Guard { path, role, posisi } => {
            cmd_guard(&project_dir, &path, &role, &posisi, json_output)?;
        }
        Commands::Routes => {
            cmd_routes(&project_dir, json_output)?;
        }
    }

    Ok(())
}

fn cmd_init(project_dir: &Path, name: Option<&str>, force: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(project_dir)?;

    let config = match name {
        Some(name) => Config::default_for_project(name),
        None => Config::load_or_default(project_dir)?,
    };
    let config_path = project_dir.join(mechtrack_lib::engine::config::CONFIG_FILE);
    let routes_path = config.routes_path(project_dir);

    if !force && (config_path.exists() || routes_path.exists()) {
        return Err(format!(
            "Access files already exist in {} (use --force to overwrite)",
            project_dir.display()
        )
        .into());
    }

    config.save(project_dir)?;
    RouteTable::default_table().save(&routes_path)?;

    if json {
        println!("{}", serde_json::json!({
            "success": true,
            "config": config_path.display().to_string(),
            "routes": routes_path.display().to_string(),
        }));
    } else {
        CliFormatter::success(&format!("Initialized access control for {}", config.project.name));
        CliFormatter::kv("config", &config_path.display().to_string());
        CliFormatter::kv("routes", &routes_path.display().to_string());
    }

    Ok(())
}

fn cmd_check(
    role: &str,
    posisi: &str,
    roles: Option<Vec<String>>,
    positions: Option<Vec<String>>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let roles: Option<Vec<&str>> = roles.as_ref().map(|r| r.iter().map(String::as_str).collect());
    let positions: Option<Vec<&str>> = positions.as_ref().map(|p| p.iter().map(String::as_str).collect());

    let policy = AccessPolicy::from_raw(roles.as_deref(), positions.as_deref());
    let subject = Subject::from_raw(role, posisi);
    let admission = evaluate(&subject, &policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "role": role,
            "posisi": posisi,
            "allowed": admission.is_some(),
            "admission": admission,
            "policy": policy,
        }))?);
    } else {
        CliFormatter::header("Access check");
        CliFormatter::kv("subject", &format!("{} / {}", role, posisi));
        CliFormatter::kv("allowed roles", &format_list(policy.allowed_roles.as_ref()));
        CliFormatter::kv("allowed positions", &format_list(policy.allowed_positions.as_ref()));
        CliFormatter::blank();
        match admission {
            Some(admission) => CliFormatter::verdict(true, &admission.to_string()),
            None => CliFormatter::verdict(false, ""),
        }
    }

    Ok(())
}

fn cmd_resolve(posisi: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let position: Position = posisi.parse()?;
    let equivalent = resolve_equivalent(position);
    let closure = equivalence_closure(position);
    let covered = positions_equivalent_to(position.into());

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "posisi": position,
            "equivalent": equivalent,
            "closure": closure,
            "covers": covered,
        }))?);
    } else {
        CliFormatter::header(&format!("Position {}", position));
        CliFormatter::kv("treated as", &equivalent.to_string());
        CliFormatter::kv("closure", &format_list(Some(&closure)));
        CliFormatter::kv("covers", &format_list(Some(&covered)));
    }

    Ok(())
}

fn cmd_equivalents(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = equivalence_table();

    if json {
        let rows: Vec<_> = table
            .iter()
            .map(|(position, equivalent)| serde_json::json!({ "posisi": position, "equivalent": equivalent }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        CliFormatter::header("Position equivalence");
        CliFormatter::table_header(&["POSISI", "TREATED AS"]);
        for (position, equivalent) in &table {
            CliFormatter::table_row(&[position.as_str(), &equivalent.to_string()]);
        }
        CliFormatter::blank();
        CliFormatter::info("Positions not listed are treated as themselves");
    }

    Ok(())
}

fn cmd_read_only(role: &str, posisi: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let subject = Subject::from_raw(role, posisi);
    let read_only = is_read_only(&subject);

    if json {
        println!("{}", serde_json::json!({
            "role": role,
            "posisi": posisi,
            "read_only": read_only,
            "can_write": can_write(&subject),
        }));
    } else if read_only {
        CliFormatter::warning(&format!("{} / {} is read-only", role, posisi));
    } else {
        CliFormatter::success(&format!("{} / {} can write", role, posisi));
    }

    Ok(())
}

fn cmd_guard(project_dir: &Path, path: &str, role: &str, posisi: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let guard = mechtrack_lib::load_guard(project_dir)?;
    let subject = Subject::from_raw(role, posisi);
    let outcome = guard.check(path, &subject);
    let rule = guard.table().lookup(path);

    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({
            "path": path,
            "rule": rule.map(|r| r.path.as_str()),
            "result": outcome,
        }))?);
    } else {
        CliFormatter::header(&format!("Route {}", path));
        CliFormatter::kv("rule", rule.map(|r| r.path.as_str()).unwrap_or("(none, unrestricted)"));
        CliFormatter::kv("subject", &format!("{} / {}", role, posisi));
        CliFormatter::blank();
        match outcome {
            mechtrack_lib::engine::GuardOutcome::Admit => CliFormatter::success("admitted"),
            mechtrack_lib::engine::GuardOutcome::Redirect { to } => {
                CliFormatter::warning(&format!("redirected to {}", to))
            }
        }
    }

    Ok(())
}

fn cmd_routes(project_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let guard = mechtrack_lib::load_guard(project_dir)?;
    let table = guard.table();

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    CliFormatter::header("Protected routes");
    CliFormatter::kv("landing page", &table.landing_page);
    CliFormatter::blank();
    CliFormatter::table_header(&["PATH", "ROLES", "POSITIONS", "WRITE"]);
    for rule in &table.routes {
        CliFormatter::table_row(&[
            &rule.path,
            &format_list(rule.policy.allowed_roles.as_ref()),
            &format_list(rule.policy.allowed_positions.as_ref()),
            if rule.write { "yes" } else { "no" },
        ]);
    }

    Ok(())
}
