//! Command line driver for the employee service.
//!
//! # Responsibility
//! - Map subcommands onto `EmployeeService` operations.
//! - Print transfer objects as JSON on stdout and failures on stderr.
//!
//! # Exit codes
//! - `0` success, `1` any failure, `2` employee not found.

use clap::{Args, Parser, Subcommand};
use employee_core::db::{open_db, open_db_in_memory};
use employee_core::{
    core_version, default_log_level, init_logging, parse_log_level, ping, EmployeeDto,
    EmployeeId, EmployeeService, EmployeeServiceError, SqliteEmployeeRepository,
};
use log::error;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;

/// Manage employee records in a SQLite store.
#[derive(Parser, Debug)]
#[command(name = "employee_cli", version, about, long_about = None)]
struct Cli {
    /// SQLite database file; an in-memory store is used when omitted
    #[arg(long, global = true, env = "EMPLOYEE_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); only takes effect with --log-dir
    #[arg(long, global = true, env = "EMPLOYEE_LOG_LEVEL", value_parser = log_level_arg)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true, env = "EMPLOYEE_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one employee
    Get { id: EmployeeId },
    /// Create an employee and print it with its assigned id
    Create(EmployeeFields),
    /// Replace name, email and salary of an employee
    Update {
        id: EmployeeId,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee
    Delete { id: EmployeeId },
    /// Check core linkage
    Ping,
}

#[derive(Args, Debug)]
struct EmployeeFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    salary: f64,
}

impl From<EmployeeFields> for EmployeeDto {
    fn from(value: EmployeeFields) -> Self {
        EmployeeDto::new(value.name, value.email, value.salary)
    }
}

fn log_level_arg(value: &str) -> Result<String, String> {
    parse_log_level(value).map(str::to_string)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let status = exit_status(err.as_ref());
            if status != EXIT_NOT_FOUND {
                error!("event=cli_command module=cli status=error error={err}");
            }
            ExitCode::from(status)
        }
    }
}

/// Process exit status for a failed command.
fn exit_status(err: &(dyn Error + 'static)) -> u8 {
    match err.downcast_ref::<EmployeeServiceError>() {
        Some(service_err) if service_err.is_not_found() => EXIT_NOT_FOUND,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    if let Command::Ping = cli.command {
        writeln!(out, "employee_core ping={}", ping())?;
        writeln!(out, "employee_core version={}", core_version())?;
        return Ok(());
    }

    let conn = match cli.db_path.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn)?);

    match cli.command {
        Command::Get { id } => write_json(out, &service.get_employee_by_id(id)?),
        Command::Create(fields) => write_json(out, &service.create_new_employee(fields.into())?),
        Command::Update { id, fields } => {
            write_json(out, &service.update_employee(id, fields.into())?)
        }
        Command::Delete { id } => {
            service.delete_employee(id)?;
            writeln!(out, "deleted employee {id}")?;
            Ok(())
        }
        Command::Ping => Ok(()),
    }
}

fn write_json(out: &mut impl Write, dto: &EmployeeDto) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", serde_json::to_string_pretty(dto)?)?;
    Ok(())
}
