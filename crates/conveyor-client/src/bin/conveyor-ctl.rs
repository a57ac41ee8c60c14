// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Conveyor Control CLI
//!
//! CLI tool for interacting with the Conveyor execution service.
//!
//! Usage:
//!   conveyor-ctl <command> [options]
//!
//! Commands:
//!   health                        Check service health
//!   start --machine <id> [--input <json>] [--name <name>]
//!   status <execution_id>
//!   wait <execution_id>           Poll until the execution concludes
//!   history <execution_id> [--max-results <n>] [--oldest-first]
//!   secret <secret_id>            Print a secret value
//!   param <name>                  Print a parameter value

use std::process::ExitCode;
use std::time::Duration;

use conveyor_client::{
    ConveyorClient, HistoryOptions, PollOptions, StartExecutionOptions,
};

fn print_usage() {
    eprintln!(
        r#"Usage: conveyor-ctl <command> [options]

Interact with the Conveyor execution service.

COMMANDS:
    health                          Check service health
    start                           Start an execution
    status <execution_id>           Get one execution status snapshot
    wait <execution_id>             Poll until the execution concludes
    history <execution_id>          Print execution events
    secret <secret_id>              Print a secret value
    param <name>                    Print a parameter value

START OPTIONS:
    --machine <id>                  State machine ID (required)
    --input <json>                  Input payload as JSON
    --name <name>                   Execution name (generated if omitted)

WAIT OPTIONS:
    --timeout <secs>                Wall-clock budget (default 300)
    --max-attempts <n>              Status check budget (default unlimited)

HISTORY OPTIONS:
    --max-results <n>               Events to fetch (default 5)
    --oldest-first                  Oldest events first (default newest first)

ENVIRONMENT:
    CONVEYOR_ENDPOINT               Base API URL (default http://127.0.0.1:8002)
    CONVEYOR_TOKEN                  Bearer token

EXAMPLES:
    # Check service health
    conveyor-ctl health

    # Start an execution with input
    conveyor-ctl start --machine machine-orders --input '{{"order_id": 42}}'

    # Wait for conclusion and print the final snapshot
    conveyor-ctl wait exec_456 --timeout 600
"#
    );
}

#[derive(Debug)]
enum Command {
    Health,
    Start {
        state_machine_id: String,
        input: Option<String>,
        name: Option<String>,
    },
    Status {
        execution_id: String,
    },
    Wait {
        execution_id: String,
        timeout_secs: u64,
        max_attempts: Option<u32>,
    },
    History {
        execution_id: String,
        max_results: u32,
        oldest_first: bool,
    },
    Secret {
        secret_id: String,
    },
    Param {
        name: String,
    },
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from_vec(&args)
}

fn parse_args_from_vec(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            std::process::exit(0);
        }
        "health" => Ok(Command::Health),
        "start" => {
            let mut state_machine_id: Option<String> = None;
            let mut input: Option<String> = None;
            let mut name: Option<String> = None;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--machine" => {
                        i += 1;
                        state_machine_id =
                            Some(args.get(i).ok_or("--machine requires an ID")?.clone());
                    }
                    "--input" => {
                        i += 1;
                        input = Some(args.get(i).ok_or("--input requires a value")?.clone());
                    }
                    "--name" => {
                        i += 1;
                        name = Some(args.get(i).ok_or("--name requires a value")?.clone());
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Start {
                state_machine_id: state_machine_id.ok_or("--machine is required")?,
                input,
                name,
            })
        }
        "status" => {
            let execution_id = args.get(2).ok_or("Execution ID required")?.clone();
            Ok(Command::Status { execution_id })
        }
        "wait" => {
            let execution_id = args.get(2).ok_or("Execution ID required")?.clone();
            let mut timeout_secs: u64 = 300;
            let mut max_attempts: Option<u32> = None;

            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--timeout" => {
                        i += 1;
                        timeout_secs = args
                            .get(i)
                            .ok_or("--timeout requires seconds")?
                            .parse()
                            .map_err(|_| "Invalid timeout")?;
                    }
                    "--max-attempts" => {
                        i += 1;
                        max_attempts = Some(
                            args.get(i)
                                .ok_or("--max-attempts requires a number")?
                                .parse()
                                .map_err(|_| "Invalid max-attempts")?,
                        );
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::Wait {
                execution_id,
                timeout_secs,
                max_attempts,
            })
        }
        "history" => {
            let execution_id = args.get(2).ok_or("Execution ID required")?.clone();
            let mut max_results: u32 = 5;
            let mut oldest_first = false;

            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--max-results" => {
                        i += 1;
                        max_results = args
                            .get(i)
                            .ok_or("--max-results requires a number")?
                            .parse()
                            .map_err(|_| "Invalid max-results")?;
                    }
                    "--oldest-first" => {
                        oldest_first = true;
                    }
                    arg => return Err(format!("Unknown argument: {}", arg)),
                }
                i += 1;
            }

            Ok(Command::History {
                execution_id,
                max_results,
                oldest_first,
            })
        }
        "secret" => {
            let secret_id = args.get(2).ok_or("Secret ID required")?.clone();
            Ok(Command::Secret { secret_id })
        }
        "param" => {
            let name = args.get(2).ok_or("Parameter name required")?.clone();
            Ok(Command::Param { name })
        }
        cmd => Err(format!("Unknown command: {}", cmd)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = match parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'conveyor-ctl help' for usage.");
            return ExitCode::FAILURE;
        }
    };

    let client = match ConveyorClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute_command(&client, cmd).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute_command(client: &ConveyorClient, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Health => {
            let health = client.health_check().await.map_err(|e| e.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&health).map_err(|e| e.to_string())?
            );
        }

        Command::Start {
            state_machine_id,
            input,
            name,
        } => {
            let mut options = StartExecutionOptions::new(&state_machine_id);

            if let Some(input_json) = input {
                let input_value: serde_json::Value = serde_json::from_str(&input_json)
                    .map_err(|e| format!("Invalid input JSON: {}", e))?;
                options = options.with_input(input_value);
            }

            if let Some(name) = name {
                options = options.with_name(name);
            }

            let execution_id = client
                .start_execution(options)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", execution_id);
        }

        Command::Status { execution_id } => {
            let snapshot = client
                .describe_execution(&execution_id)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?
            );
        }

        Command::Wait {
            execution_id,
            timeout_secs,
            max_attempts,
        } => {
            let mut options =
                PollOptions::new().with_timeout(Duration::from_secs(timeout_secs));
            if let Some(max_attempts) = max_attempts {
                options = options.with_max_attempts(max_attempts);
            }

            let snapshot = client
                .poll_execution(&execution_id, options)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?
            );
        }

        Command::History {
            execution_id,
            max_results,
            oldest_first,
        } => {
            let options = HistoryOptions::new()
                .with_max_results(max_results)
                .with_newest_first(!oldest_first);

            let events = client
                .execution_history(&execution_id, options)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&events).map_err(|e| e.to_string())?
            );
        }

        Command::Secret { secret_id } => {
            let value = client
                .get_secret_value(&secret_id)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", value);
        }

        Command::Param { name } => {
            let value = client
                .get_parameter(&name)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", value);
        }
    }

    Ok(())
}
