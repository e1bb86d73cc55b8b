use std::{env, fs, path::Path, process::ExitCode, time::Instant};

use fnarity::{ArgValues, DispatchConfig, NoopTracer, ResolveTracer, ResolvedRecord, StderrTracer};

const USAGE: &str = "usage: fnarity [--trace] <config.json> <args>...";

fn main() -> ExitCode {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let trace = match args.iter().position(|arg| arg == "--trace") {
        Some(index) => {
            args.remove(index);
            true
        }
        None => false,
    };
    let Some((config_path, calls)) = args.split_first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let text = match read_file(config_path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match DispatchConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error in {config_path}:\n{err}");
            return ExitCode::FAILURE;
        }
    };

    if trace {
        run(config, calls, StderrTracer::new())
    } else {
        run(config, calls, NoopTracer)
    }
}

/// Compiles the configuration and resolves each call, printing one record per line.
fn run(config: DispatchConfig, calls: &[String], mut tracer: impl ResolveTracer) -> ExitCode {
    let dispatcher = match config.compile_traced(|_: &(), record: ResolvedRecord| record, &mut tracer) {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            eprintln!("error:\n{err}");
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut failed = false;
    for call in calls {
        let args = match parse_args(call) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("{call}: {err}");
                failed = true;
                continue;
            }
        };
        match dispatcher.call_traced(&(), args, &mut tracer) {
            Ok(record) => println!("{call} -> {}", record.to_json()),
            Err(err) => {
                eprintln!("{call}: {err}");
                failed = true;
            }
        }
    }
    let elapsed = start.elapsed();
    eprintln!("resolved {} call(s) in {elapsed:?}", calls.len());

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Reads a call's arguments from a file if `call` names one, otherwise parses it as inline JSON.
fn parse_args(call: &str) -> Result<ArgValues, String> {
    let text = if Path::new(call).is_file() {
        read_file(call)?
    } else {
        call.to_owned()
    };
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|err| format!("invalid JSON: {err}"))?;
    ArgValues::from_json(value).ok_or_else(|| "arguments must be a JSON array".to_owned())
}

fn read_file(file_path: &str) -> Result<String, String> {
    match fs::metadata(file_path) {
        Ok(metadata) => {
            if !metadata.is_file() {
                return Err(format!("{file_path} is not a file"));
            }
        }
        Err(err) => {
            return Err(format!("reading {file_path}: {err}"));
        }
    }
    fs::read_to_string(file_path).map_err(|err| format!("reading {file_path}: {err}"))
}
