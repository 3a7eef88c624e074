//! # Vend Replay Tool
//!
//! Loads a machine from its config and replays buyer actions against it.
//!
//! ## Usage
//! ```bash
//! # Buy a coke with a $5 coin and get change
//! cargo run -p vend-machine --bin vend -- insert:500 buy:coke
//!
//! # Use a specific config file
//! cargo run -p vend-machine --bin vend -- --config ./machine.toml insert:200 buy:water
//!
//! # Print the effective configuration
//! cargo run -p vend-machine --bin vend -- --print-config
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use vend_machine::{
    init_tracing, replay, Machine, MachineConfig, MachineError, MachineResult, Step,
};

/// What the command line asked for.
#[derive(Debug, Default)]
struct Options {
    config_path: Option<PathBuf>,
    print_config: bool,
    help: bool,
    steps: Vec<Step>,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args).and_then(run) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parses everything after the program name.
fn parse_args(args: &[String]) -> MachineResult<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--config" | "-c") => {
                let path = args.get(i + 1).ok_or_else(|| MachineError::MissingArgument {
                    flag: flag.to_string(),
                })?;
                options.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--print-config" => options.print_config = true,
            "--help" | "-h" => options.help = true,
            step => options.steps.push(step.parse::<Step>()?),
        }
        i += 1;
    }

    Ok(options)
}

fn run(options: Options) -> MachineResult<ExitCode> {
    if options.help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    let config = MachineConfig::load(options.config_path)?;

    if options.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    let machine = Machine::from_config(&config)?;

    println!("Machine: {}", machine.name());
    println!("Float:   {}", machine.coins().total_value());
    machine.catalog().with_catalog(|catalog| {
        for (_, product) in catalog.iter() {
            println!(
                "  {:<20} {:>8}  x{}",
                product.name(),
                product.price().to_string(),
                product.stock()
            );
        }
    });
    println!();

    let outcomes = replay(&machine, &options.steps);
    for (step, outcome) in args_of(&options.steps).zip(&outcomes) {
        println!("{:<16} {}", step, outcome);
    }

    if outcomes.iter().any(|o| o.is_refused()) {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn args_of(steps: &[Step]) -> impl Iterator<Item = String> + '_ {
    steps.iter().map(|step| match step {
        Step::Insert(coin) => format!("insert:{}", coin.cents()),
        Step::Buy(name) => format!("buy:{}", name),
        Step::Cancel => "cancel".to_string(),
    })
}

fn print_help() {
    println!("Vend Replay Tool");
    println!();
    println!("Usage: vend [OPTIONS] [STEPS...]");
    println!();
    println!("Steps:");
    println!("  insert:<cents>       Insert one coin, e.g. insert:500");
    println!("  buy:<name>           Withdraw a product by name");
    println!("  cancel               Return the deposit as coins");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: $VEND_CONFIG or the platform config dir)");
    println!("      --print-config   Print the effective configuration and exit");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Exit status is 2 if any step was refused.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use vend_core::Money;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_config_and_steps() {
        let options = parse_args(&args(&["-c", "lobby.toml", "insert:500", "buy:coke"])).unwrap();

        assert_eq!(options.config_path, Some(PathBuf::from("lobby.toml")));
        assert_eq!(
            options.steps,
            vec![Step::Insert(Money::from_cents(500)), Step::Buy("coke".into())]
        );
        assert!(!options.print_config);
    }

    #[test]
    fn test_trailing_config_flag_is_an_error() {
        for flag in ["--config", "-c"] {
            let err = parse_args(&args(&["insert:500", flag])).unwrap_err();
            assert!(
                matches!(&err, MachineError::MissingArgument { flag: f } if f == flag),
                "{} should need a value",
                flag
            );
        }
    }

    #[test]
    fn test_bad_step_is_an_error() {
        let err = parse_args(&args(&["insert:five"])).unwrap_err();
        assert!(matches!(err, MachineError::InvalidStep { .. }));
    }

    #[test]
    fn test_flags() {
        let options = parse_args(&args(&["--print-config", "--help"])).unwrap();
        assert!(options.print_config);
        assert!(options.help);
        assert!(options.steps.is_empty());
    }
}
