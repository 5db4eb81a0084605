//! # Circuit CLI
//!
//! Command-line front end for circuit_core: compute design currents, size
//! and check circuits, print the reference tables, and keep a register of
//! committed circuits in a JSON file.
//!
//! Every command accepts `--json` for machine-readable output. Diagnostics
//! go to stderr through `tracing` (`RUST_LOG`, or `-v`/`-vv`).

mod tables;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;

use circuit_core::calculations::design::{evaluate, CircuitInput, LoadSpec};
use circuit_core::calculations::is_positive;
use circuit_core::calculations::load_current::{design_current, is_valid_power_factor};
use circuit_core::errors::{CalcError, CalcResult};
use circuit_core::file_io::{load_or_create_register, load_settings, save_register, write_atomic};
use circuit_core::reference::{Characteristic, CircuitType, Conductor, InstallationMethod, Insulation, PhaseType};
use circuit_core::{Circuit, CircuitRegister, DesignSettings};

#[derive(Parser)]
#[command(name = "circuit_cli")]
#[command(about = "Low-voltage circuit sizing and protection checks", long_about = None)]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Design settings JSON file (voltages, default cos φ, voltage-drop method)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design current IB from active power
    Current {
        /// Active power (kW)
        #[arg(long)]
        power: f64,

        /// single or three
        #[arg(long, default_value = "single")]
        phase: PhaseType,

        /// Supply voltage (V); 230 single-phase, 400 three-phase by default
        #[arg(long)]
        voltage: Option<f64>,

        /// Power factor cos φ in (0, 1]
        #[arg(long)]
        pf: Option<f64>,
    },

    /// Size and check one circuit
    Check {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Exit with code 2 when any check fails
        #[arg(long)]
        fail_on_violation: bool,
    },

    /// Print reference tables
    Tables {
        #[arg(value_enum, default_value = "all")]
        table: tables::TableKind,
    },

    /// Manage a register file of committed circuits
    Register {
        /// Register file
        #[arg(short, long, value_name = "FILE", default_value = "circuits.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: RegisterAction,
    },
}

#[derive(Subcommand)]
enum RegisterAction {
    /// Evaluate a circuit and append it to the register
    Add {
        #[command(flatten)]
        circuit: CircuitArgs,
    },
    /// List committed circuits
    List,
    /// Remove a circuit by id
    Remove {
        id: String,
    },
    /// Remove every circuit
    Clear,
    /// Export the bare circuit list as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace the circuit list with one from a JSON file
    Import {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Circuit description shared by `check` and `register add`
#[derive(Args)]
struct CircuitArgs {
    /// Circuit name
    #[arg(long, default_value = "Circuit")]
    name: String,

    /// lighting, sockets, motor, wlz or other
    #[arg(long = "type", default_value = "sockets")]
    circuit_type: CircuitType,

    /// single or three
    #[arg(long, default_value = "single")]
    phase: PhaseType,

    /// Load as active power (kW)
    #[arg(long, conflicts_with = "current", required_unless_present = "current")]
    power: Option<f64>,

    /// Load as design current IB (A)
    #[arg(long)]
    current: Option<f64>,

    /// Power factor cos φ in (0, 1]
    #[arg(long)]
    pf: Option<f64>,

    /// MCB rated current In (A); selected when omitted
    #[arg(long = "in", value_name = "AMPS")]
    nominal_current: Option<f64>,

    /// MCB characteristic B, C or D
    #[arg(long, default_value = "B")]
    characteristic: Characteristic,

    /// Cross-section (mm²); selected when omitted
    #[arg(long, value_name = "MM2")]
    cross_section: Option<f64>,

    /// copper or aluminum
    #[arg(long, default_value = "copper")]
    material: Conductor,

    /// PVC or XLPE
    #[arg(long, default_value = "PVC")]
    insulation: Insulation,

    /// Installation method A1, A2, B1, B2, C, D or E
    #[arg(long, default_value = "C")]
    method: InstallationMethod,

    /// Ambient temperature (°C)
    #[arg(long, default_value_t = 30.0)]
    temperature: f64,

    /// Circuits in the bundle, including this one
    #[arg(long, default_value_t = 1)]
    bundle: u32,

    /// One-way cable length (m)
    #[arg(long)]
    length: Option<f64>,

    /// Measured fault-loop impedance (Ω)
    #[arg(long)]
    zs: Option<f64>,

    /// Source impedance at the origin of the circuit (Ω)
    #[arg(long)]
    zs_source: Option<f64>,

    /// Start from the typical cable and device for the circuit type
    #[arg(long)]
    suggest: bool,
}

impl CircuitArgs {
    fn to_input(&self) -> CircuitInput {
        let load = match (self.power, self.current) {
            (Some(kw), _) => LoadSpec::Power(kw),
            (None, Some(a)) => LoadSpec::Current(a),
            (None, None) => LoadSpec::Current(0.0),
        };

        let mut input = CircuitInput::new(self.name.clone(), load)
            .with_circuit_type(self.circuit_type)
            .with_phase(self.phase)
            .with_characteristic(self.characteristic)
            .with_material(self.material)
            .with_insulation(self.insulation)
            .with_installation_method(self.method)
            .with_ambient_temperature(self.temperature)
            .with_circuits_in_bundle(self.bundle);
        if self.suggest {
            input = input.with_type_suggestion();
        }

        input.power_factor = self.pf;
        input.length_m = self.length;
        input.zs_measured_ohm = self.zs;
        input.zs_source_ohm = self.zs_source;
        if let Some(i_n) = self.nominal_current {
            input.nominal_current_a = Some(i_n);
        }
        if let Some(s) = self.cross_section {
            input.cross_section_mm2 = Some(s);
        }
        input
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    println!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<ExitCode> {
    let settings_override = cli.settings.as_deref().map(load_settings).transpose()?;

    match &cli.command {
        Commands::Current {
            power,
            phase,
            voltage,
            pf,
        } => {
            let settings = settings_override.unwrap_or_default();
            handle_current(cli.json, &settings, *power, *phase, *voltage, *pf)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            circuit,
            fail_on_violation,
        } => {
            let settings = settings_override.unwrap_or_default();
            let passes = handle_check(cli.json, &settings, circuit)?;
            if *fail_on_violation && !passes {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tables { table } => {
            tables::print(*table, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Register { file, action } => {
            handle_register(cli.json, settings_override, file, action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[derive(Serialize)]
struct CurrentOutput {
    phase: PhaseType,
    power_kw: f64,
    voltage_v: f64,
    power_factor: f64,
    design_current_a: f64,
}

fn handle_current(
    json: bool,
    settings: &DesignSettings,
    power_kw: f64,
    phase: PhaseType,
    voltage: Option<f64>,
    pf: Option<f64>,
) -> CalcResult<()> {
    let voltage_v = voltage.unwrap_or_else(|| settings.supply_voltage(phase));
    let power_factor = pf.unwrap_or_else(|| settings.default_power_factor(phase));

    if !is_positive(power_kw) {
        return Err(CalcError::invalid_input("power", power_kw.to_string(), "Power must be positive"));
    }
    if !is_positive(voltage_v) {
        return Err(CalcError::invalid_input("voltage", voltage_v.to_string(), "Voltage must be positive"));
    }
    if !is_valid_power_factor(power_factor) {
        return Err(CalcError::invalid_input(
            "pf",
            power_factor.to_string(),
            "Power factor must lie in (0, 1]",
        ));
    }

    let output = CurrentOutput {
        phase,
        power_kw,
        voltage_v,
        power_factor,
        design_current_a: design_current(phase, power_kw, voltage_v, power_factor),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "IB = {:.2} A   ({} kW, {}, U = {} V, cos φ = {})",
            output.design_current_a, output.power_kw, output.phase, output.voltage_v, output.power_factor
        );
    }
    Ok(())
}

fn handle_check(json: bool, settings: &DesignSettings, args: &CircuitArgs) -> CalcResult<bool> {
    let input = args.to_input();
    input.validate()?;
    let evaluation = evaluate(&input, settings);

    if json {
        #[derive(Serialize)]
        struct CheckOutput<'a> {
            name: &'a str,
            passes: bool,
            failures: Vec<&'static str>,
            evaluation: &'a circuit_core::calculations::CircuitEvaluation,
        }
        let output = CheckOutput {
            name: &input.name,
            passes: evaluation.passes(),
            failures: evaluation.failures().iter().map(|f| f.description()).collect(),
            evaluation: &evaluation,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", input.name);
        println!("{}", evaluation.format_report());
    }
    Ok(evaluation.passes())
}

fn handle_register(
    json: bool,
    settings_override: Option<DesignSettings>,
    file: &Path,
    action: &RegisterAction,
) -> CalcResult<()> {
    let mut register = load_or_create_register(file)?;
    if let Some(settings) = settings_override {
        register.settings = settings;
    }

    match action {
        RegisterAction::Add { circuit } => {
            let input = circuit.to_input();
            input.validate()?;
            let evaluation = evaluate(&input, &register.settings);
            let record = Circuit::from_evaluation(&input, &evaluation)?;
            for failure in evaluation.failures() {
                tracing::warn!(circuit = %record.name, "{}", failure);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "Added {} ({}): {}, {} mm², Iz = {:.2} A{}",
                    record.name,
                    record.id,
                    record.device_label(),
                    record.cross_section_mm2,
                    record.iz,
                    if record.is_compliant() { "" } else { "   [non-compliant]" }
                );
            }
            register.add(record);
            save_register(&register, file)?;
        }
        RegisterAction::List => print_register(&register, json)?,
        RegisterAction::Remove { id } => {
            let removed = register
                .remove(id)
                .ok_or_else(|| CalcError::invalid_input("id", id.clone(), "No circuit with this id"))?;
            save_register(&register, file)?;
            if !json {
                println!("Removed {} ({})", removed.name, removed.id);
            } else {
                println!("{}", serde_json::to_string_pretty(&removed)?);
            }
        }
        RegisterAction::Clear => {
            let count = register.len();
            register.clear();
            save_register(&register, file)?;
            if !json {
                println!("Removed {} circuit(s)", count);
            }
        }
        RegisterAction::Export { output } => {
            let exported = register.export_circuits_json()?;
            match output {
                Some(path) => {
                    write_atomic(path, exported.as_bytes())?;
                    tracing::info!(path = %path.display(), circuits = register.len(), "circuits exported");
                }
                None => println!("{}", exported),
            }
        }
        RegisterAction::Import { input } => {
            let contents = std::fs::read_to_string(input)
                .map_err(|e| CalcError::file_error("read", input.display().to_string(), e.to_string()))?;
            let count = register.import_circuits_json(&contents)?;
            save_register(&register, file)?;
            if !json {
                println!("Imported {} circuit(s)", count);
            }
        }
    }
    Ok(())
}

fn print_register(register: &CircuitRegister, json: bool) -> CalcResult<()> {
    if json {
        println!("{}", register.export_circuits_json()?);
        return Ok(());
    }
    if register.is_empty() {
        println!("No circuits.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<20} {:<10} {:>8} {:>7} {:>8} {:>8} {:>7}  {}",
        "ID", "Name", "Type", "Device", "S mm²", "IB A", "Iz A", "ΔU %", "Status"
    );
    for c in &register.circuits {
        let drop = c
            .voltage_drop_percent
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<36}  {:<20} {:<10} {:>8} {:>7} {:>8.2} {:>8.2} {:>7}  {}",
            c.id,
            c.name,
            c.circuit_type.display_name(),
            c.device_label(),
            c.cross_section_mm2,
            c.ib,
            c.iz,
            drop,
            if c.is_compliant() { "OK" } else { "FAIL" }
        );
    }
    let failing = register.non_compliant().count();
    println!();
    println!("{} circuit(s), {} non-compliant", register.len(), failing);
    Ok(())
}
