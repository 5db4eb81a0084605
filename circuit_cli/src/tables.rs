//! Reference table printing for the `tables` command.

use clap::ValueEnum;
use serde::Serialize;

use circuit_core::correction_factors::{
    GroupingPoint, TemperaturePoint, GROUPING_CORRECTION, TEMPERATURE_CORRECTION_PVC, TEMPERATURE_CORRECTION_XLPE,
};
use circuit_core::errors::CalcResult;
use circuit_core::reference::{
    k_coefficient, AmpacityTable, CableAmpacityEntry, Characteristic, CircuitType, Conductor, ConductorTemperature, InstallationMethod,
    Insulation, PowerFactorPreset, NOMINAL_CURRENTS_A,
};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    All,
    /// Base ampacity Idd by installation method
    Ampacity,
    /// Ambient temperature correction
    Temperature,
    /// Grouping correction
    Grouping,
    /// MCB rated currents and characteristics
    Devices,
    /// Conductor constants and k-coefficients
    Materials,
    /// Voltage-drop limits and power-factor presets
    Limits,
}

pub fn print(kind: TableKind, json: bool) -> CalcResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&collect(kind))?);
        return Ok(());
    }

    let show = |k: TableKind| kind == TableKind::All || kind == k;
    if show(TableKind::Ampacity) {
        print_ampacity();
    }
    if show(TableKind::Temperature) {
        print_temperature();
    }
    if show(TableKind::Grouping) {
        print_grouping();
    }
    if show(TableKind::Devices) {
        print_devices();
    }
    if show(TableKind::Materials) {
        print_materials();
    }
    if show(TableKind::Limits) {
        print_limits();
    }
    Ok(())
}

fn print_ampacity() {
    for table in AmpacityTable::ALL {
        let methods: Vec<&str> = InstallationMethod::ALL
            .iter()
            .filter(|m| m.table() == table)
            .map(|m| m.code())
            .collect();
        println!("Ampacity table {} (methods {}), 30 °C, single circuit", table.name(), methods.join(", "));
        println!("  {:>8} {:>8} {:>8}", "S mm²", "Cu A", "Al A");
        for entry in table.entries() {
            let al = entry
                .ampacity_aluminum_a
                .map(|a| format!("{:.1}", a))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:>8} {:>8.1} {:>8}", entry.cross_section_mm2, entry.ampacity_copper_a, al);
        }
        println!();
    }
}

fn print_temperature() {
    println!("Ambient temperature correction k_temp");
    println!("  {:>6} {:>6} {:>6}", "°C", "PVC", "XLPE");
    for xlpe in TEMPERATURE_CORRECTION_XLPE.iter() {
        let pvc = TEMPERATURE_CORRECTION_PVC
            .iter()
            .find(|p| p.temperature_c == xlpe.temperature_c)
            .map(|p| format!("{:.2}", p.factor))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:>6} {:>6} {:>6.2}", xlpe.temperature_c, pvc, xlpe.factor);
    }
    println!();
}

fn print_grouping() {
    println!("Grouping correction k_group (sizes between keys use the lower key)");
    for point in GROUPING_CORRECTION.iter() {
        println!("  {:>3} circuit(s)  {:.2}", point.circuits, point.factor);
    }
    println!();
}

fn print_devices() {
    let currents: Vec<String> = NOMINAL_CURRENTS_A.iter().map(|i| format!("{}", i)).collect();
    println!("MCB rated currents In: {} A", currents.join(", "));
    for characteristic in Characteristic::ALL {
        println!("  {}", characteristic.display_name());
    }
    println!();
}

fn print_materials() {
    println!("Conductors");
    for material in Conductor::ALL {
        println!(
            "  {:<10} ρ20 = {:.4} Ω·mm²/m   γ20 = {} / γ70 = {} m/(Ω·mm²)",
            material.display_name(),
            material.resistivity(),
            material.conductivity(ConductorTemperature::Ambient20C),
            material.conductivity(ConductorTemperature::Operating70C),
        );
    }
    println!("k-coefficients");
    for material in Conductor::ALL {
        for insulation in Insulation::ALL {
            println!("  {}/{}: {}", material.symbol(), insulation, k_coefficient(material, insulation));
        }
    }
    println!();
}

fn print_limits() {
    println!("Voltage-drop limits");
    for circuit_type in CircuitType::ALL {
        println!("  {:<24} {:.0} %", circuit_type.display_name(), circuit_type.voltage_drop_limit_percent());
    }
    println!("Power-factor presets");
    for preset in PowerFactorPreset::ALL {
        println!("  {}", preset.display_name());
    }
    println!();
}

#[derive(Serialize, Default)]
struct TablesOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ampacity: Vec<AmpacityOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<TemperatureOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grouping: Option<&'static [GroupingPoint]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nominal_currents_a: Option<&'static [f64]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    materials: Vec<MaterialOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    voltage_drop_limits: Vec<LimitOutput>,
}

#[derive(Serialize)]
struct AmpacityOutput {
    table: &'static str,
    methods: Vec<InstallationMethod>,
    entries: &'static [CableAmpacityEntry],
}

#[derive(Serialize)]
struct TemperatureOutput {
    pvc: &'static [TemperaturePoint],
    xlpe: &'static [TemperaturePoint],
}

#[derive(Serialize)]
struct MaterialOutput {
    material: Conductor,
    resistivity: f64,
    conductivity_20c: f64,
    conductivity_70c: f64,
    k_pvc: f64,
    k_xlpe: f64,
}

#[derive(Serialize)]
struct LimitOutput {
    circuit_type: CircuitType,
    limit_percent: f64,
}

fn collect(kind: TableKind) -> TablesOutput {
    let all = kind == TableKind::All;
    let mut out = TablesOutput::default();

    if all || kind == TableKind::Ampacity {
        out.ampacity = AmpacityTable::ALL
            .iter()
            .map(|&table| AmpacityOutput {
                table: table.name(),
                methods: InstallationMethod::ALL
                    .into_iter()
                    .filter(|m| m.table() == table)
                    .collect(),
                entries: table.entries(),
            })
            .collect();
    }
    if all || kind == TableKind::Temperature {
        out.temperature = Some(TemperatureOutput {
            pvc: &TEMPERATURE_CORRECTION_PVC,
            xlpe: &TEMPERATURE_CORRECTION_XLPE,
        });
    }
    if all || kind == TableKind::Grouping {
        let grouping: &'static [GroupingPoint] = &GROUPING_CORRECTION;
        out.grouping = Some(grouping);
    }
    if all || kind == TableKind::Devices {
        let currents: &'static [f64] = &NOMINAL_CURRENTS_A;
        out.nominal_currents_a = Some(currents);
    }
    if all || kind == TableKind::Materials {
        out.materials = Conductor::ALL
            .iter()
            .map(|&material| MaterialOutput {
                material,
                resistivity: material.resistivity(),
                conductivity_20c: material.conductivity(ConductorTemperature::Ambient20C),
                conductivity_70c: material.conductivity(ConductorTemperature::Operating70C),
                k_pvc: k_coefficient(material, Insulation::Pvc),
                k_xlpe: k_coefficient(material, Insulation::Xlpe),
            })
            .collect();
    }
    if all || kind == TableKind::Limits {
        out.voltage_drop_limits = CircuitType::ALL
            .iter()
            .map(|&circuit_type| LimitOutput {
                circuit_type,
                limit_percent: circuit_type.voltage_drop_limit_percent(),
            })
            .collect();
    }
    out
}
