// src/utils/report.rs

use crate::error::{Result, ScreeningError};
use crate::model::{library, Oxidant};
use crate::physics::{
    can_reduce, kelvin_to_celsius, near_ties, rank, sweep, ExchangeReaction, FormationLine,
    TemperatureRange, ValidityWindow,
};

/// "Al2O3" -> "Al"
pub fn metal_of(formula: &str) -> &str {
    let end = formula
        .char_indices()
        .skip(1)
        .find(|(_, c)| !c.is_ascii_lowercase())
        .map(|(i, _)| i)
        .unwrap_or(formula.len());
    &formula[..end]
}

/// Generates the ranking text shown in the CLI and the side panel
pub fn ranking_table<L: FormationLine>(
    lines: &[L],
    temperature_k: f64,
    window: &ValidityWindow,
    tie_tolerance: f64,
) -> String {
    let ranked = rank(lines, temperature_k);
    let ties = near_ties(&ranked, tie_tolerance);
    let t_c = kelvin_to_celsius(temperature_k);
    let oxidant = lines.first().map(|l| l.oxidant()).unwrap_or(Oxidant::O2);

    let mut out = String::new();
    out.push_str(&format!(
        "Stability ranking at {:.0} K ({:.0} °C)\n",
        temperature_k, t_c
    ));
    out.push_str("--------------------------------------------------------------\n");
    out.push_str(&format!(
        "{:<6} {:<10} {:>16}   {}\n",
        "Rank",
        "Species",
        format!("ΔG (kJ/mol {})", oxidant.label()),
        "Status"
    ));
    out.push_str("--------------------------------------------------------------\n");

    let last = ranked.len().saturating_sub(1);
    for (i, entry) in ranked.iter().enumerate() {
        let mut status = Vec::new();
        if i == 0 {
            status.push("Most stable".to_string());
        } else if i == last {
            status.push("Least stable".to_string());
        }
        if ties[i] {
            status.push(format!("≈ {}", ranked[i - 1].name));
        }
        if let Some(mp) = library::melting_point_c(&entry.name) {
            if t_c > mp {
                status.push(format!("liquid above {:.0} °C", mp));
            }
        }

        out.push_str(&format!(
            "{:<6} {:<10} {:>16.1}   {}\n",
            i + 1,
            entry.name,
            entry.value,
            status.join(", ")
        ));
    }

    if let Some(w) = window.check(temperature_k) {
        out.push_str(&format!("\n⚠ {}\n", w));
    }

    out
}

/// Whether the reference species' metal can reduce each of the others.
pub fn reduction_summary<L: FormationLine>(
    lines: &[L],
    reference: &str,
    temperature_k: f64,
) -> Result<String> {
    let reference_line = lines
        .iter()
        .find(|l| l.name() == reference)
        .ok_or_else(|| ScreeningError::UnknownSpecies(reference.to_string()))?;
    let ref_value = reference_line.free_energy_per_oxidant(temperature_k);
    let ref_metal = metal_of(reference);
    let unit = format!("kJ/mol {}", reference_line.oxidant().label());

    let mut out = String::new();
    out.push_str(&format!(
        "Reduction by {} at {:.0} K ({} line: {:.1} {})\n",
        ref_metal, temperature_k, reference, ref_value, unit
    ));
    out.push_str("--------------------------------------------------------------\n");

    for other in lines.iter().filter(|l| l.name() != reference) {
        let gap = other.free_energy_per_oxidant(temperature_k) - ref_value;
        let verdict = if can_reduce(reference_line, other, temperature_k) {
            format!("{} reduces {}", ref_metal, other.name())
        } else {
            format!("{} cannot reduce {}", ref_metal, other.name())
        };
        out.push_str(&format!("{:<32} gap {:>+9.1} {}\n", verdict, gap, unit));
    }

    Ok(out)
}

pub fn exchange_summary(reaction: &ExchangeReaction, temperature_k: f64) -> String {
    let dg = reaction.gibbs(temperature_k);
    let verdict = if reaction.is_favorable(temperature_k) {
        "favorable"
    } else {
        "not favorable"
    };

    let mut out = String::new();
    out.push_str(&format!("{} at {:.0} K\n", reaction.equation, temperature_k));
    out.push_str(&format!(
        "  ΔGf({}) = {:.3} kJ/mol\n",
        reaction.formed.name(),
        reaction.formed.raw_free_energy(temperature_k)
    ));
    out.push_str(&format!(
        "  ΔGf({}) = {:.3} kJ/mol\n",
        reaction.consumed.name(),
        reaction.consumed.raw_free_energy(temperature_k)
    ));
    out.push_str(&format!("  ΔG_rxn = {:.3} kJ/mol ({})\n", dg, verdict));
    out
}

/// One row per grid temperature, one column per line.
pub fn sweep_table<L: FormationLine>(lines: &[L], range: &TemperatureRange) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>8}", "T (K)"));
    for l in lines {
        out.push_str(&format!(" {:>10}", l.name()));
    }
    out.push('\n');

    let columns: Vec<Vec<f64>> = lines
        .iter()
        .map(|l| sweep(l, range).map(|(_, g)| g).collect())
        .collect();

    for (i, t) in range.temperatures().enumerate() {
        out.push_str(&format!("{:>8.1}", t));
        for col in &columns {
            out.push_str(&format!(" {:>10.1}", col[i]));
        }
        out.push('\n');
    }
    out
}
