//! Rendering of calculator results in the selected output format

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use subcalc_cidr::{Network, Summary};
use subcalc_core::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// The three renderings of a single address
#[derive(Debug, Serialize)]
pub struct AddressReport {
    pub address: Address,
    pub binary: String,
    pub value: u32,
}

impl From<Address> for AddressReport {
    fn from(address: Address) -> Self {
        Self {
            address,
            binary: address.to_binary_string(),
            value: address.to_u32(),
        }
    }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => write_human(out, "Subnet", &summary.rows())?,
        OutputFormat::Json => write_json(out, summary, true)?,
        OutputFormat::JsonCompact => write_json(out, summary, false)?,
        OutputFormat::Csv => write_csv(out, [summary])?,
    }
    Ok(())
}

pub fn write_address<W: Write>(out: &mut W, report: &AddressReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let rows = [
                ("Address", report.address.to_string()),
                ("Binary", report.binary.clone()),
                ("Integer", report.value.to_string()),
            ];
            write_human(out, "Address", &rows)?
        }
        OutputFormat::Json => write_json(out, report, true)?,
        OutputFormat::JsonCompact => write_json(out, report, false)?,
        OutputFormat::Csv => write_csv(out, [report])?,
    }
    Ok(())
}

/// One line per block in human mode, one summary per block otherwise
pub fn write_networks<W: Write>(out: &mut W, networks: &[Network], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Human {
        for (i, network) in networks.iter().enumerate() {
            writeln!(
                out,
                "{:>4}: {:<20} {} - {}",
                i + 1,
                network.to_string().green(),
                network.first_host(),
                network.last_host()
            )?;
        }
        return Ok(());
    }

    let summaries: Vec<Summary> = networks.iter().map(Network::summary).collect();
    match format {
        OutputFormat::Json => write_json(out, &summaries, true)?,
        OutputFormat::JsonCompact => write_json(out, &summaries, false)?,
        _ => write_csv(out, &summaries)?,
    }
    Ok(())
}

fn write_human<W: Write>(out: &mut W, title: &str, rows: &[(&str, String)]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bold().cyan())?;
    writeln!(out, "{}", "─".repeat(50).dimmed())?;
    for (label, value) in rows {
        writeln!(out, "{:>15}: {}", label.bold(), value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv<W, I, T>(out: &mut W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut wtr = csv::Writer::from_writer(out);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
