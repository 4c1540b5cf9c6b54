//! Rendering a generated password, and what is known about it, to the terminal.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::table::TableDisplay;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub password: alphapass::Secret,
    pub length: usize,
    pub alphabet_size: usize,
    pub bits: u64,
    pub bytes_read: usize,
}

pub(crate) struct Options {
    pub format: Format,
    pub verbose: bool,
    pub newline: bool,
}

pub(crate) fn write_report(
    report: &Report,
    options: &Options,
    mut output: impl Write,
) -> anyhow::Result<()> {
    match options.format {
        Format::Text => {
            if options.verbose {
                let rows = [
                    Row("password length", report.length.to_string()),
                    Row("alphabet size", report.alphabet_size.to_string()),
                    Row("complexity in bits", format!("about {}", report.bits)),
                    Row("bytes read", report.bytes_read.to_string()),
                ];
                crate::table::display_table(&rows, &mut output)
                    .context("failed to output table")?;
                writeln!(output)?;
            }
            write!(output, "{}", report.password.as_str())?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut output, report)
                .context("failed to write the report as JSON")?;
        }
        Format::Yaml => {
            let mut s =
                serde_yaml::to_string(report).context("failed to encode the report as YAML")?;
            if s.ends_with('\n') {
                s.pop();
            }
            output.write_all(s.as_bytes())?;
        }
    }
    if options.newline {
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}

struct Row(&'static str, String);

impl TableDisplay for Row {
    fn columns() -> usize {
        2
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Property",
            1 => "Value",
            _ => panic!(),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => self.0,
            1 => &self.1,
            _ => panic!(),
        }
    }
}
