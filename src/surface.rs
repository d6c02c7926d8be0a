//! Display surfaces for digest results and failure notifications.

use anyhow::{Context, Result};
use std::io::Write;

use crate::contract::{error_report, Report};
use crate::error::DigestError;

/// Where results are appended and failures are announced.
///
/// Failures travel on their own channel and never land in the result list.
pub(crate) trait DisplaySurface {
    fn append(&mut self, report: &Report) -> Result<()>;
    fn notify(&mut self, err: &DigestError) -> Result<()>;
}

/// Output style for console surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    JsonLines,
}

/// Writes results to one stream and notifications to another.
pub(crate) struct ConsoleSurface<O: Write, E: Write> {
    out: O,
    err: E,
    format: OutputFormat,
}

impl<O: Write, E: Write> ConsoleSurface<O, E> {
    pub(crate) fn new(out: O, err: E, format: OutputFormat) -> Self {
        Self { out, err, format }
    }
}

impl<O: Write, E: Write> DisplaySurface for ConsoleSurface<O, E> {
    fn append(&mut self, report: &Report) -> Result<()> {
        let written = match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", report.line()),
            OutputFormat::JsonLines => {
                let line = serde_json::to_string(report).context("serialize report")?;
                writeln!(self.out, "{line}")
            }
        };
        written.context("write result")?;
        self.out.flush().context("flush results")
    }

    fn notify(&mut self, err: &DigestError) -> Result<()> {
        let written = match self.format {
            OutputFormat::Text => writeln!(self.err, "error: {err}"),
            OutputFormat::JsonLines => {
                let line = serde_json::to_string(&error_report(err))
                    .context("serialize error report")?;
                writeln!(self.err, "{line}")
            }
        };
        written.context("write notification")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::Algorithm;
    use std::path::PathBuf;

    fn abc_report() -> Report {
        Report {
            path: PathBuf::from("/data/abc.txt"),
            algorithm: Algorithm::Md5,
            digest: "900150983cd24fb0d6963f7d28e17f72".to_string(),
        }
    }

    #[test]
    fn text_surface_splits_results_and_errors() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut surface = ConsoleSurface::new(&mut out, &mut err, OutputFormat::Text);
            surface.append(&abc_report()).expect("append");
            surface
                .notify(&DigestError::NotFound {
                    path: PathBuf::from("/data/missing"),
                })
                .expect("notify");
        }
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "/data/abc.txt → 900150983cd24fb0d6963f7d28e17f72\n"
        );
        assert_eq!(
            String::from_utf8(err).expect("utf8"),
            "error: /data/missing was not found\n"
        );
    }

    #[test]
    fn json_surface_writes_one_object_per_line() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut surface = ConsoleSurface::new(&mut out, &mut err, OutputFormat::JsonLines);
            surface.append(&abc_report()).expect("append");
            surface
                .notify(&DigestError::NotAFile {
                    path: PathBuf::from("/data"),
                })
                .expect("notify");
        }
        let out = String::from_utf8(out).expect("utf8");
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).expect("parse");
        assert_eq!(value["digest"], "900150983cd24fb0d6963f7d28e17f72");
        let err = String::from_utf8(err).expect("utf8");
        let value: serde_json::Value = serde_json::from_str(err.trim_end()).expect("parse");
        assert_eq!(value["code"], "not_a_file");
    }
}
