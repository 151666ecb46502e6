// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Optional receiver for shader build failures.

Descriptor creation never raises on a compile or link failure.  Instead the
failure is returned as a value and, when the caller supplies one, described to a
[`Diagnostics`] sink with the info log and the offending source text.

```
use resources_and_state::diagnostics::{Diagnostics, OwnedReport, Report, Stage};
use resources_and_state::bindings::visible_to::ResourceType;

let mut sink: Vec<OwnedReport> = Vec::new();
sink.report(Report {
    stage: Stage::Link,
    resource: ResourceType::ShaderProgram,
    log: "missing main",
    source: "void f() {}",
});
assert_eq!(sink[0].log, "missing main");
```
*/

use crate::bindings::visible_to::ResourceType;

/// Which step of program creation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    VertexCompile,
    FragmentCompile,
    Link,
}

/// A single failure report. Borrowed so reporting never allocates.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub stage: Stage,
    pub resource: ResourceType,
    /// Info log returned by the context.
    pub log: &'a str,
    /// Source that produced the log. Link failures carry both stages joined by a blank line.
    pub source: &'a str,
}

/// Passive collaborator that receives build failures.
pub trait Diagnostics {
    fn report(&mut self, report: Report<'_>);
}

/// Owned copy of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedReport {
    pub stage: Stage,
    pub resource: ResourceType,
    pub log: String,
    pub source: String,
}

impl From<Report<'_>> for OwnedReport {
    fn from(report: Report<'_>) -> Self {
        OwnedReport {
            stage: report.stage,
            resource: report.resource,
            log: report.log.to_owned(),
            source: report.source.to_owned(),
        }
    }
}

impl Diagnostics for Vec<OwnedReport> {
    fn report(&mut self, report: Report<'_>) {
        self.push(report.into());
    }
}

/// Forwards every report to the error log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, report: Report<'_>) {
        logwise::error_sync!(
            "{stage} failed for {resource}: {log}",
            stage = logwise::privacy::LogIt(&report.stage),
            resource = logwise::privacy::LogIt(&report.resource),
            log = logwise::privacy::LogIt(&report.log)
        );
    }
}
