use crate::{
    format::{elapsed, rule, section_header},
    sink::ReportSink,
    state::{CollectionState, InvalidSamples, RunState},
};
use model::{
    ordered::Tally,
    record::{ImportedRecord, RecordFailure, SourceRecord},
    summary::ImportSummary,
};
use std::fmt::Debug;
use tracing::debug;

/// Progress-and-summary reporter for a batch import run.
///
/// The reporter is a sink for record outcomes: the driver streams
/// per-record results into it and asks for formatted reports at collection
/// and run boundaries. It never fails; everything it renders is total over
/// well-formed input.
pub struct Reporter<S> {
    sink: S,
    run: RunState,
    collection: CollectionState,
}

impl Reporter<crate::sink::StdoutSink> {
    pub fn stdout(quiet: bool) -> Self {
        Reporter::new(crate::sink::StdoutSink, quiet)
    }
}

impl<S: ReportSink> Reporter<S> {
    pub fn new(sink: S, quiet: bool) -> Self {
        Reporter {
            sink,
            run: RunState::new(quiet),
            collection: CollectionState::default(),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.run.is_quiet()
    }

    pub fn invalid_samples(&self) -> &InvalidSamples {
        self.run.invalid_samples()
    }

    /// Consumes the reporter and hands back its sink, e.g. to read a
    /// captured buffer after the run.
    pub fn into_sink(self) -> S {
        self.sink
    }

    // === Run lifecycle ===

    pub fn start_run(&mut self, source: &str, destination: &str) {
        debug!(run_id = %self.run.run_id(), source, destination, "import run started");
        self.status(&format!("Importing {source} to {destination}\n"));
    }

    pub fn finish_run(&mut self, elapsed_ms: f64) {
        self.print_invalid_samples();
        self.status(&format!("\n\nFinished in {}", elapsed(elapsed_ms)));
        debug!(run_id = %self.run.run_id(), elapsed_ms, "import run finished");
    }

    pub fn finish_setup(&mut self, elapsed_ms: f64) {
        self.status(&format!("Setup took {}\n", elapsed(elapsed_ms)));
    }

    // === Collection lifecycle ===

    pub fn start_collection(&mut self, name: &str) {
        debug!(run_id = %self.run.run_id(), collection = name, "collection started");
        let rule = rule();
        self.status(&format!("\n{rule}\nImporting {name}\n{rule}\n"));
        self.collection = CollectionState::default();
    }

    pub fn finish_collection(&mut self, name: &str, summary: &ImportSummary) {
        debug!(
            run_id = %self.run.run_id(),
            collection = name,
            created = summary.created,
            invalid = summary.invalid,
            "collection finished"
        );
        self.print_summary(summary, name);
        let notices = std::mem::take(&mut self.collection.notices);
        let errors = std::mem::take(&mut self.collection.errors);
        self.print_messages(&notices, "Notices");
        self.print_messages(&errors, "Errors");
    }

    // === Per-record outcomes ===

    pub fn record_created(&mut self, _record: &ImportedRecord) {
        if !self.run.is_quiet() {
            self.sink.raw(".");
        }
    }

    /// Marks a failed record, samples its input payload, and tallies its
    /// validation messages. The first payload seen for a given message
    /// stays the sample; later failures with the same message only bump
    /// the tally. Quiet mode drops the marker, never the bookkeeping.
    pub fn record_failed(&mut self, failure: &RecordFailure, input: &SourceRecord) {
        if !self.run.is_quiet() {
            self.sink.raw("×");
        }

        let samples = self
            .run
            .invalid_samples
            .get_or_insert_with(&failure.entity, Default::default);
        for message in &failure.violations {
            if !samples.contains_key(message) {
                samples.insert(message.clone(), input.clone());
            }
            self.collection.errors.bump(message);
        }
    }

    // === Message tallies ===

    pub fn count_notice(&mut self, message: &str) {
        if self.run.is_quiet() {
            return;
        }
        self.collection.notices.bump(message);
    }

    pub fn count_error(&mut self, message: &str) {
        self.collection.errors.bump(message);
    }

    // === Output primitives ===

    pub fn status(&mut self, text: &str) {
        self.sink.line(text);
    }

    pub fn stat(&mut self, text: &str) {
        self.sink.line(&format!("  {text}"));
    }

    pub fn info(&mut self, text: &str) {
        self.stat(text);
    }

    pub fn file<T: Debug>(&mut self, value: &T) {
        self.sink.line(&format!("{value:?}"));
    }

    // === Report blocks ===

    fn print_summary(&mut self, summary: &ImportSummary, plural: &str) {
        self.status("");
        if summary.total == 0 {
            self.stat(&format!("{} elapsed", elapsed(summary.elapsed_ms)));
            return;
        }
        self.stat(&format!("{} {plural} were found", summary.total));
        self.stat(&format!(
            "{} {plural} were imported previously",
            summary.already_imported
        ));
        self.stat(&format!(
            "{} {plural} would create duplicates and will not be imported",
            summary.redundant
        ));
        self.stat(&format!("{} {plural} were invalid", summary.invalid));
        self.stat(&format!("{} {plural} were skipped", summary.skipped));
        self.stat(&format!("{} {plural} were imported", summary.created));
        self.stat(&format!(
            "{} elapsed ({}ms each)",
            elapsed(summary.elapsed_ms),
            summary.average_ms as i64
        ));
    }

    fn print_messages(&mut self, tally: &Tally, caption: &str) {
        if tally.is_empty() {
            return;
        }
        self.status(&format!("\n{}\n", section_header(caption)));
        for (message, count) in tally.iter() {
            self.stat(&format!("{count} × {message}"));
        }
    }

    fn print_invalid_samples(&mut self) {
        if self.run.invalid_samples.is_empty() {
            return;
        }
        let rule = rule();
        self.sink
            .line(&format!("\n\n\n{rule}\nExamples of invalid records\n{rule}"));
        for (entity, samples) in self.run.invalid_samples.iter() {
            self.sink.line(&format!("\n\n{}", section_header(entity)));
            for (message, sample) in samples.iter() {
                self.sink.line(&format!("\n  {message}:\n    {sample}"));
            }
        }
    }
}
