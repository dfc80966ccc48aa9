use crate::store::{MemoryStore, StoreError};
use model::{
    record::{ImportedRecord, RecordFailure, RecordOutcome, SourceRecord},
    summary::ImportSummary,
};
use reporter::{ReportSink, Reporter};
use std::{collections::HashSet, time::Instant};
use tracing::info;

/// One collection of legacy records headed for a destination table.
/// `name` doubles as the destination table and the plural display name.
pub struct Collection {
    pub name: &'static str,
    pub entity: &'static str,
    pub required: &'static [&'static str],
    pub skip_if: Option<fn(&SourceRecord) -> bool>,
    pub records: Vec<SourceRecord>,
}

impl Collection {
    pub fn new(name: &'static str, entity: &'static str) -> Self {
        Collection {
            name,
            entity,
            required: &[],
            skip_if: None,
            records: Vec::new(),
        }
    }

    pub fn require(mut self, fields: &'static [&'static str]) -> Self {
        self.required = fields;
        self
    }

    pub fn skip_when(mut self, predicate: fn(&SourceRecord) -> bool) -> Self {
        self.skip_if = Some(predicate);
        self
    }

    pub fn records(mut self, records: Vec<SourceRecord>) -> Self {
        self.records = records;
        self
    }

    fn validate(&self, record: &SourceRecord) -> Vec<String> {
        let mut violations = Vec::new();
        for field in self.required {
            if record.get_value(field).is_blank() {
                violations.push(format!("{field} can't be blank"));
            }
        }
        violations
    }
}

/// Minimal import driver: walks collections in order and streams record
/// outcomes into the reporter, per the reporter's calling contract.
pub struct Importer {
    pub source: String,
    pub destination: String,
    pub collections: Vec<Collection>,
}

impl Importer {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Importer {
            source: source.into(),
            destination: destination.into(),
            collections: Vec::new(),
        }
    }

    pub fn collection(mut self, collection: Collection) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn describe_source(&self) -> &str {
        &self.source
    }

    pub fn describe_destination(&self) -> &str {
        &self.destination
    }

    pub fn run<S: ReportSink>(
        &self,
        reporter: &mut Reporter<S>,
        store: &mut MemoryStore,
    ) -> Result<Vec<ImportSummary>, StoreError> {
        reporter.start_run(self.describe_source(), self.describe_destination());
        let started = Instant::now();

        let mut summaries = Vec::new();
        for collection in &self.collections {
            summaries.push(self.run_collection(collection, reporter, store)?);
        }

        reporter.finish_run(elapsed_ms(started));
        Ok(summaries)
    }

    fn run_collection<S: ReportSink>(
        &self,
        collection: &Collection,
        reporter: &mut Reporter<S>,
        store: &mut MemoryStore,
    ) -> Result<ImportSummary, StoreError> {
        reporter.start_collection(collection.name);
        let started = Instant::now();

        let mut summary = ImportSummary::default();
        let mut seen_in_batch: HashSet<i64> = HashSet::new();

        for record in &collection.records {
            summary.total += 1;

            if let Some(legacy_id) = record.get("legacy_id").and_then(|v| v.as_i64()) {
                if store.contains_legacy(collection.name, legacy_id) {
                    summary.already_imported += 1;
                    reporter.count_notice("previously imported");
                    continue;
                }
                if !seen_in_batch.insert(legacy_id) {
                    summary.redundant += 1;
                    reporter.count_notice("duplicate in source data");
                    continue;
                }
            }

            if let Some(skip) = collection.skip_if {
                if skip(record) {
                    summary.skipped += 1;
                    continue;
                }
            }

            let violations = collection.validate(record);
            let outcome = if violations.is_empty() {
                let id = store.insert(collection.name, record)?;
                RecordOutcome::Created(ImportedRecord {
                    entity: collection.entity.to_string(),
                    id,
                })
            } else {
                RecordOutcome::Failed {
                    failure: RecordFailure::new(collection.entity, violations),
                    input: record.clone(),
                }
            };

            match &outcome {
                RecordOutcome::Created(created) => {
                    summary.created += 1;
                    reporter.record_created(created);
                }
                RecordOutcome::Failed { failure, input } => {
                    summary.invalid += 1;
                    reporter.record_failed(failure, input);
                }
            }
        }

        let summary = summary.with_elapsed(elapsed_ms(started));
        info!(
            collection = collection.name,
            total = summary.total,
            created = summary.created,
            invalid = summary.invalid,
            "collection imported"
        );
        reporter.finish_collection(collection.name, &summary);
        Ok(summary)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
