#[cfg(test)]
mod tests {
    use crate::{
        driver::{Collection, Importer},
        store::MemoryStore,
    };
    use model::record::SourceRecord;
    use reporter::{BufferSink, Reporter};
    use serde_json::json;
    use tracing_test::traced_test;

    fn record(json: serde_json::Value) -> SourceRecord {
        SourceRecord::from_json(&json).unwrap()
    }

    fn students(records: Vec<SourceRecord>) -> Collection {
        Collection::new("students", "Student")
            .require(&["name"])
            .records(records)
    }

    #[test]
    fn test_students_end_to_end() {
        crate::init_tracing();
        let importer = Importer::new("legacy Hogwarts records", "in-memory destination")
            .collection(students(vec![
                record(json!({"legacy_id": 1, "name": "Harry", "house": "Gryffindor"})),
                record(json!({"legacy_id": 2, "name": "Ron", "house": "Gryffindor"})),
                record(json!({"legacy_id": 3, "name": "Hermione", "house": "Gryffindor"})),
                record(json!({"house": "Gryffindor"})),
            ]));
        let mut reporter = Reporter::new(BufferSink::new(), false);
        let mut store = MemoryStore::new();

        let summaries = importer.run(&mut reporter, &mut store).unwrap();
        let output = reporter.into_sink().into_string();

        assert!(output.contains("Importing legacy Hogwarts records to in-memory destination"));
        assert!(output.contains("Importing students"));
        assert!(output.contains("...×"));
        assert!(output.contains("  4 students were found\n"));
        assert!(output.contains("  3 students were imported\n"));
        assert!(output.contains("  1 students were invalid\n"));
        assert!(output.contains("1 × name can't be blank"));
        assert!(output.contains("Examples of invalid records"));
        assert!(output.contains("--Student"));
        assert!(output.contains("{house: \"Gryffindor\"}"));
        assert!(output.contains("Finished in "));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total, 4);
        assert_eq!(summaries[0].created, 3);
        assert_eq!(summaries[0].invalid, 1);
        assert_eq!(store.count("students"), 3);
        assert_eq!(
            store.rows("students")[0].record.get_value("name").as_string(),
            Some("Harry".to_string())
        );
    }

    #[test]
    fn test_quiet_run_suppresses_progress_and_notices() {
        let mut store = MemoryStore::new();
        store
            .insert(
                "students",
                &record(json!({"legacy_id": 1, "name": "Harry"})),
            )
            .unwrap();

        let importer = Importer::new("legacy dump", "memory store").collection(students(vec![
            record(json!({"legacy_id": 1, "name": "Harry"})),
            record(json!({"house": "Gryffindor"})),
            record(json!({"legacy_id": 2, "name": "Ron"})),
        ]));
        let mut reporter = Reporter::new(BufferSink::new(), true);

        let summaries = importer.run(&mut reporter, &mut store).unwrap();
        let output = reporter.into_sink().into_string();

        // no progress markers: nothing printed between the run banner and
        // the first collection rule
        let head = &output[..output.find('=').unwrap()];
        assert!(!head.contains('.'));
        assert!(!output.contains('×'));

        // notices are dropped in quiet mode, errors are not
        assert!(!output.contains("--Notices"));
        assert!(!output.contains("previously imported"));
        assert!(output.contains("1 × name can't be blank"));
        assert!(output.contains("Examples of invalid records"));
        assert!(output.contains("{house: \"Gryffindor\"}"));

        assert_eq!(summaries[0].already_imported, 1);
        assert_eq!(summaries[0].invalid, 1);
        assert_eq!(summaries[0].created, 1);
    }

    #[test]
    fn test_duplicate_and_skip_accounting() {
        let mut store = MemoryStore::new();
        store
            .insert(
                "students",
                &record(json!({"legacy_id": 9, "name": "Neville"})),
            )
            .unwrap();

        let importer = Importer::new("legacy dump", "memory store").collection(
            students(vec![
                record(json!({"legacy_id": 9, "name": "Neville"})),
                record(json!({"legacy_id": 1, "name": "Harry"})),
                record(json!({"legacy_id": 1, "name": "Harry"})),
                record(json!({"legacy_id": 2, "name": "Draco", "house": "Slytherin"})),
            ])
            .skip_when(|r| r.get_value("house").as_string().as_deref() == Some("Slytherin")),
        );
        let mut reporter = Reporter::new(BufferSink::new(), false);

        let summaries = importer.run(&mut reporter, &mut store).unwrap();
        let output = reporter.into_sink().into_string();

        assert_eq!(summaries[0].total, 4);
        assert_eq!(summaries[0].already_imported, 1);
        assert_eq!(summaries[0].redundant, 1);
        assert_eq!(summaries[0].skipped, 1);
        assert_eq!(summaries[0].created, 1);

        assert!(output.contains("--Notices"));
        assert!(output.contains("1 × previously imported"));
        assert!(output.contains("1 × duplicate in source data"));
        assert!(output.contains("  1 students were skipped\n"));
    }

    #[test]
    fn test_sample_payloads_nest_by_entity() {
        let importer = Importer::new("legacy dump", "memory store")
            .collection(students(vec![record(json!({"house": "Gryffindor"}))]))
            .collection(
                Collection::new("parents", "Parent")
                    .require(&["name"])
                    .records(vec![record(json!({"student_id": 7}))]),
            );
        let mut reporter = Reporter::new(BufferSink::new(), false);
        let mut store = MemoryStore::new();

        importer.run(&mut reporter, &mut store).unwrap();
        let output = reporter.into_sink().into_string();

        let student_at = output.find("--Student").unwrap();
        let parent_at = output.find("--Parent").unwrap();
        assert!(student_at < parent_at);
        assert!(output.contains("{house: \"Gryffindor\"}"));
        assert!(output.contains("{student_id: 7}"));
        // the same message text is sampled under each entity independently
        assert_eq!(output.matches("name can't be blank:").count(), 2);
    }

    #[traced_test]
    #[test]
    fn test_run_emits_lifecycle_traces() {
        let importer = Importer::new("legacy dump", "memory store")
            .collection(students(vec![record(json!({"legacy_id": 1, "name": "Harry"}))]));
        let mut reporter = Reporter::new(BufferSink::new(), false);
        let mut store = MemoryStore::new();

        importer.run(&mut reporter, &mut store).unwrap();

        assert!(logs_contain("import run started"));
        assert!(logs_contain("collection imported"));
        assert!(logs_contain("import run finished"));
    }
}
