/// Destination schema the import tests write into. Column lists exclude
/// the `id` primary key, which the store assigns.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const TABLES: &[TableDef] = &[
    TableDef {
        name: "accounts",
        columns: &[],
    },
    TableDef {
        name: "students",
        columns: &["account_id", "legacy_id", "name", "house", "pet_type", "pet_id"],
    },
    TableDef {
        name: "parents",
        columns: &["account_id", "student_id", "legacy_id", "name"],
    },
    TableDef {
        name: "locations",
        columns: &["account_id", "legacy_id", "slug"],
    },
    TableDef {
        name: "students_subjects",
        columns: &["student_id", "subject_id"],
    },
    TableDef {
        name: "subjects",
        columns: &["account_id", "legacy_id", "name"],
    },
    TableDef {
        name: "grades",
        columns: &["account_id", "subject_id", "student_id", "legacy_id", "value"],
    },
    TableDef {
        name: "owls",
        columns: &["account_id", "legacy_id", "name"],
    },
    TableDef {
        name: "cats",
        columns: &["account_id", "legacy_id", "name"],
    },
];

pub fn table(name: &str) -> Option<&'static TableDef> {
    TABLES.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        assert!(table("students").is_some());
        assert!(table("wands").is_none());
    }

    #[test]
    fn test_students_columns() {
        let def = table("students").unwrap();
        assert!(def.columns.contains(&"house"));
        assert!(def.columns.contains(&"legacy_id"));
        assert!(!def.columns.contains(&"id"));
    }
}
