//! Table definitions for the workload schema.

/// Parent table name.
pub const PARENT_TABLE: &str = "parent_records";

/// Child table name.
pub const CHILD_TABLE: &str = "child_records";

/// CREATE TABLE statement for `parent_records`.
pub fn create_parent_table() -> String {
    format!(
        "CREATE TABLE `{PARENT_TABLE}` (
    `id` BIGINT NOT NULL,
    `var_char_id` VARCHAR(36) NOT NULL,
    `varchar_field` VARCHAR(1000) NOT NULL,
    `text_field` TEXT NOT NULL,
    `tinyint_field` TINYINT(1) NOT NULL DEFAULT 0,
    `timestamp_field` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    `json_field` JSON NOT NULL,
    `created_at` DATETIME NOT NULL,
    `updated_at` DATETIME NOT NULL,
    PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci"
    )
}

/// CREATE TABLE statement for `child_records`.
///
/// Children cascade-delete with their parent.
pub fn create_child_table() -> String {
    format!(
        "CREATE TABLE `{CHILD_TABLE}` (
    `id` BIGINT NOT NULL,
    `parent_id` BIGINT NOT NULL,
    `varchar_field` VARCHAR(1000) NOT NULL,
    `bigint_field` BIGINT DEFAULT NULL,
    `active_field` TINYINT(1) NOT NULL DEFAULT 1,
    `created_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    `expires_at` TIMESTAMP NULL DEFAULT NULL,
    `metadata` TEXT NOT NULL,
    PRIMARY KEY (`id`),
    KEY `parent_id_idx` (`parent_id`),
    CONSTRAINT `child_parent_fk` FOREIGN KEY (`parent_id`)
        REFERENCES `{PARENT_TABLE}` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci"
    )
}

/// Generate DROP TABLE statement.
pub fn generate_drop_table(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS `{table_name}`")
}

/// Statements that drop and recreate both tables, in execution order.
///
/// The child table goes first so the foreign key never dangles.
pub fn recreate_statements() -> Vec<String> {
    vec![
        generate_drop_table(CHILD_TABLE),
        generate_drop_table(PARENT_TABLE),
        create_parent_table(),
        create_child_table(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_drop_table() {
        assert_eq!(
            generate_drop_table("child_records"),
            "DROP TABLE IF EXISTS `child_records`"
        );
    }

    #[test]
    fn test_recreate_order() {
        let statements = recreate_statements();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].contains("`child_records`"));
        assert!(statements[1].contains("`parent_records`"));
        assert!(statements[2].starts_with("CREATE TABLE `parent_records`"));
        assert!(statements[3].starts_with("CREATE TABLE `child_records`"));
    }

    #[test]
    fn test_child_table_cascades() {
        let sql = create_child_table();
        assert!(sql.contains("REFERENCES `parent_records` (`id`) ON DELETE CASCADE"));
        assert!(sql.contains("`parent_id` BIGINT NOT NULL"));
    }

    #[test]
    fn test_parent_table_columns() {
        let sql = create_parent_table();
        for column in [
            "var_char_id",
            "varchar_field",
            "text_field",
            "tinyint_field",
            "timestamp_field",
            "json_field",
            "created_at",
            "updated_at",
        ] {
            assert!(sql.contains(&format!("`{column}`")), "missing {column}");
        }
        assert!(sql.contains("PRIMARY KEY (`id`)"));
    }
}
