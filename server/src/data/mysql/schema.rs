//! MySQL schema definitions
//!
//! MySQL prepared statements take one statement at a time, so the schema is
//! a list instead of a single script.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schema_version (
        id INT PRIMARY KEY,
        version INT NOT NULL,
        applied_at BIGINT NOT NULL,
        description VARCHAR(255),
        CONSTRAINT chk_schema_version_id CHECK (id = 1)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS strains (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        category VARCHAR(32) NOT NULL,
        strain_name VARCHAR(200) NOT NULL,
        strain_type VARCHAR(16) NOT NULL,
        thc_content DOUBLE NOT NULL DEFAULT 0,
        cbd_content DOUBLE NOT NULL DEFAULT 0,
        price DOUBLE NOT NULL,
        store_location VARCHAR(255),
        is_special TINYINT(1) NOT NULL DEFAULT 0,
        medical_uses TEXT,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        CONSTRAINT chk_strains_category CHECK (category IN (
            'flower', 'pre_rolls', 'vapes', 'concentrates',
            'edibles', 'tinctures', 'topicals', 'medical'
        )),
        CONSTRAINT chk_strains_type CHECK (strain_type IN ('Sativa', 'Indica', 'Hybrid')),
        CONSTRAINT chk_strains_thc CHECK (thc_content >= 0 AND thc_content <= 100),
        CONSTRAINT chk_strains_cbd CHECK (cbd_content >= 0 AND cbd_content <= 100),
        CONSTRAINT chk_strains_price CHECK (price >= 0),
        INDEX idx_strains_category (category),
        INDEX idx_strains_name (strain_name),
        INDEX idx_strains_category_thc (category, thc_content),
        INDEX idx_strains_price (price)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
    "#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_are_single_and_non_empty() {
        for statement in SCHEMA_STATEMENTS {
            let trimmed = statement.trim();
            assert!(!trimmed.is_empty());
            assert!(!trimmed.trim_end_matches(';').contains(';'));
        }
    }

    #[test]
    fn strains_table_uses_case_insensitive_collation() {
        let strains = SCHEMA_STATEMENTS
            .iter()
            .find(|s| s.contains("CREATE TABLE IF NOT EXISTS strains"))
            .unwrap();
        assert!(strains.contains("utf8mb4_unicode_ci"));
    }
}
