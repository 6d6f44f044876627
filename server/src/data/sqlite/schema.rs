//! SQLite schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

-- =============================================================================
-- Strain catalog
-- =============================================================================
CREATE TABLE IF NOT EXISTS strains (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL CHECK(category IN (
        'flower', 'pre_rolls', 'vapes', 'concentrates',
        'edibles', 'tinctures', 'topicals', 'medical'
    )),
    strain_name TEXT NOT NULL CHECK(length(strain_name) >= 1 AND length(strain_name) <= 200),
    strain_type TEXT NOT NULL CHECK(strain_type IN ('Sativa', 'Indica', 'Hybrid')),
    thc_content REAL NOT NULL DEFAULT 0 CHECK(thc_content >= 0 AND thc_content <= 100),
    cbd_content REAL NOT NULL DEFAULT 0 CHECK(cbd_content >= 0 AND cbd_content <= 100),
    price REAL NOT NULL CHECK(price >= 0),
    store_location TEXT,
    is_special INTEGER NOT NULL DEFAULT 0 CHECK(is_special IN (0, 1)),
    medical_uses TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_strains_category ON strains(category);
CREATE INDEX IF NOT EXISTS idx_strains_name ON strains(strain_name);
CREATE INDEX IF NOT EXISTS idx_strains_category_thc ON strains(category, thc_content);
CREATE INDEX IF NOT EXISTS idx_strains_price ON strains(price);
"#;
