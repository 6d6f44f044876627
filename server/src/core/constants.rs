// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Dispensary";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "dispensary";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".dispensary";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "dispensary.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "DISPENSARY_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "DISPENSARY_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "DISPENSARY_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "DISPENSARY_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "DISPENSARY_LOG";

/// Environment variable for allowed CORS origins (comma separated)
pub const ENV_CORS_ORIGINS: &str = "DISPENSARY_CORS_ORIGINS";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Auth
// =============================================================================

/// Environment variable for the shared JWT secret
pub const ENV_JWT_SECRET: &str = "DISPENSARY_JWT_SECRET";

/// Session token lifetime
pub const DEFAULT_SESSION_TTL_HOURS: u32 = 24;

/// Minimum accepted length of a configured JWT secret
pub const MIN_JWT_SECRET_LEN: usize = 16;

/// Identity used when auth is disabled or the bootstrap token is exchanged
pub const DEFAULT_USER_ID: &str = "local";

// =============================================================================
// Database
// =============================================================================

/// Environment variable for database backend (sqlite or mysql)
pub const ENV_DATABASE_BACKEND: &str = "DISPENSARY_DATABASE_BACKEND";

/// Environment variable for SQLite database file path
pub const ENV_SQLITE_PATH: &str = "DISPENSARY_SQLITE_PATH";

/// Environment variable for MySQL connection URL
pub const ENV_MYSQL_URL: &str = "DISPENSARY_MYSQL_URL";

/// Default SQLite database file name (inside the dotfile folder)
pub const SQLITE_DB_FILENAME: &str = "dispensary.db";

/// Maximum SQLite connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

pub const MYSQL_DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const MYSQL_DEFAULT_MIN_CONNECTIONS: u32 = 1;
pub const MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const MYSQL_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
pub const MYSQL_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

// =============================================================================
// Request Limits
// =============================================================================

/// Default request body limit
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Auth endpoint body limit
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Shutdown
// =============================================================================

/// Upper bound on waiting for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
