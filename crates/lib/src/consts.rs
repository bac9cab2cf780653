/// Name used in user-facing output and log targets.
pub const APP_NAME: &str = "nucleus-deploy";

/// Consumer configuration file, relative to the consumer root.
pub const CONFIG_FILENAME: &str = "nucleus.yaml";

/// Suffix appended to a config file that could not be parsed before it is replaced.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Package manifest holding the `scripts` table.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Set by npm to the directory `npm install` was invoked from.
pub const INIT_CWD_VAR: &str = "INIT_CWD";
