/// Required identifier column headers
pub const COL_STATION: &str = "ESTACION";
pub const COL_MAGNITUDE: &str = "MAGNITUD";
pub const COL_YEAR: &str = "ANO";
/// Some municipal exports spell the year column with the eñe
pub const COL_YEAR_ALT: &str = "AÑO";
pub const COL_MONTH: &str = "MES";

/// Tokens interpreted as a missing value (never as zero or a parse failure)
pub const NULL_TOKENS: [&str; 5] = ["", "NA", "-", "--", "NoData"];

/// Field delimiter used by the municipal CSV exports
pub const FIELD_DELIMITER: u8 = b';';

/// District bucket for stations absent from a caller-supplied district map
pub const UNKNOWN_DISTRICT: &str = "unknown";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
