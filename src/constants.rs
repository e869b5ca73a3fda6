/// Shared constants for the build-recommendation pipeline.
/// Everything that is fixed by the layout of the source spreadsheet lives here.

// Default spreadsheet and API endpoint
pub const DEFAULT_SPREADSHEET_ID: &str = "1gNxZ2xab1J6o1TuNVWMeLOZ7TPOqrsf3SshP5DLvKzI";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Element tables in fetch order: (category label, A1 range).
pub const DEFAULT_CATEGORIES: [(&str, &str); 7] = [
    ("PYRO", "Pyro !A1:J"),
    ("ELECTRO", "Electro !A1:J"),
    ("DENDRO", "Dendro!A1:J"),
    ("HYDRO", "Hydro !A1:J"),
    ("CRYO", "Cryo !A1:J"),
    ("ANEMO", "Anemo !A1:J"),
    ("GEO", "Geo !A1:J"),
];

/// Leading rows of every category table that carry no data.
pub const DEFAULT_HEADER_ROWS: usize = 5;

/// Generic entity that appears identically in every element table.
pub const DEFAULT_PLACEHOLDER: &str = "TRAVELER";

// Positional column layout of the source tables
pub const NAME_COLUMN: usize = 1;
pub const ROLE_COLUMN: usize = 2;
pub const ARTIFACT_SETS_COLUMN: usize = 4;
pub const MAIN_STATS_COLUMN: usize = 5;
pub const SUBSTATS_COLUMN: usize = 6;

/// Name-column values that mark banners and notes rather than characters.
pub const NOISE_MARKERS: [&str; 4] = ["4 STAR", "5 STAR", "NOTES", "*portrait \npending*"];
pub const TIMESTAMP_MARKER_PREFIX: &str = "Last Updated:";

/// Marks the preferred role of a character.
pub const PREFERRED_MARKER: char = '✩';

// Continuation markers that glue a line onto its predecessor
pub const CONTINUATION_MARKERS: [&str; 2] = ["~=", "≈"];
pub const CONTINUATION_JOINER: &str = " / ";

/// Delimiter the canonicalizers rewrite every separator to.
pub const DELIMITER: char = '|';

/// Separates the slot from the stat text in a main-stat line.
pub const SLOT_SEPARATOR: &str = " - ";

/// Tokens that never name an artifact set.
pub const SET_STOPLIST: [&str; 3] = ["", "Any", "set"];

// Aggregate bucket for slots whose main stat is fixed
pub const FIXED_SLOTS_LABEL: &str = "Flower/Feather";
pub const FIXED_MAIN_STAT_LABEL: &str = "Fixed Main Stats (HP / ATK)";

// Output file names and template token
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TEMPLATE_PATH: &str = "artifact_evaluator_template.html";
pub const TEMPLATE_PLACEHOLDER: &str = "ARTIFACT_DATA_PLACEHOLDER";
pub const FACT_TABLE_FILE: &str = "output.csv";
pub const INDEX_BUNDLE_FILE: &str = "artifact_data.json";
pub const EVALUATOR_PAGE_FILE: &str = "artifact_evaluator.html";
pub const REPORT_FILE: &str = "summary.txt";

/// Field delimiter of the fact table.
pub const FACT_TABLE_DELIMITER: char = '|';

// Diagnostics thresholds
pub const LOW_FREQUENCY_THRESHOLD: usize = 2;
pub const LONG_VALUE_CHARS: usize = 50;
