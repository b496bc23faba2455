//! Constants used throughout the dashboard core crate.
//!
//! Default paths mirror the layout the dashboard is normally launched from: the binary runs
//! inside `app/` with the data and model directories as siblings.

/// Default SQLite database holding the message table.
pub const DEFAULT_DATABASE_PATH: &str = "../data/DisasterResponse.db";

/// Default name of the message table.
pub const DEFAULT_TABLE_NAME: &str = "DisasterResponse";

/// Default serialized classifier.
pub const DEFAULT_MODEL_PATH: &str = "../models/nbsvm.json";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Reserved leading columns of the message table, in order.
pub const RESERVED_COLUMNS: [&str; 4] = ["id", "message", "original", "genre"];

/// Number of categories shown in the top-categories chart.
pub const TOP_CATEGORY_COUNT: usize = 5;

pub const GENRE_CHART_TITLE: &str = "Distribution of Message Genres";
pub const TOP_CATEGORIES_CHART_TITLE: &str = "Top Message Categories by Genres";
pub const GENRE_AXIS_TITLE: &str = "Genre";
pub const COUNT_AXIS_TITLE: &str = "Count";
