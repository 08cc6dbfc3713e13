pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{block, dim, empty, error, header, info, section, success, summary_row};
pub use progress::Spinner;
pub use table::{contributors_table, saved_searches_table};
pub use theme::{theme, Theme};
