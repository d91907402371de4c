//! My open JIRA issues: start-date resolution, search, formatting and the
//! two front ends (`jt view` and `jt list`).

mod date;
mod error;
mod fetch;
mod format;
mod list;
mod query;
mod report;
mod table;
mod tui;

pub use list::ListArgs;
pub use tui::ViewArgs;

pub use list::run as run_list;
pub use tui::run as run_view;
