pub mod escape;
pub mod filter;
pub mod parse;
pub mod priority;
pub mod render;
pub mod time;
pub mod update;

pub use escape::escape_html;
pub use filter::{FilterField, FilterOptions, FilterSet, UnknownFilterField};
pub use parse::parse_rows;
pub use priority::{priority_rank, sort_by_priority};
pub use render::{Notice, NoticeKind, PageView, render_page};
pub use time::{format_clock, format_time};
pub use update::UpdateRecord;
