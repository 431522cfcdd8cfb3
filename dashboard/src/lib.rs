//! Display side of the sentiment dashboard: formatting helpers, the filter
//! state machine, and the view model handed to whatever renders the page.

pub mod format;
pub mod state;
pub mod view;

pub use format::*;
pub use state::{Command, DashboardState, Message};
pub use view::{DashboardView, KeywordRow, RecentRow, SentimentBadge, SummaryCard, TrendRow};
