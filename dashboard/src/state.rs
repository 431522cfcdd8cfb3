use crate::view::DashboardView;
use aggregator::{resolve_quick_range, resolve_quick_range_from};
use chrono::NaiveDate;
use tracing::{debug, info, warn};
use trendsense_core::{
    non_empty_input, parse_filter_date, CoreError, DashboardConfig, FilterState, OverallStats,
    SentimentRecord,
};

#[derive(Debug, Clone)]
pub enum Message {
    SetKeyword(String),
    SetSource(String),
    SetStartDate(String),
    SetEndDate(String),
    QuickRange(u32),
    ClearFilters,
    RecordsLoaded {
        generation: u64,
        records: Vec<SentimentRecord>,
    },
}

/// What the caller should do after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    /// Fetch records for `filters` and answer with
    /// [`Message::RecordsLoaded`] carrying the same `generation`.
    Refresh { generation: u64, filters: FilterState },
}

/// Filter selection and the most recent records for it.
///
/// Each filter change starts a new refresh generation. A load answered for an
/// older generation is dropped, so overlapping fetches can never overwrite
/// newer data with stale data.
pub struct DashboardState {
    config: DashboardConfig,
    filters: FilterState,
    records: Vec<SentimentRecord>,
    generation: u64,
    loaded: bool,
    today: Option<NaiveDate>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let filters =
            FilterState::default().with_quick_range(resolve_quick_range(config.default_range_days));
        Self::with_filters(config, filters, None)
    }

    /// Like [`DashboardState::new`] with "today" pinned to `today`.
    pub fn new_at(config: DashboardConfig, today: NaiveDate) -> Self {
        let filters = FilterState::default()
            .with_quick_range(resolve_quick_range_from(today, config.default_range_days));
        Self::with_filters(config, filters, Some(today))
    }

    fn with_filters(
        config: DashboardConfig,
        filters: FilterState,
        today: Option<NaiveDate>,
    ) -> Self {
        Self {
            config,
            filters,
            records: Vec::new(),
            generation: 0,
            loaded: false,
            today,
        }
    }

    /// The refresh to issue on first display.
    pub fn initial_command(&self) -> Command {
        Command::Refresh {
            generation: self.generation,
            filters: self.filters.clone(),
        }
    }

    pub fn update(&mut self, message: Message) -> Result<Command, CoreError> {
        match message {
            Message::SetKeyword(keyword) => {
                let mut filters = self.filters.clone();
                filters.keyword = non_empty_input(&keyword);
                Ok(self.apply_filters(filters))
            }
            Message::SetSource(source) => {
                let mut filters = self.filters.clone();
                filters.source = non_empty_input(&source);
                Ok(self.apply_filters(filters))
            }
            Message::SetStartDate(value) => {
                let mut filters = self.filters.clone();
                filters.start_date = parse_filter_date("start date", &value)?;
                filters.check_range()?;
                Ok(self.apply_filters(filters))
            }
            Message::SetEndDate(value) => {
                let mut filters = self.filters.clone();
                filters.end_date = parse_filter_date("end date", &value)?;
                filters.check_range()?;
                Ok(self.apply_filters(filters))
            }
            Message::QuickRange(days) => {
                let range = match self.today {
                    Some(today) => resolve_quick_range_from(today, days),
                    None => resolve_quick_range(days),
                };
                debug!("Quick range of {} days resolved to {}", days, range);
                let filters = self.filters.clone().with_quick_range(range);
                Ok(self.apply_filters(filters))
            }
            Message::ClearFilters => Ok(self.apply_filters(FilterState::default())),
            Message::RecordsLoaded {
                generation,
                records,
            } => {
                if generation != self.generation {
                    warn!(
                        "Discarding stale load for generation {} (current {})",
                        generation, self.generation
                    );
                    return Ok(Command::None);
                }
                info!(
                    "Loaded {} records for generation {}",
                    records.len(),
                    generation
                );
                self.records = records;
                self.loaded = true;
                Ok(Command::None)
            }
        }
    }

    /// Builds the display model for the current records.
    pub fn view(&self, overall: OverallStats) -> Result<DashboardView, CoreError> {
        DashboardView::build(&self.records, overall, &self.config)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn records(&self) -> &[SentimentRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once the current generation's records have arrived.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    fn apply_filters(&mut self, filters: FilterState) -> Command {
        if filters == self.filters {
            return Command::None;
        }
        self.filters = filters;
        self.generation += 1;
        self.loaded = false;
        Command::Refresh {
            generation: self.generation,
            filters: self.filters.clone(),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
