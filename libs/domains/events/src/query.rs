//! Listing request types: raw query parameters, their normalized form,
//! the store predicate and the paginated response.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::config::EventsConfig;
use crate::error::{EventError, EventResult};
use crate::identity::CallerId;
use crate::models::{Event, EventCategory};

/// 1-based page number and page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> EventResult<Self> {
        if page == 0 || limit == 0 {
            return Err(EventError::InvalidPagination { page, limit });
        }
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Records preceding this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Query string of `GET /events`.
///
/// Values arrive as text so that malformed numbers fall back to defaults
/// instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsParams {
    /// Case-insensitive substring of the event name
    pub search: Option<String>,
    /// Exact category, e.g. `movieShow`
    pub category: Option<String>,
    /// Page number, default 1
    #[param(value_type = Option<u64>, minimum = 1)]
    pub page: Option<String>,
    /// Page size, default 10, capped by the server maximum
    #[param(value_type = Option<u64>, minimum = 1)]
    pub limit: Option<String>,
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).filter(|v| *v > 0)
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ListEventsParams {
    /// Apply defaults and limits from `config`.
    ///
    /// A missing, non-numeric or non-positive `page` becomes 1 and such a
    /// `limit` becomes the default page size; a `limit` above the maximum is
    /// clamped. Blank `search`/`category` are dropped. With strict validation
    /// an unknown category is rejected; otherwise it simply matches nothing.
    pub fn normalize(self, config: &EventsConfig) -> EventResult<EventQuery> {
        let page = positive(self.page.as_deref()).unwrap_or(1);
        let limit = positive(self.limit.as_deref())
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        let category = non_blank(self.category);
        if config.strict_validation {
            if let Some(category) = &category {
                EventCategory::from_str(category).map_err(|_| {
                    EventError::Validation(format!("unknown category '{category}'"))
                })?;
            }
        }

        Ok(EventQuery {
            search: non_blank(self.search),
            category,
            pagination: Pagination::new(page, limit)?,
        })
    }
}

/// A normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub pagination: Pagination,
}

impl EventQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            search: None,
            category: None,
            pagination,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn predicate_for(&self, caller: CallerId) -> EventPredicate {
        EventPredicate {
            creator: caller.into(),
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }
}

/// Selection the store evaluates: owner equality, plus an optional
/// case-insensitive name substring and an optional exact category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPredicate {
    pub creator: Uuid,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl EventPredicate {
    pub fn owned_by(creator: Uuid) -> Self {
        Self {
            creator,
            search: None,
            category: None,
        }
    }

    /// In-memory evaluation used by [`InMemoryEventStore`](crate::InMemoryEventStore).
    /// Search folds case with Unicode `to_lowercase`, which only approximates
    /// MongoDB's `$options: "i"` for some non-ASCII names.
    pub fn matches(&self, event: &Event) -> bool {
        if event.creator != self.creator {
            return false;
        }
        if let Some(category) = &self.category {
            if event.event_category.as_str() != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !event
                .event_name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total: u64) -> Self {
        let total_pages = total.div_ceil(pagination.limit());
        Self {
            page: pagination.page(),
            limit: pagination.limit(),
            total,
            total_pages,
            has_next_page: pagination.page() < total_pages,
            has_previous_page: pagination.page() > 1,
        }
    }
}

/// One page of the caller's events.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryResult {
    pub data: Vec<Event>,
    pub meta: PageMeta,
}
