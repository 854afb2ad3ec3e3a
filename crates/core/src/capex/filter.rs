//! Company and division filter reconciliation.
//!
//! A filter value can come from three places, highest precedence first:
//!
//! 1. a row click on the summary table (division only), consumed once read;
//! 2. the dropdown selection;
//! 3. the persisted URL parameter, which only seeds the dropdown.
//!
//! Resolution is a pure function of those inputs. Values that are not in the
//! current option list fall back to the "All ..." sentinel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::types::{ALL_COMPANIES, ALL_DIVISIONS};

/// Which filter is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    /// Company filter.
    Company,
    /// Division filter.
    Division,
}

impl FilterDimension {
    /// The "no filter" sentinel value.
    #[must_use]
    pub const fn sentinel(self) -> &'static str {
        match self {
            Self::Company => ALL_COMPANIES,
            Self::Division => ALL_DIVISIONS,
        }
    }

    const fn subject(self) -> &'static str {
        match self {
            Self::Company => "data",
            Self::Division => "details",
        }
    }

    const fn plural(self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Division => "divisions",
        }
    }
}

/// The input that decided a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSource {
    /// Summary table row click.
    RowClick,
    /// Dropdown selection.
    Dropdown,
    /// Persisted URL parameter.
    Persisted,
    /// Nothing selected; the sentinel applies.
    Default,
}

/// Outcome of resolving one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResolution {
    /// Effective value, possibly the sentinel.
    pub effective: String,
    /// Input that won.
    pub source: FilterSource,
    /// Human-readable provenance for display.
    pub message: String,
    /// Value to persist; `None` clears the parameter.
    pub persisted: Option<String>,
}

impl FilterResolution {
    /// The value to filter on, or `None` when the sentinel is active.
    #[must_use]
    pub fn filter_value(&self) -> Option<&str> {
        self.persisted.as_deref()
    }
}

/// Filter values round-tripped through URL parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedFilters {
    /// Persisted company, absent for "All Companies".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Persisted division, absent for "All Divisions".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
}

/// Per-cycle filter inputs.
///
/// One render consumes a context and hands back the next one: the row click
/// and dropdown values are transient, only `persisted` carries over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterContext {
    /// Pending summary-table row click (row index).
    pub row_click: Option<usize>,
    /// Company dropdown selection made this cycle.
    pub company_dropdown: Option<String>,
    /// Division dropdown selection made this cycle.
    pub division_dropdown: Option<String>,
    /// Persisted filter parameters.
    pub persisted: PersistedFilters,
}

impl FilterContext {
    /// Context seeded from persisted parameters only.
    #[must_use]
    pub fn from_persisted(persisted: PersistedFilters) -> Self {
        Self {
            persisted,
            ..Self::default()
        }
    }

    /// Context for the following cycle: inputs consumed, state persisted.
    #[must_use]
    pub fn next(company: &FilterResolution, division: &FilterResolution) -> Self {
        Self::from_persisted(PersistedFilters {
            company: company.persisted.clone(),
            division: division.persisted.clone(),
        })
    }
}

/// Resolves filter inputs against the currently observed values.
pub struct FilterResolver;

impl FilterResolver {
    /// Builds a dropdown option list: the sentinel, then sorted distinct names.
    #[must_use]
    pub fn options<'a>(dimension: FilterDimension, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let distinct: BTreeSet<&str> = names.into_iter().collect();
        std::iter::once(dimension.sentinel())
            .chain(distinct.into_iter().filter(|n| *n != dimension.sentinel()))
            .map(str::to_string)
            .collect()
    }

    /// Resolves the company filter from the dropdown and persisted value.
    #[must_use]
    pub fn resolve_company(
        options: &[String],
        dropdown: Option<&str>,
        persisted: Option<&str>,
    ) -> FilterResolution {
        Self::resolve(FilterDimension::Company, options, None, dropdown, persisted)
    }

    /// Resolves the division filter; a row click beats the dropdown, which
    /// beats the persisted value.
    #[must_use]
    pub fn resolve_division(
        options: &[String],
        row_click: Option<&str>,
        dropdown: Option<&str>,
        persisted: Option<&str>,
    ) -> FilterResolution {
        Self::resolve(
            FilterDimension::Division,
            options,
            row_click,
            dropdown,
            persisted,
        )
    }

    fn resolve(
        dimension: FilterDimension,
        options: &[String],
        row_click: Option<&str>,
        dropdown: Option<&str>,
        persisted: Option<&str>,
    ) -> FilterResolution {
        let sentinel = dimension.sentinel();
        let known = |value: &str| value != sentinel && options.iter().any(|o| o == value);

        let (effective, source) = match (row_click.filter(|v| known(*v)), dropdown, persisted) {
            (Some(clicked), _, _) => (clicked, FilterSource::RowClick),
            (None, Some(selected), _) if known(selected) => (selected, FilterSource::Dropdown),
            (None, Some(_), _) => (sentinel, FilterSource::Default),
            (None, None, Some(saved)) if known(saved) => (saved, FilterSource::Persisted),
            (None, None, _) => (sentinel, FilterSource::Default),
        };

        let message = match source {
            FilterSource::RowClick => format!(
                "Showing {} for: **{effective}** (filtered by summary table click).",
                dimension.subject()
            ),
            FilterSource::Dropdown => format!(
                "Showing {} for: **{effective}** (filtered by dropdown).",
                dimension.subject()
            ),
            FilterSource::Persisted => format!(
                "Showing {} for: **{effective}** (restored from saved link).",
                dimension.subject()
            ),
            FilterSource::Default => {
                format!("Showing {} for all {}.", dimension.subject(), dimension.plural())
            }
        };

        FilterResolution {
            effective: effective.to_string(),
            source,
            message,
            persisted: (source != FilterSource::Default).then(|| effective.to_string()),
        }
    }
}
