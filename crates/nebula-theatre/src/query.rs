//! Listing filters.

use crate::model::Theatre;
use nebula_store::ResourceFilter;
use serde::Deserialize;

/// Optional exact-match filters accepted by `GET /theatres`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TheatreQuery {
    /// Filter by theatre name.
    pub name: Option<String>,
    /// Filter by city.
    pub city: Option<String>,
    /// Filter by state.
    pub state: Option<String>,
    /// Filter by country.
    pub country: Option<String>,
}

fn field_matches(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual.as_deref() == Some(w.as_str()),
    }
}

impl ResourceFilter<Theatre> for TheatreQuery {
    fn matches(&self, theatre: &Theatre) -> bool {
        let f = &theatre.fields;
        self.name.as_ref().map_or(true, |n| *n == f.name)
            && field_matches(&self.city, &f.city)
            && field_matches(&self.state, &f.state)
            && field_matches(&self.country, &f.country)
    }
}
