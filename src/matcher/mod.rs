use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::model::{PlantHeight, PlantRecord, PlantSize, PlantType, UserState};

/// One facet of a selection: either "no preference" or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    Any,
    Is(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::Any
    }
}

impl<T> Facet<T> {
    fn admits(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Facet::Any => true,
            Facet::Is(v) => pred(v),
        }
    }
}

impl<T: FromStr> FromStr for Facet<T> {
    type Err = T::Err;

    /// `any` (any case) or an empty string is the "no preference" sentinel.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("any") {
            return Ok(Facet::Any);
        }
        s.parse().map(Facet::Is)
    }
}

impl<T: fmt::Display> fmt::Display for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Any => f.write_str("any"),
            Facet::Is(v) => write!(f, "{v}"),
        }
    }
}

/// User-chosen facet values for one search or recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub state: Facet<UserState>,
    pub size: Facet<PlantSize>,
    pub flower_color: Facet<String>,
    pub height: Facet<PlantHeight>,
    pub plant_type: Facet<PlantType>,
    /// Only used when prompting the completion backend; local matching ignores it.
    pub postcode: Option<u32>,
}

impl FacetSelection {
    pub fn admits(&self, r: &PlantRecord) -> bool {
        self.state.admits(|s| r.state == *s)
            && self.size.admits(|s| r.plant_size == *s)
            && self.flower_color.admits(|c| r.flower_color.contains(c))
            && self.height.admits(|h| r.plant_height == *h)
            && self.plant_type.admits(|t| r.plant_type == *t)
    }
}

/// Returns every record satisfying all selected facets, in catalog order.
pub fn match_plants<'a>(catalog: &'a Catalog, selection: &FacetSelection) -> Vec<&'a PlantRecord> {
    catalog.records().iter().filter(|r| selection.admits(r)).collect()
}

/// Results shown to the user. An empty search is distinct from no search.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchResults {
    #[default]
    NotSearched,
    Searched(Vec<PlantRecord>),
}

impl SearchResults {
    pub fn record(&mut self, records: Vec<PlantRecord>) {
        *self = SearchResults::Searched(records);
    }

    pub fn has_searched(&self) -> bool {
        matches!(self, SearchResults::Searched(_))
    }

    pub fn records(&self) -> &[PlantRecord] {
        match self {
            SearchResults::NotSearched => &[],
            SearchResults::Searched(r) => r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::plant;
    use crate::model::FlowerColors;

    fn two() -> Catalog {
        Catalog::from_records(vec![
            plant("1", UserState::Nsw, PlantSize::Medium, PlantType::Shrub),
            plant("2", UserState::Vic, PlantSize::Medium, PlantType::Tree),
        ])
        .unwrap()
    }

    fn ids(rs: &[&PlantRecord]) -> Vec<String> {
        rs.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn no_preference_is_identity() {
        let c = two();
        let out = match_plants(&c, &FacetSelection::default());
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn state_only_selects_matching_record() {
        let c = two();
        let sel = FacetSelection { state: Facet::Is(UserState::Nsw), ..Default::default() };
        assert_eq!(ids(&match_plants(&c, &sel)), vec!["1"]);
    }

    #[test]
    fn facets_are_conjunctive() {
        let c = two();
        let sel = FacetSelection {
            size: Facet::Is(PlantSize::Medium),
            plant_type: Facet::Is(PlantType::Tree),
            ..Default::default()
        };
        assert_eq!(ids(&match_plants(&c, &sel)), vec!["2"]);

        let none = FacetSelection {
            state: Facet::Is(UserState::Nsw),
            plant_type: Facet::Is(PlantType::Tree),
            ..Default::default()
        };
        assert!(match_plants(&c, &none).is_empty());
    }

    #[test]
    fn flower_color_matches_any_listed_color() {
        let mut a = plant("1", UserState::Nsw, PlantSize::Small, PlantType::Shrub);
        a.flower_color = FlowerColors::from("Yellow, White");
        let mut b = plant("2", UserState::Nsw, PlantSize::Small, PlantType::Shrub);
        b.flower_color = FlowerColors::from("Red");
        let c = Catalog::from_records(vec![a, b]).unwrap();

        let sel = FacetSelection { flower_color: Facet::Is("White".into()), ..Default::default() };
        assert_eq!(ids(&match_plants(&c, &sel)), vec!["1"]);

        let lower = FacetSelection { flower_color: Facet::Is("white".into()), ..Default::default() };
        assert!(match_plants(&c, &lower).is_empty());
    }

    #[test]
    fn postcode_does_not_filter() {
        let c = two();
        let sel = FacetSelection { postcode: Some(9999), ..Default::default() };
        assert_eq!(match_plants(&c, &sel).len(), 2);
    }

    #[test]
    fn matching_is_deterministic() {
        let c = two();
        let sel = FacetSelection { size: Facet::Is(PlantSize::Medium), ..Default::default() };
        assert_eq!(match_plants(&c, &sel), match_plants(&c, &sel));
    }

    #[test]
    fn facet_parses_sentinel_and_values() {
        assert_eq!("ANY".parse::<Facet<UserState>>().unwrap(), Facet::Any);
        assert_eq!("".parse::<Facet<UserState>>().unwrap(), Facet::Any);
        assert_eq!("VIC".parse::<Facet<UserState>>().unwrap(), Facet::Is(UserState::Vic));
        assert!("Victoria".parse::<Facet<UserState>>().is_err());
        assert_eq!(Facet::Is(PlantHeight::Over30m).to_string(), ">30m");
        assert_eq!(Facet::<PlantHeight>::Any.to_string(), "any");
    }

    #[test]
    fn empty_search_differs_from_no_search() {
        let mut results = SearchResults::default();
        assert!(!results.has_searched());
        results.record(Vec::new());
        assert!(results.has_searched());
        assert!(results.records().is_empty());
    }
}
