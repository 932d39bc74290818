use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// ========================================
/// Plant dataset records (wire keys are fixed by the bundled JSON)
/// ========================================

/// An enumerated attribute whose text form is its wire label.
pub trait Label: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.label() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownLabel {}

fn parse_label<T: Label>(kind: &'static str, s: &str) -> Result<T, UnknownLabel> {
    T::from_label(s.trim()).ok_or_else(|| UnknownLabel { kind, value: s.to_string() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserState {
    #[serde(rename = "ACT")]
    Act,
    #[serde(rename = "NSW")]
    Nsw,
    #[serde(rename = "NT")]
    Nt,
    #[serde(rename = "QLD")]
    Qld,
    #[serde(rename = "SA")]
    Sa,
    #[serde(rename = "TAS")]
    Tas,
    #[serde(rename = "VIC")]
    Vic,
    #[serde(rename = "WA")]
    Wa,
}

impl Label for UserState {
    const ALL: &'static [Self] = &[
        Self::Act, Self::Nsw, Self::Nt, Self::Qld,
        Self::Sa, Self::Tas, Self::Vic, Self::Wa,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Act => "ACT",
            Self::Nsw => "NSW",
            Self::Nt => "NT",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Tas => "TAS",
            Self::Vic => "VIC",
            Self::Wa => "WA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantSize {
    Large,
    Medium,
    Others,
    Small,
}

impl Label for PlantSize {
    const ALL: &'static [Self] = &[Self::Large, Self::Medium, Self::Others, Self::Small];

    fn label(&self) -> &'static str {
        match self {
            Self::Large => "Large",
            Self::Medium => "Medium",
            Self::Others => "Others",
            Self::Small => "Small",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
    #[serde(rename = "Annual/Perennial")]
    AnnualPerennial,
    Others,
    Shrub,
    Tree,
}

impl Label for PlantType {
    const ALL: &'static [Self] = &[Self::AnnualPerennial, Self::Others, Self::Shrub, Self::Tree];

    fn label(&self) -> &'static str {
        match self {
            Self::AnnualPerennial => "Annual/Perennial",
            Self::Others => "Others",
            Self::Shrub => "Shrub",
            Self::Tree => "Tree",
        }
    }
}

/// Bucketed mature height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantHeight {
    #[serde(rename = "0-1m")]
    UpTo1m,
    #[serde(rename = "1-5m")]
    From1To5m,
    #[serde(rename = "5-10m")]
    From5To10m,
    #[serde(rename = "10-20m")]
    From10To20m,
    #[serde(rename = "20-30m")]
    From20To30m,
    #[serde(rename = ">30m")]
    Over30m,
}

impl Label for PlantHeight {
    const ALL: &'static [Self] = &[
        Self::UpTo1m, Self::From1To5m, Self::From5To10m,
        Self::From10To20m, Self::From20To30m, Self::Over30m,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::UpTo1m => "0-1m",
            Self::From1To5m => "1-5m",
            Self::From5To10m => "5-10m",
            Self::From10To20m => "10-20m",
            Self::From20To30m => "20-30m",
            Self::Over30m => ">30m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightRequirement {
    #[serde(rename = "Full Sun")]
    FullSun,
    #[serde(rename = "Full Sun to Part Shade")]
    FullSunToPartShade,
    #[serde(rename = "Half Sun / Half Shade")]
    HalfSunHalfShade,
    #[serde(rename = "Moderate/Dappled Shade")]
    ModerateDappledShade,
}

impl Label for LightRequirement {
    const ALL: &'static [Self] = &[
        Self::FullSun, Self::FullSunToPartShade,
        Self::HalfSunHalfShade, Self::ModerateDappledShade,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::FullSun => "Full Sun",
            Self::FullSunToPartShade => "Full Sun to Part Shade",
            Self::HalfSunHalfShade => "Half Sun / Half Shade",
            Self::ModerateDappledShade => "Moderate/Dappled Shade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindTolerance {
    Medium,
    Sheltered,
    #[serde(rename = "Wind/Salt tolerant")]
    WindSaltTolerant,
    #[serde(rename = "Wind Tolerant")]
    WindTolerant,
}

impl Label for WindTolerance {
    const ALL: &'static [Self] = &[
        Self::Medium, Self::Sheltered, Self::WindSaltTolerant, Self::WindTolerant,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Medium => "Medium",
            Self::Sheltered => "Sheltered",
            Self::WindSaltTolerant => "Wind/Salt tolerant",
            Self::WindTolerant => "Wind Tolerant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthRate {
    Fast,
    Medium,
    Slow,
    #[serde(rename = "Very fast")]
    VeryFast,
}

impl Label for GrowthRate {
    const ALL: &'static [Self] = &[Self::Fast, Self::Medium, Self::Slow, Self::VeryFast];

    fn label(&self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Medium => "Medium",
            Self::Slow => "Slow",
            Self::VeryFast => "Very fast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrostResistance {
    Hardy,
    Marginal,
    Tender,
}

impl Label for FrostResistance {
    const ALL: &'static [Self] = &[Self::Hardy, Self::Marginal, Self::Tender];

    fn label(&self) -> &'static str {
        match self {
            Self::Hardy => "Hardy",
            Self::Marginal => "Marginal",
            Self::Tender => "Tender",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kingdom {
    Plantae,
}

/// Survey location codes present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationId {
    #[serde(rename = "0f92c001ddc5d67bec3dfc4caed49ca1")]
    Site0f92,
    #[serde(rename = "3dd1ed7a6ab8f926d674dd3c485179c4")]
    Site3dd1,
}

macro_rules! label_from_str {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = UnknownLabel;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_label($kind, s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

label_from_str! {
    UserState => "state",
    PlantSize => "plant size",
    PlantType => "plant type",
    PlantHeight => "plant height",
    LightRequirement => "light requirement",
    WindTolerance => "wind tolerance",
    GrowthRate => "growth rate",
    FrostResistance => "frost resistance",
}

/// Individual flower colors, decoded from the dataset's comma-delimited field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FlowerColors(BTreeSet<String>);

impl FlowerColors {
    pub fn contains(&self, color: &str) -> bool {
        self.0.contains(color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for FlowerColors {
    fn from(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<String> for FlowerColors {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<FlowerColors> for String {
    fn from(colors: FlowerColors) -> Self {
        colors.0.into_iter().collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for FlowerColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        f.write_str(&joined)
    }
}

/// Per-state "introduced" (non-native) flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Introduced {
    #[serde(rename = "is_introduced_act")]
    pub act: bool,
    #[serde(rename = "is_introduced_tas")]
    pub tas: bool,
    #[serde(rename = "is_introduced_wa")]
    pub wa: bool,
    #[serde(rename = "is_introduced_vic")]
    pub vic: bool,
    #[serde(rename = "is_introduced_qld")]
    pub qld: bool,
    #[serde(rename = "is_introduced_nsw")]
    pub nsw: bool,
    #[serde(rename = "is_introduced_sa")]
    pub sa: bool,
    #[serde(rename = "is_introduced_nt")]
    pub nt: bool,
}

impl Introduced {
    pub fn in_state(&self, state: UserState) -> bool {
        match state {
            UserState::Act => self.act,
            UserState::Nsw => self.nsw,
            UserState::Nt => self.nt,
            UserState::Qld => self.qld,
            UserState::Sa => self.sa,
            UserState::Tas => self.tas,
            UserState::Vic => self.vic,
            UserState::Wa => self.wa,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    #[serde(rename = "guid")]
    pub id: String,
    pub location_id: LocationId,
    pub scientific_name: String,
    pub common_name: String,
    pub family: String,
    pub kingdom: Kingdom,
    pub count: u32,
    #[serde(rename = "UserState")]
    pub state: UserState,
    #[serde(rename = "Postcode")]
    pub postcode: u32,
    pub species_id: u64,
    pub plant_type: PlantType,
    pub plant_origin: String,
    pub light_requirement: LightRequirement,
    pub wind_tolerance: WindTolerance,
    pub growth_rate: GrowthRate,
    pub frost_resistant: FrostResistance,
    pub is_evergreen: bool,
    pub is_native: bool,
    pub plant_height: PlantHeight,
    pub plant_width: f64,
    pub plant_size: PlantSize,
    pub flower_color: FlowerColors,
    #[serde(default)]
    pub occurrence_by_state: String,
    #[serde(default)]
    pub flowering_month: String,
    #[serde(default)]
    pub climate_zone: String,
    #[serde(flatten)]
    pub introduced: Introduced,
    #[serde(rename = "Image URL")]
    pub image_url: String,
    #[serde(rename = "Summary")]
    pub summary: String,
}

impl PlantRecord {
    /// Builds a record for a plant name returned by the completion backend.
    ///
    /// Only `id` (a fresh UUID) and `scientific_name` are genuine. Every other
    /// field is a fixed default and must not be shown as real plant data.
    pub fn placeholder(scientific_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            location_id: LocationId::Site0f92,
            scientific_name: scientific_name.into(),
            common_name: "Common Name".into(),
            family: "Family".into(),
            kingdom: Kingdom::Plantae,
            count: 1,
            state: UserState::Nsw,
            postcode: 12345,
            species_id: 1,
            plant_type: PlantType::Shrub,
            plant_origin: "Origin".into(),
            light_requirement: LightRequirement::FullSun,
            wind_tolerance: WindTolerance::Sheltered,
            growth_rate: GrowthRate::Medium,
            frost_resistant: FrostResistance::Hardy,
            is_evergreen: false,
            is_native: true,
            plant_height: PlantHeight::From1To5m,
            plant_width: 1.0,
            plant_size: PlantSize::Medium,
            flower_color: FlowerColors::from("White"),
            occurrence_by_state: "Occurrence".into(),
            flowering_month: "Month".into(),
            climate_zone: "Zone".into(),
            introduced: Introduced::default(),
            image_url: "URL".into(),
            summary: "Summary".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for h in PlantHeight::ALL {
            assert_eq!(h.label().parse::<PlantHeight>().unwrap(), *h);
        }
        assert_eq!("Annual/Perennial".parse::<PlantType>().unwrap(), PlantType::AnnualPerennial);
        assert!("Bush".parse::<PlantType>().is_err());
    }

    #[test]
    fn unknown_label_names_the_facet() {
        let err = "Huge".parse::<PlantSize>().unwrap_err();
        assert_eq!(err.to_string(), "unknown plant size \"Huge\"");
    }

    #[test]
    fn flower_colors_split_and_trim() {
        let c = FlowerColors::from("Yellow,  White ,,Red");
        assert!(c.contains("White"));
        assert!(c.contains("Red"));
        assert!(!c.contains("white"));
        assert_eq!(c.to_string(), "Red, White, Yellow");
    }

    #[test]
    fn placeholder_only_carries_the_name() {
        let a = PlantRecord::placeholder("Banksia");
        let b = PlantRecord::placeholder("Banksia");
        assert_eq!(a.scientific_name, "Banksia");
        assert_ne!(a.id, b.id);
        assert_eq!(a.common_name, "Common Name");
        assert_eq!(a.state, UserState::Nsw);
        assert_eq!(a.plant_size, PlantSize::Medium);
        assert!(a.flower_color.contains("White"));
    }

    #[test]
    fn introduced_flags_by_state() {
        let i = Introduced { vic: true, ..Default::default() };
        assert!(i.in_state(UserState::Vic));
        assert!(!i.in_state(UserState::Nsw));
    }
}
