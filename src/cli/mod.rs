use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::matcher::{Facet, FacetSelection};
use crate::model::{PlantHeight, PlantSize, PlantType, UserState};

#[derive(Parser, Debug)]
#[command(name = "rewild", version, about = "Find native plants by location and preference")]
pub struct Args {
    /// TOML config file; missing keys use defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Plant dataset (JSON array); overrides the config file.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Directory under which `.rewild/tx/<id>/` exchange artifacts are saved.
    #[arg(long, global = true)]
    pub root: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Save each prompt/completion exchange as JSON.
    #[arg(long, global = true, default_value_t = false)]
    pub save_exchanges: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the distinct values of each facet in the dataset.
    Facets,
    /// Filter the local dataset.
    Search(SelectionArgs),
    /// Ask the completion backend for matching plants.
    Recommend {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Also look up a thumbnail for each suggestion.
        #[arg(long, default_value_t = false)]
        images: bool,
    },
    /// Ask the completion backend for care information.
    Care { name: String },
    /// Look up a thumbnail image URL.
    Image { name: String },
}

/// Facet values; `any` means no preference.
#[derive(ClapArgs, Debug, Clone)]
pub struct SelectionArgs {
    #[arg(long, default_value = "any")]
    pub state: Facet<UserState>,
    #[arg(long)]
    pub postcode: Option<u32>,
    #[arg(long, default_value = "any")]
    pub size: Facet<PlantSize>,
    #[arg(long = "flower-color", default_value = "any")]
    pub flower_color: Facet<String>,
    #[arg(long, default_value = "any")]
    pub height: Facet<PlantHeight>,
    #[arg(long = "type", default_value = "any")]
    pub plant_type: Facet<PlantType>,
}

impl From<SelectionArgs> for FacetSelection {
    fn from(a: SelectionArgs) -> Self {
        FacetSelection {
            state: a.state,
            size: a.size,
            flower_color: a.flower_color,
            height: a.height,
            plant_type: a.plant_type,
            postcode: a.postcode,
        }
    }
}
