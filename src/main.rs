use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use rewild::catalog::Catalog;
use rewild::cli::{Args, Command};
use rewild::config::Config;
use rewild::image::ImageLookup;
use rewild::log;
use rewild::matcher::{self, FacetSelection, SearchResults};
use rewild::provider::{self, DynBackend};
use rewild::recommend::Requester;
use rewild::ux;

fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = Config::resolve(args.config.as_deref())?;
    if let Some(d) = &args.dataset {
        cfg.dataset = d.clone();
    }
    if let Some(r) = &args.root {
        cfg.root = r.clone();
    }
    Ok(cfg)
}

fn backend(cfg: &Config, args: &Args) -> anyhow::Result<DynBackend> {
    let inner = provider::make_backend(cfg)?;
    if !args.save_exchanges {
        return Ok(inner);
    }
    let rec = log::RecordingBackend::new(inner, Path::new(&cfg.root), Uuid::new_v4());
    tracing::info!(dir = %rec.dir().display(), "exchange artifacts enabled");
    Ok(Arc::new(rec))
}

/// A missing credential is reported like any other request failure.
fn requester(cfg: &Config, args: &Args) -> Option<Requester> {
    match backend(cfg, args) {
        Ok(b) => Some(Requester::new(b, cfg.recommendation_count)),
        Err(e) => {
            ux::show_error(&format!("{e:#}"));
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log::init_tracing(args.debug);
    let cfg = resolve_config(&args)?;

    match &args.command {
        Command::Facets => {
            let catalog = Catalog::load(&cfg.dataset).context("failed to load plant dataset")?;
            ux::show_facets(&catalog.facets());
        }
        Command::Search(sel) => {
            let catalog = Catalog::load(&cfg.dataset).context("failed to load plant dataset")?;
            let sel = FacetSelection::from(sel.clone());
            let mut results = SearchResults::default();
            results.record(matcher::match_plants(&catalog, &sel).into_iter().cloned().collect());
            ux::show_results("RECOMMENDED PLANTS", &results, false);
        }
        Command::Recommend { selection, images } => {
            let Some(requester) = requester(&cfg, &args) else { return Ok(()) };
            let sel = FacetSelection::from(selection.clone());

            let pb = ux::spinner("Loading...");
            let outcome = requester.submit(&sel).await;
            pb.finish_and_clear();

            if let Err(e) = outcome {
                ux::show_error(&e.to_string());
                return Ok(());
            }
            let results = requester.results();
            ux::show_results("SUGGESTED PLANTS", &results, true);

            if *images {
                let lookup = ImageLookup::new(&cfg)?;
                let urls = futures::future::join_all(
                    results.records().iter().map(|p| lookup.thumbnail_url(&p.scientific_name)),
                )
                .await;
                for (p, url) in results.records().iter().zip(urls) {
                    ux::show_image(&p.scientific_name, url.as_deref());
                }
            }
        }
        Command::Care { name } => {
            let Some(requester) = requester(&cfg, &args) else { return Ok(()) };
            let pb = ux::spinner("Loading...");
            let outcome = requester.care_info(name).await;
            pb.finish_and_clear();
            match outcome {
                Ok(info) => ux::show_care(name, &info),
                Err(e) => ux::show_error(&e.to_string()),
            }
        }
        Command::Image { name } => {
            let lookup = ImageLookup::new(&cfg)?;
            let url = lookup.thumbnail_url(name).await;
            ux::show_image(name, url.as_deref());
        }
    }

    Ok(())
}
