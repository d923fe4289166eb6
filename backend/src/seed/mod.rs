use indexmap::IndexMap;
use tracing::{info, warn};

use crate::db::{ProductStore, StorageHandle};
use crate::models::NewProduct;

/// What the startup seeder did. Seeding never fails the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Unavailable,
    Skipped { existing: i64 },
    Seeded { inserted: u64 },
    Failed(String),
}

/// Insert the sample catalog, but only into an empty collection.
///
/// Any non-empty collection is left alone, even if it holds none of the
/// sample products.
pub async fn seed_products_if_empty(storage: &StorageHandle) -> SeedOutcome {
    let Some(store) = storage.as_deref() else {
        info!("No storage configured; skipping catalog seed");
        return SeedOutcome::Unavailable;
    };

    let outcome = match try_seed(store).await {
        Ok(outcome) => outcome,
        Err(e) => SeedOutcome::Failed(e),
    };

    match &outcome {
        SeedOutcome::Seeded { inserted } => info!(inserted, "Seeded sample catalog"),
        SeedOutcome::Skipped { existing } => {
            info!(existing, "Product collection not empty; skipping seed")
        }
        SeedOutcome::Failed(e) => warn!(error = %e, "Catalog seed failed; continuing"),
        SeedOutcome::Unavailable => {}
    }
    outcome
}

async fn try_seed(store: &dyn ProductStore) -> Result<SeedOutcome, String> {
    let existing = store.count_products().await.map_err(|e| e.to_string())?;
    if existing != 0 {
        return Ok(SeedOutcome::Skipped { existing });
    }

    let products = sample_products();
    for p in &products {
        p.validate().map_err(|e| e.to_string())?;
    }

    let inserted = store
        .insert_products(&products)
        .await
        .map_err(|e| e.to_string())?;
    Ok(SeedOutcome::Seeded { inserted })
}

// ── Sample catalog ────────────────────────────────────────────────────────────

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn specs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    slug: &str,
    title: &str,
    subtitle: &str,
    description: &str,
    price: f64,
    category: &str,
    hero_image: &str,
    images: &[&str],
    features: &[&str],
    spec_pairs: &[(&str, &str)],
    tags: &[&str],
) -> NewProduct {
    NewProduct {
        slug: slug.to_string(),
        title: title.to_string(),
        subtitle: Some(subtitle.to_string()),
        description: Some(description.to_string()),
        price: Some(price),
        category: category.to_string(),
        in_stock: true,
        hero_image: Some(hero_image.to_string()),
        images: strings(images),
        features: strings(features),
        tags: strings(tags),
        specs: specs(spec_pairs),
    }
}

/// The fixed six-product catalog written on first start.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        sample(
            "aurora-array-pro",
            "Aurora Array Pro",
            "Line-array speaker system for arenas",
            "High-SPL line-array with precision waveguides and redundant power for mission-critical venues.",
            11999.0,
            "speakers",
            "/products/array.svg",
            &["/products/array.svg", "/products/amp.svg"],
            &[
                "140 dB peak SPL",
                "Dual-redundant PSU",
                "Rigging hardware included",
                "IP54 weather rating",
            ],
            &[
                ("Frequency Response", "45 Hz – 18 kHz"),
                ("Coverage", "110° x 10°"),
                ("Weight", "24 kg"),
                ("Amplification", "Powered"),
            ],
            &["array", "arena", "touring"],
        ),
        sample(
            "nebula-s12-sub",
            "Nebula S12 Sub",
            "Compact 12-inch subwoofer",
            "Tight, musical low-end for theaters and houses of worship with cardioid presets.",
            1499.0,
            "speakers",
            "/products/subwoofer.svg",
            &["/products/subwoofer.svg"],
            &["Cardioid mode", "DSP presets", "Steel grille"],
            &[("LF Driver", "12\""), ("Max SPL", "125 dB"), ("Weight", "18 kg")],
            &["sub", "install", "theater"],
        ),
        sample(
            "orion-tower-x",
            "Orion Tower X",
            "Floorstanding hi-fi tower",
            "Reference-grade tower with ribbon tweeter and phase-aligned crossover.",
            2999.0,
            "speakers",
            "/products/tower.svg",
            &["/products/tower.svg"],
            &["Ribbon tweeter", "Walnut veneer", "Bi-amp ready"],
            &[
                ("Drivers", "2x 6.5\" + ribbon"),
                ("Impedance", "4Ω"),
                ("Sensitivity", "90 dB"),
            ],
            &["hifi", "tower"],
        ),
        sample(
            "vertex-dsp-2u",
            "Vertex DSP 2U",
            "Rackmount audio processor",
            "96kHz, 64-bit float processing with Dante and AES67.",
            2499.0,
            "electronics",
            "/products/dsp.svg",
            &["/products/dsp.svg"],
            &["Dante 64x64", "AES67", "Redundant PSU"],
            &[("Latency", "< 0.7 ms"), ("Sample Rate", "96 kHz")],
            &["dsp", "install"],
        ),
        sample(
            "quantum-amp-8",
            "Quantum AMP-8",
            "8-channel network amplifier",
            "Class-D efficiency with per-channel DSP and web control.",
            3299.0,
            "electronics",
            "/products/amp.svg",
            &["/products/amp.svg"],
            &["8x 500W @ 4Ω", "PoE control", "HTTP API"],
            &[("THD+N", "0.03%"), ("SNR", ">110 dB")],
            &["amp", "networked"],
        ),
        sample(
            "luna-bookshelf-r",
            "Luna Bookshelf R",
            "Compact reference monitor",
            "Nearfield precision with room calibration via mobile app.",
            799.0,
            "speakers",
            "/products/bookshelf.svg",
            &["/products/bookshelf.svg"],
            &["Room EQ", "Bluetooth LE", "Balanced inputs"],
            &[("Woofer", "5\""), ("Tweeter", "1\" dome")],
            &["studio", "bookshelf"],
        ),
    ]
}
