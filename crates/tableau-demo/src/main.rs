use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tableau_engine::logging::{init_logging, LoggingConfig};
use tableau_scene::{Application, SpriteCatalog};

#[derive(Parser, Debug)]
#[command(name = "tableau-demo", about = "Interactive sprite and circle scene")]
struct Args {
    /// Seed for spawn randomness; omit for an OS-seeded run.
    #[arg(long)]
    seed: Option<u64>,

    /// Sprite catalog JSON; the built-in catalog is used when absent.
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::default());

    let catalog = match &args.catalog {
        Some(path) => SpriteCatalog::from_path(path)
            .with_context(|| format!("failed to load sprite catalog {}", path.display()))?,
        None => SpriteCatalog::builtin(),
    };

    log::info!("sprite catalog: {} types", catalog.len());
    println!("click empty space to spawn, drag to move, double-click to remove");

    let mut app = Application::new()
        .title("Tableau")
        .size(800.0, 600.0)
        .catalog(catalog);
    if let Some(seed) = args.seed {
        app = app.seed(seed);
    }
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seed_and_catalog_path() {
        let args = Args::try_parse_from(["tableau-demo", "--seed", "42", "types.json"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.catalog, Some(PathBuf::from("types.json")));
    }

    #[test]
    fn defaults_to_builtin_catalog_and_random_seed() {
        let args = Args::try_parse_from(["tableau-demo"]).unwrap();
        assert_eq!(args.seed, None);
        assert!(args.catalog.is_none());
    }

    #[test]
    fn rejects_non_numeric_seed() {
        assert!(Args::try_parse_from(["tableau-demo", "--seed", "abc"]).is_err());
    }
}
