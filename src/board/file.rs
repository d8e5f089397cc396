use super::{Board, BoardCatalog, Tile, HOME_ID};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// On-disk catalog layout, shared by the JSON and YAML readers.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_home")]
    home: String,
    boards: Vec<Board>,
    #[serde(default)]
    core: Vec<Tile>,
}

fn default_home() -> String {
    HOME_ID.to_string()
}

/// Load a catalog from a `.json`, `.yaml` or `.yml` file and validate it.
pub fn load_catalog_file(path: &Path) -> Result<BoardCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file '{}'", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed: CatalogFile = if is_yaml {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid YAML catalog '{}'", path.display()))?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON catalog '{}'", path.display()))?
    };
    let catalog = catalog_from_parts(parsed)?;
    info!(
        path = %path.display(),
        boards = catalog.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

fn catalog_from_parts(file: CatalogFile) -> Result<BoardCatalog> {
    if file.boards.is_empty() {
        bail!("catalog must define at least one board");
    }

    let mut seen = HashSet::new();
    for board in &file.boards {
        if !seen.insert(board.id.as_str()) {
            bail!("duplicate board id '{}' in catalog", board.id);
        }
        for tile in &board.tiles {
            if tile.label.trim().is_empty() {
                bail!("tile '{}' on board '{}' has a blank label", tile.id, board.id);
            }
        }
    }
    for tile in &file.core {
        if tile.label.trim().is_empty() {
            bail!("core tile '{}' has a blank label", tile.id);
        }
    }

    // Dangling targets still render: navigation lands on the home board.
    let dangling = file
        .boards
        .iter()
        .flat_map(|board| board.tiles.iter())
        .chain(file.core.iter())
        .filter_map(Tile::target_board)
        .filter(|target| !seen.contains(target));
    for board_id in dangling {
        warn!(board_id, "tile opens a board missing from the catalog");
    }

    let home = file.home;
    match BoardCatalog::new(&home, file.boards, file.core) {
        Some(catalog) => Ok(catalog),
        None => bail!("catalog is missing its home board '{home}'"),
    }
}
