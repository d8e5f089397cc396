use anyhow::Result;
use std::fmt::Write as _;
use tracing::{error, info};
use vocaboard::{
    board::{BoardCatalog, TileAction},
    config::AppConfig,
    init_logging, init_tracing,
    speech::build_speaker,
    store::{CustomTiles, FileStore, KeyValueStore},
    ui, App, BoardSession,
};

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    run(config)
}

fn run(config: AppConfig) -> Result<()> {
    init_logging(&config);
    let trace_path = init_tracing(&config);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        trace = ?trace_path,
        "vocaboard starting"
    );

    let catalog = config.load_catalog()?;
    let source = match &config.catalog_file {
        Some(path) => path.display().to_string(),
        None => config.catalog.label().to_string(),
    };
    let data_dir = config.resolved_data_dir();
    info!(
        catalog = %source,
        boards = catalog.len(),
        data_dir = %data_dir.display(),
        "catalog ready"
    );
    let store: Box<dyn KeyValueStore> = Box::new(FileStore::new(data_dir));
    let custom = CustomTiles::load(store);

    if config.list_boards {
        print!("{}", list_boards(&catalog, &custom));
        return Ok(());
    }

    let speaker = build_speaker(
        config.speech_command()?,
        config.no_speech,
        config.speech_settings(),
    );
    let mut app = App::new(BoardSession::new(catalog, custom, speaker));
    let result = ui::run_app(&mut app);

    if let Err(ref err) = result {
        error!(error = %format!("{err:#}"), "exit with error");
    }
    info!("vocaboard exiting");
    result
}

/// Plain-text dump of every board, user tiles included, in catalog order.
fn list_boards<K: KeyValueStore>(catalog: &BoardCatalog, custom: &CustomTiles<K>) -> String {
    let mut output = String::new();
    for board in catalog.boards() {
        let marker = if board.id == catalog.home_id() {
            " (home)"
        } else {
            ""
        };
        let _ = writeln!(output, "{} [{}]{marker}", board.title, board.id);
        for tile in &board.tiles {
            let _ = writeln!(output, "  - {}", describe_action(&tile.label, &tile.action));
        }
        for tile in custom.for_board(&board.id) {
            let _ = writeln!(
                output,
                "  - {} (custom)",
                describe_action(&tile.label, &tile.action)
            );
        }
    }
    let orphaned: Vec<_> = custom
        .all()
        .iter()
        .filter(|user| !catalog.contains(&user.board_id))
        .collect();
    if !orphaned.is_empty() {
        output.push_str("Custom tiles on unknown boards\n");
        for user in orphaned {
            let _ = writeln!(output, "  - {} [{}]", user.tile.label, user.board_id);
        }
    }
    let core: Vec<&str> = catalog
        .core_tiles()
        .iter()
        .map(|tile| tile.label.as_str())
        .collect();
    if !core.is_empty() {
        let _ = writeln!(output, "Core words: {}", core.join(", "));
    }
    output
}

fn describe_action(label: &str, action: &TileAction) -> String {
    match action {
        TileAction::Say { text: Some(text) } if !text.trim().is_empty() && text != label => {
            format!("{label}: \"{}\"", text.trim())
        }
        TileAction::Say { .. } => label.to_string(),
        TileAction::Open { board_id } => format!("{label} -> {board_id}"),
        TileAction::Back => format!("{label} (back)"),
        TileAction::Clear => format!("{label} (clear)"),
        TileAction::DeleteLast => format!("{label} (delete last word)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocaboard::board::BuiltinCatalog;
    use vocaboard::store::{MemoryStore, TileDraft, USER_TILES_KEY};

    #[test]
    fn list_boards_includes_every_board_and_core_words() {
        let catalog = BuiltinCatalog::Classic.build();
        let custom = CustomTiles::load(MemoryStore::new());
        let output = list_boards(&catalog, &custom);
        assert!(output.starts_with("Home [home] (home)\n"));
        assert!(output.contains("Needs -> needs"));
        assert!(output.contains("call nurse: \"Please call the nurse.\""));
        assert!(output.contains("Pain [pain]"));
        assert!(output.contains("Core words: "));
        assert!(!output.contains("(custom)"));
    }

    #[test]
    fn list_boards_marks_custom_and_orphaned_tiles() {
        let catalog = BuiltinCatalog::Classic.build();
        let mut store = MemoryStore::new();
        store
            .set(
                USER_TILES_KEY,
                r#"[{"boardId": "gone", "id": "u-1", "label": "Lost"}]"#,
            )
            .expect("seed");
        let mut custom = CustomTiles::load(store);
        custom
            .add("needs", &TileDraft::labeled("Doctor"))
            .expect("add");
        let output = list_boards(&catalog, &custom);
        assert!(output.contains("  - Doctor (custom)\n"));
        assert!(output.contains("Custom tiles on unknown boards\n  - Lost [gone]\n"));
    }
}
