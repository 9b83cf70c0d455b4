//! Textual rendering of the board and roster
//!
//! Presentation only: the engine never consumes this output.

use crate::game::GameState;
use std::fmt::Write as FmtWrite;

/// Render the 5×5 board as a grid of tile symbols with sand counts
pub fn render_board(game: &GameState) -> String {
    let mut cells = vec![vec![String::new(); 5]; 5];
    for tile in game.board.tiles() {
        let sand = if tile.sand > 0 {
            format!("({})", tile.sand)
        } else {
            "   ".to_string()
        };
        cells[tile.coord.y as usize][tile.coord.x as usize] =
            format!("{:<2}{:<3}", tile.symbol, sand);
    }

    let rule = "-".repeat(6 * 5 + 4 * 3);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for row in cells {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
        out.push_str(&rule);
        out.push('\n');
    }
    out
}

/// Render one line per adventurer: position, water, inventory
pub fn render_roster(game: &GameState) -> String {
    let mut out = String::new();
    for adventurer in &game.adventurers {
        let items: Vec<&str> = adventurer.inventory.iter().map(|i| i.name()).collect();
        let _ = writeln!(
            out,
            "{} ({}) at {}. {}/{} water. Inventory: [{}]",
            adventurer.role.name(),
            adventurer.role.symbol(),
            game.board.tile(adventurer.tile).name,
            adventurer.water,
            adventurer.role.max_water(),
            items.join(", "),
        );
    }
    out
}

/// Full session snapshot: storm level, board, roster, parts collected
pub fn render_state(game: &GameState) -> String {
    format!(
        "Storm level: {}\n{}\n{}Boat parts collected: {}/4\n",
        game.hazard_deck.storm_level,
        render_board(game),
        render_roster(game),
        game.boat_parts_picked,
    )
}
