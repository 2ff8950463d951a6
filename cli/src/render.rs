use std::fmt::Write;

use minegrid_core::Game;

/// Renders the field with 1-based column and row headers:
///
/// ```text
///  |123456789|
/// -|---------|
/// 1|.........|
/// ...
/// -|---------|
/// ```
pub fn render_board(game: &Game) -> String {
    let size = game.grid().size();
    let rule = format!("-|{}|\n", "-".repeat(usize::from(size)));

    let mut out = String::new();
    out.push_str(" |");
    for column in 1..=size {
        let _ = write!(out, "{column}");
    }
    out.push_str("|\n");
    out.push_str(&rule);

    for row in 0..size {
        let _ = write!(out, "{}|", row + 1);
        for col in 0..size {
            out.push(game.grid().cell_at((row, col)).glyph());
        }
        out.push_str("|\n");
    }
    out.push_str(&rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{Game, Grid};

    #[test]
    fn fresh_field_renders_all_hidden() {
        let game = Game::from_grid(Grid::with_mines(3, &[(0, 0)]).unwrap());

        let expected = " |123|\n\
                        -|---|\n\
                        1|...|\n\
                        2|...|\n\
                        3|...|\n\
                        -|---|\n";
        assert_eq!(render_board(&game), expected);
    }

    #[test]
    fn revealed_field_shows_explored_numbers_and_flags() {
        let mut game = Game::from_grid(Grid::with_mines(3, &[(2, 2)]).unwrap());
        game.reveal((0, 0)).unwrap();
        game.toggle_flag((2, 2)).unwrap();

        let expected = " |123|\n\
                        -|---|\n\
                        1|///|\n\
                        2|/11|\n\
                        3|/1*|\n\
                        -|---|\n";
        assert_eq!(render_board(&game), expected);
    }

    #[test]
    fn lost_field_shows_every_mine() {
        let mut game = Game::from_grid(Grid::with_mines(3, &[(0, 0), (2, 2)]).unwrap());
        game.reveal((0, 0)).unwrap();

        let expected = " |123|\n\
                        -|---|\n\
                        1|X..|\n\
                        2|...|\n\
                        3|..X|\n\
                        -|---|\n";
        assert_eq!(render_board(&game), expected);
    }
}
