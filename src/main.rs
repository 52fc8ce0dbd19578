//! Terminal driver for the cli-chess rules engine.
//!
//! Two players share one terminal and enter moves as raw coordinates.
//! Engine logs are enabled with `RUST_LOG`, for example
//! `RUST_LOG=cli_chess_engine=debug`.

use std::io::{self, Write};

use log::info;

use cli_chess_engine::movelist;
use cli_chess_engine::{Board, Position};

enum InputKind {
    Exit,
    Newgame,
    Help,
    Error,
    Moves(Position),
    GameMove(Position, Position),
}

/// Parses whitespace separated coordinates, all or nothing.
fn parse_coordinates(words: &[&str]) -> Option<Vec<u8>> {
    words.iter().map(|word| word.parse().ok()).collect()
}

impl From<&str> for InputKind {
    fn from(s: &str) -> Self {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["exit"] | ["quit"] => Self::Exit,
            ["newgame"] | ["ng"] => Self::Newgame,
            ["help"] => Self::Help,
            ["moves", rest @ ..] => match parse_coordinates(rest).as_deref() {
                Some(&[x, y]) => Self::Moves(Position::new(x, y)),
                _ => Self::Error,
            },
            _ => match parse_coordinates(&words).as_deref() {
                Some(&[x1, y1, x2, y2]) => {
                    Self::GameMove(Position::new(x1, y1), Position::new(x2, y2))
                }
                _ => Self::Error,
            },
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("newgame | ng => Begin a new game.");
    println!("moves x y => List the legal destinations of the piece on x y.");
    println!("help => Print this help text.");
    println!("exit => end CLI.");
    println!("\nTo make a move, enter the start and end coordinates.");
    println!("Example: 4 1 4 3 -> Move piece on x:4, y:1 to x:4, y:3.");
}

/// Reports the state of the side to move.
/// Returns true if the game is over.
fn report(board: &Board) -> bool {
    let side = board.side_to_move();
    if board.is_in_checkmate(side) {
        println!("{board}");
        println!("CHECKMATE! {} wins.", !side);
        info!("game over, {} wins by checkmate", !side);
        return true;
    }
    if board.check_stalemate() {
        println!("{board}");
        println!("The game is DRAWN via STALEMATE.");
        info!("game over, {side} is stalemated");
        return true;
    }
    if board.is_in_check(side) {
        println!("{side} is in CHECK.");
    }
    false
}

fn main() -> io::Result<()> {
    env_logger::init();

    println!("cli-chess 0.1.0\n");
    let mut input = String::new();
    let mut board = Board::start_position();

    loop {
        println!("{board}");
        print!("{} > ", board.side_to_move());
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match InputKind::from(input.trim()) {
            InputKind::Exit => break,
            InputKind::Newgame => {
                board = Board::start_position();
                println!("Starting new game...");
            }
            InputKind::Help => print_help(),
            InputKind::Error => println!("Invalid command: {}", input.trim()),
            InputKind::Moves(position) => match board.legal_destinations(position) {
                Ok(destinations) if destinations.is_empty() => {
                    println!("The piece on {position} cannot move.")
                }
                Ok(destinations) => println!("{}", movelist::display(&destinations)),
                Err(error) => println!("{error}"),
            },
            InputKind::GameMove(start, end) => match board.move_piece(start, end) {
                Ok(outcome) => {
                    if let Some(captured) = outcome.captured {
                        println!("{} captured {captured}.", outcome.kind);
                    }
                    board.pass_move();
                    if report(&board) {
                        println!("Press Enter to start a new game.");
                        io::stdin().read_line(&mut input)?;
                        board = Board::start_position();
                    }
                }
                Err(error) => println!("Illegal move, {error}. No action taken."),
            },
        }
    }
    Ok(())
}
