use cozy_chess::Color;
use std::fmt;
use crate::board::{Position, Rules};
use crate::error::{EngineError, Result};
use crate::player::{AiPlayer, Decision};
use crate::search::eval::{eval_bar_percent, evaluate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode { VsAi, VsHuman }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Checkmate { winner: Color },
    Draw,
    ToMove { side: Color, in_check: bool },
}

fn color_name(c: Color) -> &'static str {
    match c { Color::White => "white", Color::Black => "black" }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameStatus::Checkmate { winner } => write!(f, "Game over, {} wins by checkmate!", color_name(winner)),
            GameStatus::Draw => write!(f, "Game over, drawn position"),
            GameStatus::ToMove { side, in_check } => {
                let name = color_name(side);
                let mut cap = name.to_string();
                cap[..1].make_ascii_uppercase();
                write!(f, "{} to move", cap)?;
                if in_check { write!(f, ", {} is in check", name)?; }
                Ok(())
            }
        }
    }
}

/// One game between a human and either the AI or another human.
pub struct Session {
    position: Position,
    ai: AiPlayer,
    mode: GameMode,
    human_color: Color,
}

impl Session {
    pub fn new(ai: AiPlayer, mode: GameMode, human_color: Color) -> Self {
        Self { position: Position::startpos(), ai, mode, human_color }
    }

    pub fn with_position(mut self, position: Position) -> Self { self.position = position; self }

    pub fn position(&self) -> &Position { &self.position }
    pub fn mode(&self) -> GameMode { self.mode }
    pub fn human_color(&self) -> Color { self.human_color }
    pub fn ai(&self) -> &AiPlayer { &self.ai }

    pub fn new_game(&mut self) { self.position = Position::startpos(); }

    pub fn set_rating(&mut self, rating: i32) { self.ai.update_strength(rating); }

    pub fn set_mode(&mut self, mode: GameMode) { self.mode = mode; self.new_game(); }

    pub fn set_human_color(&mut self, color: Color) { self.human_color = color; self.new_game(); }

    pub fn ai_to_move(&self) -> bool {
        self.mode == GameMode::VsAi && self.position.turn() != self.human_color && !self.position.is_game_over()
    }

    /// Plays a human move given in UCI notation.
    pub fn play_human(&mut self, uci: &str) -> Result<()> {
        if self.mode == GameMode::VsAi && self.position.turn() != self.human_color {
            return Err(EngineError::NotYourTurn);
        }
        self.position.make_move_uci(uci)?;
        Ok(())
    }

    /// Lets the AI reply if it is its turn; `None` otherwise or when it has no move.
    pub fn play_ai(&mut self) -> Result<Option<Decision>> {
        if !self.ai_to_move() { return Ok(None); }
        self.ai.make_move(&mut self.position)
    }

    /// Takes back the last move; against the AI, also its reply so the human
    /// is to move again. Returns the number of plies undone.
    pub fn takeback(&mut self) -> Result<usize> {
        self.position.undo()?;
        let mut undone = 1;
        if self.mode == GameMode::VsAi && self.position.turn() != self.human_color && self.position.ply_count() > 0 {
            self.position.undo()?;
            undone += 1;
        }
        Ok(undone)
    }

    pub fn status(&self) -> GameStatus {
        let pos = &self.position;
        if pos.is_checkmate() { return GameStatus::Checkmate { winner: !pos.turn() }; }
        if pos.is_draw() { return GameStatus::Draw; }
        GameStatus::ToMove { side: pos.turn(), in_check: pos.in_check() }
    }

    /// Evaluation-bar height for the current position. Deterministic.
    pub fn eval_bar_percent(&self) -> f64 { eval_bar_percent(evaluate(&self.position)) }
}
