// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-based terminal move source

use gridtoe_core::{GameError, MoveSource, Player};
use std::io::{self, BufRead, Write};

/// Prompts on `output` and reads one line of `input` per move
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> MoveSource for TerminalPrompt<R, W> {
    fn next_move(&mut self, player: &Player) -> Result<String, GameError> {
        let question = format!("{}'s turn ({}): ", player.name().unwrap_or("User"), player.symbol());
        match self.ask(&question) {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(GameError::InputClosed),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read move");
                Err(GameError::InputClosed)
            }
        }
    }

    fn play_again(&mut self) -> bool {
        match self.ask("Play again? [y/N]: ") {
            Ok(Some(answer)) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_is_personalised() {
        let mut out = Vec::new();
        let mut prompt = TerminalPrompt::new(Cursor::new("  b2 \n"), &mut out);

        let mv = prompt.next_move(&Player::human("X", Some("Ada".into()))).unwrap();
        assert_eq!(mv, "b2");
        drop(prompt);
        assert_eq!(String::from_utf8(out).unwrap(), "Ada's turn (X): ");
    }

    #[test]
    fn test_unnamed_player_is_user() {
        let mut out = Vec::new();
        let mut prompt = TerminalPrompt::new(Cursor::new("a1\n"), &mut out);
        prompt.next_move(&Player::human("O", None)).unwrap();
        drop(prompt);
        assert!(String::from_utf8(out).unwrap().starts_with("User's turn"));
    }

    #[test]
    fn test_eof_closes_input() {
        let mut prompt = TerminalPrompt::new(Cursor::new(""), io::sink());
        assert_eq!(
            prompt.next_move(&Player::human("X", None)),
            Err(GameError::InputClosed)
        );
        assert!(!prompt.play_again());
    }

    #[test]
    fn test_play_again_answers() {
        let mut prompt = TerminalPrompt::new(Cursor::new("YES\nn\n\n"), io::sink());
        assert!(prompt.play_again());
        assert!(!prompt.play_again());
        assert!(!prompt.play_again());
    }
}
