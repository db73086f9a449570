use async_trait::async_trait;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::{
    Result,
    prompt::{ConfirmPrompt, InputPrompt, Prompter, SelectPrompt},
};

/// Prompts on stderr and reads answers from stdin. Without an interactive
/// terminal every prompt is treated as cancelled.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    /// Create prompter with automatic TTY detection.
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal()
                && io::stderr().is_terminal(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    async fn read_answer(&self, question: String) -> Result<Option<String>> {
        if !self.interactive {
            return Ok(None);
        }

        let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
            eprint!("{question}");
            io::stderr().flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line.trim().to_string())
        })
        .await
        .map_err(color_eyre::Report::from)??;

        if answer.is_empty() {
            return Ok(None);
        }

        Ok(Some(answer))
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the numbered option list followed by the choice question.
fn render_select(prompt: &SelectPrompt) -> String {
    let mut out = format!("? {}\n", prompt.message);
    for (i, option) in prompt.options.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, option.label));
    }
    out.push_str(&format!("Enter choice (1-{}): ", prompt.options.len()));
    out
}

/// Maps a 1-based numeric answer, or an exact value, to an option value.
fn pick_option(prompt: &SelectPrompt, answer: &str) -> Option<String> {
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| prompt.options.get(i))
            .map(|o| o.value.clone());
    }

    prompt
        .options
        .iter()
        .find(|o| o.value == answer)
        .map(|o| o.value.clone())
}

fn is_yes(answer: &str) -> bool {
    answer.to_lowercase().starts_with('y')
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select(&self, prompt: SelectPrompt) -> Result<Option<String>> {
        if prompt.options.is_empty() {
            return Ok(None);
        }

        let answer = self.read_answer(render_select(&prompt)).await?;
        Ok(answer.and_then(|a| pick_option(&prompt, &a)))
    }

    async fn input(&self, prompt: InputPrompt) -> Result<Option<String>> {
        self.read_answer(format!("? {} ", prompt.message)).await
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> Result<bool> {
        let answer = self
            .read_answer(format!("? {} [y/N]: ", prompt.message))
            .await?;
        Ok(answer.is_some_and(|a| is_yes(&a)))
    }
}
