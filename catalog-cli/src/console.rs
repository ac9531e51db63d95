//! Interactive line-based chat.

use anyhow::Result;
use catalog_assistant::ChatSession;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

const PROMPT: &str = "you > ";

/// Words that end the session.
pub fn is_exit(input: &str) -> bool {
    matches!(input, "exit" | "quit")
}

/// Read questions until `exit`, `quit`, Ctrl-C or Ctrl-D and print each answer.
pub async fn run(mut session: ChatSession) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("Product Search Assistant");
    if let Some(failure) = session.retrieval().failure() {
        println!("(product search is unavailable: {failure})");
    }
    println!("Ask about the catalog, or type 'exit' to quit.\n");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if is_exit(input) {
                    break;
                }
                if let Err(e) = editor.add_history_entry(input) {
                    debug!(error = %e, "could not record history entry");
                }

                let reply = session.submit(input).await;
                println!("assistant > {}\n", reply.content);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    info!(turns = session.conversation().len(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words() {
        assert!(is_exit("exit"));
        assert!(is_exit("quit"));
        assert!(!is_exit("exit the store"));
        assert!(!is_exit("Quit smoking aids"));
    }
}
