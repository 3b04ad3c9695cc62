use std::io::Write;

use kanban_board::{ChatError, ChatSession};
use kanban_core::ChatBackend;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::root_commands::ChatArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::render;

/// Handle `kanban chat`.
pub async fn handle(args: &ChatArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let backend = ctx.chat_backend()?;
    let mut session = ChatSession::new();

    if args.message.is_empty() {
        return interactive(&backend, &mut session).await;
    }

    let text = args.message.join(" ");
    if flags.format == OutputFormat::Table {
        stream_turn(&backend, &mut session, &text).await?;
        return Ok(());
    }

    let (rendered, result) = buffered_turn(&backend, &mut session, &text, flags.format).await?;
    if let Some(rendered) = rendered {
        println!("{rendered}");
    }
    result.map_err(Into::into)
}

/// Run one turn without streaming and render the conversation afterwards.
///
/// The conversation is rendered even when the turn fails, so a partial reply
/// is still shown.
async fn buffered_turn<B: ChatBackend + ?Sized>(
    backend: &B,
    session: &mut ChatSession,
    text: &str,
    format: OutputFormat,
) -> anyhow::Result<(Option<String>, Result<(), ChatError>)> {
    let result = session.send(backend, text, |_, _| {}).await;
    let rendered = if session.messages().is_empty() {
        None
    } else {
        Some(render(session.messages(), format)?)
    };
    Ok((rendered, result))
}

/// Run one turn, printing reply chunks to stdout as they arrive.
async fn stream_turn<B: ChatBackend + ?Sized>(
    backend: &B,
    session: &mut ChatSession,
    text: &str,
) -> Result<(), ChatError> {
    let mut stdout = std::io::stdout();
    let result = session
        .send(backend, text, |chunk, _| {
            if let Err(error) = write!(stdout, "{chunk}").and_then(|()| stdout.flush()) {
                tracing::debug!(%error, "failed to write chat chunk to stdout");
            }
        })
        .await;
    println!();
    result
}

enum Line<'a> {
    Exit,
    Clear,
    Skip,
    Message(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    match line.trim() {
        "" => Line::Skip,
        "/exit" | "/quit" => Line::Exit,
        "/clear" => Line::Clear,
        text => Line::Message(text),
    }
}

async fn interactive<B: ChatBackend + ?Sized>(
    backend: &B,
    session: &mut ChatSession,
) -> anyhow::Result<()> {
    eprintln!("Ask about your board. /clear resets the conversation, /exit quits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match classify(&line) {
            Line::Exit => break,
            Line::Skip => {}
            Line::Clear => match session.clear() {
                Ok(()) => eprintln!("(conversation cleared)"),
                Err(error) => eprintln!("{error}"),
            },
            Line::Message(text) => {
                if let Err(error) = stream_turn(backend, session, text).await {
                    tracing::debug!(%error, "chat turn failed");
                    eprintln!("{error}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use futures::StreamExt;
    use kanban_board::{ChatError, ChatSession};
    use kanban_core::{ChatBackend, ChatMessage, ChunkStream, StreamError};

    use super::{Line, buffered_turn, classify};
    use crate::cli::OutputFormat;

    /// Sends one chunk, then drops the connection.
    struct DroppingBackend;

    #[async_trait]
    impl ChatBackend for DroppingBackend {
        async fn stream_chat(&self, _messages: &[ChatMessage]) -> Result<ChunkStream, StreamError> {
            let items = vec![
                Ok("Start with ".to_string()),
                Err(StreamError::Transport("connection reset".into())),
            ];
            Ok(futures::stream::iter(items).boxed())
        }
    }

    #[tokio::test]
    async fn failed_turn_still_renders_partial_reply() {
        let mut session = ChatSession::new();
        let (rendered, result) =
            buffered_turn(&DroppingBackend, &mut session, "what next?", OutputFormat::Json)
                .await
                .expect("render");

        assert!(matches!(result, Err(ChatError::Stream(m)) if m.contains("connection reset")));
        let rendered = rendered.expect("conversation rendered");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[1]["role"], "assistant");
        assert_eq!(json[1]["content"], "Start with ");
    }

    #[test]
    fn classifies_commands_and_messages() {
        assert!(matches!(classify("  /exit "), Line::Exit));
        assert!(matches!(classify("/quit"), Line::Exit));
        assert!(matches!(classify("/clear"), Line::Clear));
        assert!(matches!(classify("   "), Line::Skip));
        assert!(matches!(classify(" what next? "), Line::Message("what next?")));
    }
}
