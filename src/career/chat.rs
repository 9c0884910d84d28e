// SPDX-License-Identifier: MIT

//! Line-oriented chat front-end

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::render::run_and_render;
use super::workflow::{Pipeline, WorkflowInput};

const PROMPT: &str = "> ";

/// Run one workflow per input line until `exit`, `quit` or end of input.
///
/// Each line is also used as the follow-up question.
pub async fn chat_loop<R, W>(
    pipeline: &Pipeline,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(b"Career Workflow Assistant. Type 'exit' to quit.\n").await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }

        let input = WorkflowInput {
            user_text: text.to_string(),
            followup_question: text.to_string(),
        };
        let reply = run_and_render(pipeline, input).await;
        writer.write_all(format!("{}\n\n", reply).as_bytes()).await?;
    }
    writer.flush().await
}
