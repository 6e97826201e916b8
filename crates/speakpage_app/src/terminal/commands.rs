//! Text commands typed into the terminal popup.
use speakpage_core::Msg;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Messages to feed through `update`, in order.
    Messages(Vec<Msg>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` is not a speech rate")]
    InvalidRate(String),
}

pub const HELP: &str = "\
commands:
  summarize            summarize the page
  read [rate]          read the page aloud (rate 0.1 to 10, default 1)
  ask <question>       ask the AI about the page
  translate [lang]     translate the page (default en)
  rate <rate>          change the speech rate
  pause | resume | stop
  help | quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msgs = match word.to_ascii_lowercase().as_str() {
        "" => Vec::new(),
        "summarize" | "summary" => vec![Msg::SummarizeClicked],
        "read" if rest.is_empty() => vec![Msg::ReadClicked],
        "read" => vec![Msg::RateChanged(parse_rate(rest)?), Msg::ReadClicked],
        "rate" => vec![Msg::RateChanged(parse_rate(rest)?)],
        "ask" => vec![
            Msg::PromptInputChanged(rest.to_string()),
            Msg::PromptClicked,
        ],
        "translate" => vec![Msg::TranslateClicked {
            target_language: (!rest.is_empty()).then(|| rest.to_string()),
        }],
        "pause" => vec![Msg::PauseClicked],
        "resume" => vec![Msg::ResumeClicked],
        "stop" => vec![Msg::StopClicked],
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Command::Messages(msgs))
}

fn parse_rate(text: &str) -> Result<f32, CommandError> {
    text.parse::<f32>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or_else(|| CommandError::InvalidRate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn read_with_rate_sets_rate_first() {
        assert_eq!(
            parse_command("read 1.5"),
            Ok(Command::Messages(vec![
                Msg::RateChanged(1.5),
                Msg::ReadClicked
            ]))
        );
        assert_eq!(
            parse_command("READ"),
            Ok(Command::Messages(vec![Msg::ReadClicked]))
        );
    }

    #[test]
    fn ask_keeps_the_whole_question() {
        assert_eq!(
            parse_command("ask  who built   it? "),
            Ok(Command::Messages(vec![
                Msg::PromptInputChanged("who built   it?".into()),
                Msg::PromptClicked
            ]))
        );
    }

    #[test]
    fn translate_language_is_optional() {
        assert_eq!(
            parse_command("translate"),
            Ok(Command::Messages(vec![Msg::TranslateClicked {
                target_language: None
            }]))
        );
        assert_eq!(
            parse_command("translate es"),
            Ok(Command::Messages(vec![Msg::TranslateClicked {
                target_language: Some("es".into())
            }]))
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(
            parse_command("read fast"),
            Err(CommandError::InvalidRate("fast".into()))
        );
        assert_eq!(
            parse_command("rate -1"),
            Err(CommandError::InvalidRate("-1".into()))
        );
    }

    #[test]
    fn blank_line_and_meta_commands() {
        assert_eq!(parse_command("   "), Ok(Command::Messages(Vec::new())));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("?"), Ok(Command::Help));
    }
}
