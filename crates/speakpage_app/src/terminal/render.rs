use speakpage_core::{AppViewModel, ControlStates, Pending};

const RULE: &str = "----------------------------------------";

/// Text form of the popup: output area, then the control strip.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    if !view.output.is_empty() {
        out.push_str(&view.output);
        out.push('\n');
    }
    out.push_str(&controls_line(&view.controls));
    out.push_str(&format!("  rate {:.1}", view.rate));
    if let Some(pending) = view.pending {
        out.push_str(&format!("  (waiting for {})", pending_label(pending)));
    }
    out
}

fn controls_line(controls: &ControlStates) -> String {
    [
        ("summarize", controls.summarize),
        ("read", controls.read),
        ("ask", controls.ask),
        ("translate", controls.translate),
        ("pause", controls.pause),
        ("resume", controls.resume),
        ("stop", controls.stop),
    ]
    .iter()
    .map(|(name, enabled)| {
        if *enabled {
            format!("[{name}]")
        } else {
            format!(" {name} ")
        }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

fn pending_label(pending: Pending) -> &'static str {
    match pending {
        Pending::Summary => "summary",
        Pending::Prompt => "answer",
        Pending::Translation => "translation",
        Pending::Reading => "speech",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use speakpage_core::{update, AppState, Msg};

    #[test]
    fn idle_view_shows_all_controls() {
        let view = AppState::new(1).view();
        assert_eq!(
            render(&view),
            format!(
                "{RULE}\n[summarize] [read] [ask] [translate] [pause] [resume] [stop]  rate 1.0"
            )
        );
    }

    #[test]
    fn pending_view_greys_out_content_controls() {
        let (state, _) = update(AppState::new(1), Msg::SummarizeClicked);
        let text = render(&state.view());
        assert!(text.contains("Analyzing and Summarizing..."));
        assert!(text.contains(" summarize   read   ask   translate  [pause]"));
        assert!(text.ends_with("(waiting for summary)"));
    }
}
