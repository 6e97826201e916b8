use crate::{ActionRequest, AppState, Effect, Msg, Pending, RequestAction, ResponseEvent};

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a question for the AI.";

/// Pure update function: applies a message to state and returns any effects.
///
/// Content requests are only emitted while no other content request is
/// pending; the controls stay disabled until a terminal event arrives.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SummarizeClicked => start_content(
            &mut state,
            Pending::Summary,
            "Analyzing and Summarizing...",
            RequestAction::GetSummary,
        ),
        Msg::ReadClicked => {
            let rate = Some(state.rate());
            start_content(
                &mut state,
                Pending::Reading,
                "Starting Text-to-Speech...",
                RequestAction::StartReading { rate },
            )
        }
        Msg::PromptInputChanged(text) => {
            state.set_prompt_input(text);
            Vec::new()
        }
        Msg::PromptClicked => {
            let prompt = state.prompt_input().trim().to_string();
            if state.is_busy() {
                Vec::new()
            } else if prompt.is_empty() {
                state.set_output(EMPTY_PROMPT_MESSAGE);
                Vec::new()
            } else {
                start_content(
                    &mut state,
                    Pending::Prompt,
                    "Sending prompt to AI...",
                    RequestAction::MultimodalPrompt { prompt },
                )
            }
        }
        Msg::TranslateClicked { target_language } => {
            let target_language = target_language
                .map(|lang| lang.trim().to_string())
                .filter(|lang| !lang.is_empty());
            start_content(
                &mut state,
                Pending::Translation,
                "Translating...",
                RequestAction::Translate { target_language },
            )
        }
        Msg::RateChanged(rate) => {
            state.set_rate(rate);
            Vec::new()
        }
        Msg::PauseClicked => {
            state.set_output("Reading paused.");
            vec![dispatch(&state, RequestAction::PauseReading)]
        }
        Msg::ResumeClicked => {
            state.set_output("Reading resumed.");
            vec![dispatch(&state, RequestAction::ResumeReading)]
        }
        Msg::StopClicked => vec![dispatch(&state, RequestAction::StopReading)],
        Msg::EventReceived(event) => {
            apply_event(&mut state, event);
            Vec::new()
        }
        Msg::DispatchRejected(reason) => {
            state.finish();
            state.set_output(format!("Error: {reason}"));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_content(
    state: &mut AppState,
    pending: Pending,
    status: &str,
    action: RequestAction,
) -> Vec<Effect> {
    if state.is_busy() {
        return Vec::new();
    }
    state.begin(pending, status);
    vec![dispatch(state, action)]
}

fn dispatch(state: &AppState, action: RequestAction) -> Effect {
    Effect::Dispatch(ActionRequest::new(state.tab_id(), action))
}

fn apply_event(state: &mut AppState, event: ResponseEvent) {
    match event {
        ResponseEvent::SummaryResult { summary } => {
            state.set_output(format!("SUMMARY:\n{summary}"));
            state.finish();
        }
        ResponseEvent::PromptResult { answer } => {
            state.set_output(format!("AI RESPONSE:\n{answer}"));
            state.finish();
        }
        ResponseEvent::TranslationResult { translation } => {
            state.set_output(format!("TRANSLATION:\n{translation}"));
            state.finish();
        }
        ResponseEvent::ReadingStarted { message } => {
            state.set_output(message);
            state.finish();
        }
        ResponseEvent::ReadingFailed { message } => {
            state.set_output(format!("Error: {message}"));
            state.finish();
        }
        // Stop never answers a pending content request.
        ResponseEvent::ReadingFinished { message } => state.set_output(message),
    }
}
