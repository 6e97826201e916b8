#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User clicked Summarize Page.
    SummarizeClicked,
    /// User clicked Read Aloud.
    ReadClicked,
    /// User edited the question box.
    PromptInputChanged(String),
    /// User clicked Get Answer.
    PromptClicked,
    /// User clicked Translate, optionally naming a target language.
    TranslateClicked { target_language: Option<String> },
    /// User moved the speech rate slider.
    RateChanged(f32),
    PauseClicked,
    ResumeClicked,
    StopClicked,
    /// The dispatcher emitted an event for this popup's tab.
    EventReceived(crate::ResponseEvent),
    /// The dispatcher refused a request (another one is still running).
    DispatchRejected(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
