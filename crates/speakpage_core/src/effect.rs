use crate::ActionRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand a request to the dispatcher.
    Dispatch(ActionRequest),
}
