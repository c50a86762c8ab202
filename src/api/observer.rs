use serde::{Deserialize, Serialize};

/// Form the popup subsystem should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupFormType {
    /// Add/edit/remove indicator form.
    Indicators,
    /// Title and name of a new flag.
    Flag,
}

/// Payload of the outbound `showPopup` signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupRequest {
    pub form_type: PopupFormType,
    /// Tool that requested the popup.
    pub tool: String,
}

/// Receiver of the two outbound toolbar signals.
///
/// Observers are notified synchronously, in registration order, after the
/// toolbar state has already been updated.
pub trait StockToolsObserver {
    fn id(&self) -> &str;
    fn on_show_popup(&mut self, request: &PopupRequest);
    fn on_deselect_button(&mut self, button: &str);
}
