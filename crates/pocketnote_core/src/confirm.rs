//! Destructive-action confirmation per host platform.
//!
//! # Responsibility
//! - Describe the confirmation dialog each host platform expects.
//! - Turn the user's answer into a single affirm/decline decision.
//!
//! # Invariants
//! - Nothing destructive runs unless `confirm_destructive_action` returns
//!   `true`.
//! - Alert-style confirmation only affirms on the destructive action;
//!   dismissal or any other action declines.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Prompt shown before deleting a note.
pub const DELETE_NOTE_MESSAGE: &str = "Are you sure you want to delete this note?";
/// Alert title used on platforms with native alerts.
pub const DELETE_NOTE_TITLE: &str = "Delete Note";

/// Host environment the app shell is composed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    Web,
    Ios,
    Android,
}

impl HostPlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// Parses a platform name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, UnsupportedPlatform> {
        match value.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(UnsupportedPlatform(other.to_string())),
        }
    }

    /// Dialog shape this platform uses for destructive prompts.
    pub fn confirm_style(self) -> ConfirmStyle {
        match self {
            Self::Web => ConfirmStyle::Modal,
            Self::Ios | Self::Android => ConfirmStyle::Alert,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPlatform(pub String);

impl Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported host platform `{}`; expected web|ios|android",
            self.0
        )
    }
}

impl Error for UnsupportedPlatform {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStyle {
    /// Single OK/Cancel modal.
    Modal,
    /// Titled alert with explicit cancel and destructive buttons.
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertActionStyle {
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub label: String,
    pub style: AlertActionStyle,
}

/// Native alert description handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDialog {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl AlertDialog {
    /// Two-button delete alert: "Cancel" then "Delete".
    pub fn destructive(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            actions: vec![
                AlertAction {
                    label: "Cancel".to_string(),
                    style: AlertActionStyle::Cancel,
                },
                AlertAction {
                    label: "Delete".to_string(),
                    style: AlertActionStyle::Destructive,
                },
            ],
        }
    }
}

/// Renders dialogs on behalf of the core. Implemented by each host.
pub trait DialogPresenter {
    /// Shows an OK/Cancel modal. Returns `true` on OK.
    fn show_modal(&mut self, message: &str) -> bool;
    /// Shows an alert. Returns the index of the pressed action, or `None`
    /// when the alert was dismissed.
    fn show_alert(&mut self, alert: &AlertDialog) -> Option<usize>;
}

/// Single capability the editor asks before deleting.
pub trait ConfirmDestructiveAction {
    fn confirm_destructive_action(&mut self, message: &str) -> bool;
}

/// Modal-based confirmation (web hosts).
pub struct ModalConfirm<P> {
    presenter: P,
}

impl<P: DialogPresenter> ModalConfirm<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }
}

impl<P: DialogPresenter> ConfirmDestructiveAction for ModalConfirm<P> {
    fn confirm_destructive_action(&mut self, message: &str) -> bool {
        self.presenter.show_modal(message)
    }
}

/// Alert-based confirmation (native hosts).
pub struct AlertConfirm<P> {
    presenter: P,
    title: String,
}

impl<P: DialogPresenter> AlertConfirm<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            title: DELETE_NOTE_TITLE.to_string(),
        }
    }
}

impl<P: DialogPresenter> ConfirmDestructiveAction for AlertConfirm<P> {
    fn confirm_destructive_action(&mut self, message: &str) -> bool {
        let alert = AlertDialog::destructive(&self.title, message);
        let choice = self.presenter.show_alert(&alert);
        choice
            .and_then(|index| alert.actions.get(index))
            .is_some_and(|action| action.style == AlertActionStyle::Destructive)
    }
}

/// Picks the confirmation implementation for `platform`.
pub fn confirmer_for<P>(platform: HostPlatform, presenter: P) -> Box<dyn ConfirmDestructiveAction>
where
    P: DialogPresenter + 'static,
{
    match platform.confirm_style() {
        ConfirmStyle::Modal => Box::new(ModalConfirm::new(presenter)),
        ConfirmStyle::Alert => Box::new(AlertConfirm::new(presenter)),
    }
}

/// Confirmation whose answer was collected before the call.
///
/// Used by hosts that render the dialog themselves (FFI, `--yes` flags).
#[derive(Debug, Clone, Copy)]
pub struct PresetConfirm(pub bool);

impl ConfirmDestructiveAction for PresetConfirm {
    fn confirm_destructive_action(&mut self, _message: &str) -> bool {
        self.0
    }
}
