//! Screen-transition contract consumed from the host navigation stack.
//!
//! # Responsibility
//! - Name the two screens and their typed parameters.
//! - Provide a plain stack navigator for hosts without their own.

use crate::model::note::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenName {
    List,
    Editor,
}

impl ScreenName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Editor => "editor",
        }
    }
}

/// Editor parameters. `None` opens the editor in create mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorParams {
    pub note: Option<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Editor(EditorParams),
}

impl Route {
    pub fn screen(&self) -> ScreenName {
        match self {
            Self::List => ScreenName::List,
            Self::Editor(_) => ScreenName::Editor,
        }
    }
}

/// Header button a screen asks the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    NewNote,
    DeleteNote,
}

/// Per-screen chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenOptions {
    pub title: String,
    pub header_action: Option<HeaderAction>,
}

pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
    /// Pops the top screen. Returns `false` when already at the root.
    fn go_back(&mut self) -> bool;
    /// Applies chrome to the screen currently on top.
    fn set_screen_options(&mut self, options: ScreenOptions);
    fn current(&self) -> Option<&Route>;
}

/// Vector-backed navigation stack.
#[derive(Debug, Default)]
pub struct StackNavigator {
    stack: Vec<(Route, Option<ScreenOptions>)>,
}

impl StackNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_options(&self) -> Option<&ScreenOptions> {
        self.stack.last().and_then(|(_, options)| options.as_ref())
    }
}

impl Navigator for StackNavigator {
    fn navigate_to(&mut self, route: Route) {
        self.stack.push((route, None));
    }

    fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    fn set_screen_options(&mut self, options: ScreenOptions) {
        if let Some((_, current)) = self.stack.last_mut() {
            *current = Some(options);
        }
    }

    fn current(&self) -> Option<&Route> {
        self.stack.last().map(|(route, _)| route)
    }
}
