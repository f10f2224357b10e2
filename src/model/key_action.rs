//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to StripAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripAction {
    // Paging
    /// Page back to the previous set of items. Default: h/←
    Prev,
    /// Page forward to the next set of items. Default: l/→
    Next,
    /// Jump so that the item at this index becomes the leading edge. Default: 0-9
    JumpTo(usize),

    // Free scrolling
    /// Scroll left by a small step, like a wheel tick. Default: Shift+h/Shift+←
    NudgeLeft,
    /// Scroll right by a small step, like a wheel tick. Default: Shift+l/Shift+→
    NudgeRight,

    // Application
    /// Force an immediate re-measurement of the strip. Default: r
    Refresh,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl StripAction {
    /// Whether this action moves the strip (as opposed to app-level actions).
    pub fn is_navigation(&self) -> bool {
        !matches!(self, Self::Refresh | Self::Quit)
    }
}
