/// All possible actions in the viewer (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // Scrolling
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    PageUp,
    PageDown,

    // Display toggles
    ToggleWrap,
    ToggleErrorsOnly,

    // Help overlay
    ToggleHelp,
    CloseHelp,

    // Terminal resized to (width, height)
    Resize(u16, u16),

    Quit,
}
