use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// One gravity step is due.
    Tick,
    /// State changed since the last frame.
    Render,
    Crossterm(CrosstermEvent),
}
