//! Native browser confirmation dialogs.

/// Ask the user to confirm a destructive action. Returns `false` when the
/// dialog is dismissed or unavailable (SSR), so the action never runs
/// without an explicit yes.
#[must_use]
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}
