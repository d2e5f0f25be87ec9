use crate::error::Rejection;
use crate::state::{Millis, PlayerId};

/// Rejects a kill credit that arrives less than `window_ms` after the last
/// accepted one. Recording the new timestamp is left to the caller, since the
/// modes record it at different points.
pub fn check_debounce(
    player: PlayerId,
    last_accepted: Option<Millis>,
    now: Millis,
    window_ms: u64,
) -> Result<(), Rejection> {
    let Some(last) = last_accepted else {
        return Ok(());
    };
    let elapsed_ms = now.since(last);
    if elapsed_ms < window_ms {
        return Err(Rejection::Debounced {
            player,
            elapsed_ms,
            window_ms,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_kill_is_never_debounced() {
        assert_eq!(check_debounce(PlayerId(1), None, Millis(5), 300), Ok(()));
    }

    #[test]
    fn window_is_exclusive_at_its_end() {
        let last = Some(Millis(1_000));

        assert!(check_debounce(PlayerId(1), last, Millis(1_299), 300).is_err());
        assert_eq!(check_debounce(PlayerId(1), last, Millis(1_300), 300), Ok(()));
    }
}
