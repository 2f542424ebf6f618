use std::time::Duration;

use crate::state::Participant;

/// Frames shown before the winner is revealed.
pub const REVEAL_FRAMES: u32 = 30;
pub const INITIAL_FRAME_DELAY: Duration = Duration::from_millis(50);
/// Added to the delay of every frame past the slowdown point.
pub const FRAME_DELAY_STEP: Duration = Duration::from_millis(30);
// 70% of the frames run at full speed
const SLOWDOWN_AFTER: u32 = REVEAL_FRAMES * 7 / 10 + 1;

/// Delay awaited after `frame` (1-based). The last frame has none.
pub fn frame_delay(frame: u32) -> Option<Duration> {
    if frame == 0 || frame >= REVEAL_FRAMES {
        return None;
    }
    Some(INITIAL_FRAME_DELAY + FRAME_DELAY_STEP * frame.saturating_sub(SLOWDOWN_AFTER))
}

/// Cycles through `pool` for [`REVEAL_FRAMES`] frames, sleeping between them.
///
/// `show` gets every frame's participant. The loop holds the only pending
/// timer; the winner is sampled by the caller once it returns.
pub async fn run_reveal<F>(pool: &[Participant], mut show: F)
where
    F: FnMut(&Participant),
{
    if pool.is_empty() {
        return;
    }

    let mut index = 0;
    for frame in 1..=REVEAL_FRAMES {
        index = (index + 1) % pool.len();
        show(&pool[index]);

        if let Some(delay) = frame_delay(frame) {
            tokio::time::sleep(delay).await;
        }
    }
}
