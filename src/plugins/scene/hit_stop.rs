use bevy::prelude::*;

/// Short freeze of player control after a hit.
///
/// `trigger` arms the counter; every `advance` while armed freezes the frame and
/// counts up until the threshold is passed, giving `threshold` frozen frames.
#[derive(Resource, Debug, Clone)]
pub struct HitStop {
    counter: u32,
    threshold: u32,
    frozen: bool,
}

impl HitStop {
    pub fn new(threshold: u32) -> Self {
        Self {
            counter: 0,
            threshold,
            frozen: false,
        }
    }

    /// No effect while a freeze is already running.
    pub fn trigger(&mut self) {
        if self.counter == 0 {
            self.counter = 1;
        }
    }

    pub fn advance(&mut self) -> bool {
        if self.counter == 0 {
            self.frozen = false;
            return false;
        }

        self.frozen = true;
        self.counter += 1;
        if self.counter > self.threshold {
            self.counter = 0;
        }
        true
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

pub(super) fn advance_hit_stop(mut hit_stop: ResMut<HitStop>) {
    hit_stop.advance();
}

/// Run condition for systems that must pause during a hit-stop.
pub fn player_not_frozen(hit_stop: Option<Res<HitStop>>) -> bool {
    hit_stop.is_none_or(|h| !h.is_frozen())
}
