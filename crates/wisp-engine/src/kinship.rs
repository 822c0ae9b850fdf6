//! Kinship state: interaction recording and score reads.
//!
//! The curve itself lives in wisp-kinship; this module only maintains the
//! per-wisp interaction history it is evaluated over.

use tracing::debug;

use wisp_core::constants::KINSHIP_STREAK_WINDOW_SECS;
use wisp_core::error::{KinshipError, WispError};
use wisp_core::types::{WispId, WispStatus};

use crate::engine::WispEngine;

impl WispEngine {
    /// Record an interaction with a claimed wisp.
    ///
    /// Increments the lifetime counter and extends the streak when the gap
    /// since the previous interaction fits the streak window; otherwise the
    /// streak restarts at one.
    ///
    /// # Errors
    ///
    /// - [`KinshipError::NotClaimed`]
    pub fn interact(&mut self, id: WispId) -> Result<(), WispError> {
        let now = self.clock.now_secs();
        let wisp = self.store.wisp_mut(id)?;
        if wisp.status != WispStatus::Claimed {
            return Err(KinshipError::NotClaimed(wisp.status).into());
        }
        let gap = now.saturating_sub(wisp.last_interaction);
        wisp.streak = if gap <= KINSHIP_STREAK_WINDOW_SECS {
            wisp.streak + 1
        } else {
            1
        };
        wisp.interaction_count += 1;
        wisp.last_interaction = now;
        debug!(
            wisp = %id,
            count = wisp.interaction_count,
            streak = wisp.streak,
            "interaction recorded"
        );
        Ok(())
    }

    /// Current kinship score of a claimed wisp. Pure read.
    ///
    /// # Errors
    ///
    /// - [`KinshipError::NotClaimed`]
    pub fn calculate_kinship(&self, id: WispId) -> Result<u64, WispError> {
        let wisp = self.store.wisp(id)?;
        if wisp.status != WispStatus::Claimed {
            return Err(KinshipError::NotClaimed(wisp.status).into());
        }
        let idle = self.clock.now_secs().saturating_sub(wisp.last_interaction);
        Ok(self
            .curve
            .score(wisp.interaction_count, wisp.streak, idle))
    }
}
