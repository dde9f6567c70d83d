//! Time-phase derivation and schedule validation.
//!
//! Phases hold no state of their own: every query recomputes the phase from
//! the immutable schedule and the ledger timestamp.

use crate::errors::Error;
use crate::types::{Period, Phase, Schedule, ScheduleBounds};

const MINUTE: u64 = 60;
const DAY: u64 = 86_400;

pub const MIN_REGISTRATION_PERIOD: u64 = 5 * MINUTE;
pub const MAX_REGISTRATION_PERIOD: u64 = 30 * DAY;
pub const MIN_GAME_PERIOD: u64 = 5 * MINUTE;
pub const MAX_GAME_PERIOD: u64 = 180 * DAY;
pub const MIN_SUBMISSION_PERIOD: u64 = 5 * MINUTE;
pub const MAX_SUBMISSION_PERIOD: u64 = 30 * DAY;

impl ScheduleBounds {
    pub fn default_bounds() -> ScheduleBounds {
        ScheduleBounds {
            min_registration_period: MIN_REGISTRATION_PERIOD,
            max_registration_period: MAX_REGISTRATION_PERIOD,
            min_game_period: MIN_GAME_PERIOD,
            max_game_period: MAX_GAME_PERIOD,
            min_submission_period: MIN_SUBMISSION_PERIOD,
            max_submission_period: MAX_SUBMISSION_PERIOD,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.min_registration_period <= self.max_registration_period
            && self.min_game_period <= self.max_game_period
            && self.min_submission_period <= self.max_submission_period
            && self.min_game_period > 0
    }
}

fn duration(period: &Period) -> Result<u64, Error> {
    if period.end <= period.start {
        return Err(Error::InvalidPeriod);
    }
    Ok(period.end - period.start)
}

pub fn validate(schedule: &Schedule, bounds: &ScheduleBounds) -> Result<(), Error> {
    let game_length = duration(&schedule.game)?;

    if let Some(registration) = &schedule.registration {
        if registration.start == 0 {
            return Err(Error::InvalidPeriod);
        }
        let registration_length = duration(registration)?;
        if registration.end > schedule.game.start {
            return Err(Error::RegistrationAfterGameStart);
        }
        if registration_length < bounds.min_registration_period
            || registration_length > bounds.max_registration_period
        {
            return Err(Error::RegistrationPeriodOutOfBounds);
        }
    }

    if game_length < bounds.min_game_period || game_length > bounds.max_game_period {
        return Err(Error::GamePeriodOutOfBounds);
    }

    if schedule.submission_duration < bounds.min_submission_period
        || schedule.submission_duration > bounds.max_submission_period
    {
        return Err(Error::SubmissionPeriodOutOfBounds);
    }

    Ok(())
}

pub fn submission_end(schedule: &Schedule) -> u64 {
    schedule
        .game
        .end
        .saturating_add(schedule.submission_duration)
}

/// Open tournaments (no registration period) accept entries until the game ends.
pub fn is_registration_open(schedule: &Schedule, now: u64) -> bool {
    match &schedule.registration {
        Some(registration) => now >= registration.start && now < registration.end,
        None => now < schedule.game.end,
    }
}

pub fn current_phase(schedule: &Schedule, now: u64) -> Phase {
    if now < schedule.game.start {
        if is_registration_open(schedule, now) {
            return Phase::RegistrationOpen;
        }
        return match &schedule.registration {
            Some(registration) if now >= registration.end => Phase::Staging,
            _ => Phase::Scheduled,
        };
    }
    if now < schedule.game.end {
        return Phase::Live;
    }
    if now < submission_end(schedule) {
        return Phase::Submission;
    }
    Phase::Finalized
}

pub fn assert_registration_open(schedule: &Schedule, now: u64) -> Result<(), Error> {
    if !is_registration_open(schedule, now) {
        return Err(Error::RegistrationClosed);
    }
    Ok(())
}

pub fn assert_game_active(schedule: &Schedule, now: u64) -> Result<(), Error> {
    if current_phase(schedule, now) != Phase::Live {
        return Err(Error::GameNotLive);
    }
    Ok(())
}

pub fn assert_submission_open(schedule: &Schedule, now: u64) -> Result<(), Error> {
    if current_phase(schedule, now) != Phase::Submission {
        return Err(Error::SubmissionClosed);
    }
    Ok(())
}

pub fn assert_finalized(schedule: &Schedule, now: u64) -> Result<(), Error> {
    if current_phase(schedule, now) != Phase::Finalized {
        return Err(Error::NotFinalized);
    }
    Ok(())
}

/// Bans are accepted from the start of registration until the game starts.
pub fn assert_ban_window(schedule: &Schedule, now: u64) -> Result<(), Error> {
    match current_phase(schedule, now) {
        Phase::RegistrationOpen | Phase::Staging => Ok(()),
        _ => Err(Error::BanWindowClosed),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn open_schedule() -> Schedule {
        Schedule {
            registration: None,
            game: Period {
                start: 1_000,
                end: 2_000,
            },
            submission_duration: 500,
        }
    }

    fn gated_schedule() -> Schedule {
        Schedule {
            registration: Some(Period {
                start: 1_000,
                end: 2_000,
            }),
            game: Period {
                start: 3_000,
                end: 4_000,
            },
            submission_duration: 600,
        }
    }

    #[test]
    fn test_phases_without_registration() {
        let schedule = open_schedule();
        assert_eq!(current_phase(&schedule, 0), Phase::RegistrationOpen);
        assert_eq!(current_phase(&schedule, 999), Phase::RegistrationOpen);
        assert_eq!(current_phase(&schedule, 1_000), Phase::Live);
        assert_eq!(current_phase(&schedule, 1_500), Phase::Live);
        assert_eq!(current_phase(&schedule, 2_000), Phase::Submission);
        assert_eq!(current_phase(&schedule, 2_400), Phase::Submission);
        assert_eq!(current_phase(&schedule, 2_500), Phase::Finalized);
        assert_eq!(current_phase(&schedule, 2_600), Phase::Finalized);
    }

    #[test]
    fn test_phases_with_registration() {
        let schedule = gated_schedule();
        assert_eq!(current_phase(&schedule, 999), Phase::Scheduled);
        assert_eq!(current_phase(&schedule, 1_000), Phase::RegistrationOpen);
        assert_eq!(current_phase(&schedule, 1_999), Phase::RegistrationOpen);
        assert_eq!(current_phase(&schedule, 2_000), Phase::Staging);
        assert_eq!(current_phase(&schedule, 3_000), Phase::Live);
        assert_eq!(current_phase(&schedule, 4_000), Phase::Submission);
        assert_eq!(current_phase(&schedule, 4_600), Phase::Finalized);
    }

    #[test]
    fn test_phase_is_monotonic() {
        for schedule in [open_schedule(), gated_schedule()].iter() {
            let mut previous = current_phase(schedule, 0);
            for now in (0..6_000u64).step_by(7) {
                let phase = current_phase(schedule, now);
                assert!(phase >= previous);
                previous = phase;
            }
            assert_eq!(previous, Phase::Finalized);
        }
    }

    #[test]
    fn test_registration_window() {
        let open = open_schedule();
        assert!(is_registration_open(&open, 1_500));
        assert!(!is_registration_open(&open, 2_000));

        let gated = gated_schedule();
        assert!(!is_registration_open(&gated, 999));
        assert!(is_registration_open(&gated, 1_000));
        assert!(!is_registration_open(&gated, 2_000));
        assert_eq!(assert_registration_open(&gated, 2_500), Err(Error::RegistrationClosed));
    }

    #[test]
    fn test_guards() {
        let schedule = gated_schedule();
        assert_eq!(assert_game_active(&schedule, 3_500), Ok(()));
        assert_eq!(assert_game_active(&schedule, 2_500), Err(Error::GameNotLive));
        assert_eq!(assert_submission_open(&schedule, 4_100), Ok(()));
        assert_eq!(assert_submission_open(&schedule, 3_999), Err(Error::SubmissionClosed));
        assert_eq!(assert_finalized(&schedule, 4_599), Err(Error::NotFinalized));
        assert_eq!(assert_finalized(&schedule, 4_600), Ok(()));
        assert_eq!(assert_ban_window(&schedule, 1_500), Ok(()));
        assert_eq!(assert_ban_window(&schedule, 2_500), Ok(()));
        assert_eq!(assert_ban_window(&schedule, 3_000), Err(Error::BanWindowClosed));
        assert_eq!(assert_ban_window(&schedule, 500), Err(Error::BanWindowClosed));
    }

    #[test]
    fn test_validate() {
        let bounds = ScheduleBounds::default_bounds();
        assert_eq!(validate(&open_schedule(), &bounds), Ok(()));
        assert_eq!(validate(&gated_schedule(), &bounds), Ok(()));

        let mut inverted = open_schedule();
        inverted.game = Period {
            start: 2_000,
            end: 1_000,
        };
        assert_eq!(validate(&inverted, &bounds), Err(Error::InvalidPeriod));

        let mut late_registration = gated_schedule();
        late_registration.registration = Some(Period {
            start: 1_000,
            end: 3_001,
        });
        assert_eq!(
            validate(&late_registration, &bounds),
            Err(Error::RegistrationAfterGameStart)
        );

        let mut short_registration = gated_schedule();
        short_registration.registration = Some(Period {
            start: 1_000,
            end: 1_100,
        });
        assert_eq!(
            validate(&short_registration, &bounds),
            Err(Error::RegistrationPeriodOutOfBounds)
        );

        let mut short_game = open_schedule();
        short_game.game.end = short_game.game.start + 10;
        assert_eq!(validate(&short_game, &bounds), Err(Error::GamePeriodOutOfBounds));

        let mut long_submission = open_schedule();
        long_submission.submission_duration = MAX_SUBMISSION_PERIOD + 1;
        assert_eq!(
            validate(&long_submission, &bounds),
            Err(Error::SubmissionPeriodOutOfBounds)
        );

        let mut zero_start = gated_schedule();
        zero_start.registration = Some(Period { start: 0, end: 900 });
        assert_eq!(validate(&zero_start, &bounds), Err(Error::InvalidPeriod));
    }
}
