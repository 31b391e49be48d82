//! Transition policy: who may move a booking into which status.

use crate::domain::foundation::{Actor, StateMachine};

use super::{Booking, BookingError, BookingStatus};

/// Validates a requested status change against the actor and the booking's
/// current state.
///
/// Checks, in order:
/// 1. the actor is a participant of this booking,
/// 2. the actor's role permits the target status
///    (sitter: confirm/complete/cancel; owner: cancel only),
/// 3. the transition table allows `current -> target`
///    (terminal states allow nothing).
///
/// # Errors
///
/// - `NotParticipant` if the actor is neither the booking's owner nor sitter
/// - `ForbiddenTransition` for role or state-table violations
pub fn authorize_transition(
    booking: &Booking,
    actor: Actor,
    target: BookingStatus,
) -> Result<(), BookingError> {
    match actor {
        Actor::Owner(owner_id) => {
            if owner_id != booking.owner_id() {
                return Err(BookingError::NotParticipant);
            }
            if target != BookingStatus::Canceled {
                return Err(BookingError::forbidden_transition(
                    "Owner can only cancel the booking",
                ));
            }
        }
        Actor::Sitter(sitter_id) => {
            if sitter_id != booking.sitter_id() {
                return Err(BookingError::NotParticipant);
            }
            if !matches!(
                target,
                BookingStatus::Confirmed | BookingStatus::Completed | BookingStatus::Canceled
            ) {
                return Err(BookingError::forbidden_transition(
                    "Sitter cannot set this status",
                ));
            }
        }
    }

    if !booking.status().can_transition_to(&target) {
        return Err(BookingError::forbidden_transition(format!(
            "Cannot transition booking from {} to {}",
            booking.status(),
            target
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{
        BookingId, OwnerId, PetId, PriceQuote, SitterId, TimeRange, Timestamp,
    };
    use crate::domain::booking::ServiceType;

    fn booking_in(status: BookingStatus) -> Booking {
        Booking::new(
            BookingId::new(),
            OwnerId::new(),
            SitterId::new(),
            vec![PetId::new()],
            ServiceType::HouseSitting,
            TimeRange::new(
                Timestamp::from_unix_secs(0),
                Timestamp::from_unix_secs(3600),
            )
            .unwrap(),
            PriceQuote::zero(),
            status,
        )
        .unwrap()
    }

    #[test]
    fn sitter_can_confirm_requested_booking() {
        let booking = booking_in(BookingStatus::Requested);
        let actor = Actor::Sitter(booking.sitter_id());
        assert!(authorize_transition(&booking, actor, BookingStatus::Confirmed).is_ok());
    }

    #[test]
    fn sitter_can_complete_confirmed_booking() {
        let booking = booking_in(BookingStatus::Confirmed);
        let actor = Actor::Sitter(booking.sitter_id());
        assert!(authorize_transition(&booking, actor, BookingStatus::Completed).is_ok());
    }

    #[test]
    fn sitter_cannot_complete_requested_booking() {
        let booking = booking_in(BookingStatus::Requested);
        let actor = Actor::Sitter(booking.sitter_id());
        let result = authorize_transition(&booking, actor, BookingStatus::Completed);
        assert!(matches!(result, Err(BookingError::ForbiddenTransition(_))));
    }

    #[test]
    fn owner_can_only_cancel() {
        let booking = booking_in(BookingStatus::Requested);
        let actor = Actor::Owner(booking.owner_id());
        assert!(authorize_transition(&booking, actor, BookingStatus::Canceled).is_ok());

        let result = authorize_transition(&booking, actor, BookingStatus::Confirmed);
        assert!(matches!(result, Err(BookingError::ForbiddenTransition(_))));
    }

    #[test]
    fn either_party_can_cancel_confirmed_booking() {
        let booking = booking_in(BookingStatus::Confirmed);
        let owner = Actor::Owner(booking.owner_id());
        let sitter = Actor::Sitter(booking.sitter_id());
        assert!(authorize_transition(&booking, owner, BookingStatus::Canceled).is_ok());
        assert!(authorize_transition(&booking, sitter, BookingStatus::Canceled).is_ok());
    }

    #[test]
    fn unrelated_actor_is_not_participant() {
        let booking = booking_in(BookingStatus::Requested);
        let stranger_owner = Actor::Owner(OwnerId::new());
        let stranger_sitter = Actor::Sitter(SitterId::new());
        assert_eq!(
            authorize_transition(&booking, stranger_owner, BookingStatus::Canceled),
            Err(BookingError::NotParticipant)
        );
        assert_eq!(
            authorize_transition(&booking, stranger_sitter, BookingStatus::Canceled),
            Err(BookingError::NotParticipant)
        );
    }

    #[test]
    fn terminal_states_reject_all_transitions() {
        for terminal in [BookingStatus::Completed, BookingStatus::Canceled] {
            let booking = booking_in(terminal);
            let sitter = Actor::Sitter(booking.sitter_id());
            let owner = Actor::Owner(booking.owner_id());
            for target in [
                BookingStatus::Confirmed,
                BookingStatus::Completed,
                BookingStatus::Canceled,
            ] {
                assert!(
                    matches!(
                        authorize_transition(&booking, sitter, target),
                        Err(BookingError::ForbiddenTransition(_))
                    ),
                    "sitter {:?} -> {:?} should be forbidden",
                    terminal,
                    target
                );
            }
            assert!(matches!(
                authorize_transition(&booking, owner, BookingStatus::Canceled),
                Err(BookingError::ForbiddenTransition(_))
            ));
        }
    }
}
