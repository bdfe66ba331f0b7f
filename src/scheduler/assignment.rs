use super::types::SchedError;
use super::eligibility::rank;
use crate::model::{Roster, Slot};

/// Assigne chaque créneau, dans l'ordre reçu, au premier candidat classé.
///
/// Tout ou rien : si un créneau n'a aucun candidat, `roster` n'est pas
/// modifié et aucun créneau n'est renvoyé.
pub fn assign(roster: &mut Roster, slots: Vec<Slot>) -> Result<Vec<Slot>, SchedError> {
    let mut work = roster.clone();
    let mut done = Vec::with_capacity(slots.len());

    for mut slot in slots {
        let chosen = rank(&work, &slot)
            .first()
            .map(|p| p.id.clone())
            .ok_or(SchedError::NoEligiblePerson {
                category: slot.category,
                start: slot.start,
                end: slot.end,
            })?;

        work.record_assignment(&chosen, &slot)?;
        trace_event!(
            debug,
            person = chosen.as_str(),
            category = %slot.category,
            start = %slot.start,
            end = %slot.end,
            "slot assigned"
        );
        slot.assigned = Some(chosen);
        done.push(slot);
    }

    *roster = work;
    Ok(done)
}
