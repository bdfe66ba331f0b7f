use crate::model::{Person, Roster, Slot};

/// Candidats pour `slot`, du plus prioritaire au moins prioritaire.
///
/// Sont écartés ceux qui ont atteint leur plafond dans la catégorie et ceux
/// qui ont une date bloquée dans le créneau. Le tri se fait sur
/// `(nombre de créneaux de la catégorie, dernière assignation, ordre d'équipe)`.
pub fn rank<'a>(roster: &'a Roster, slot: &Slot) -> Vec<&'a Person> {
    let mut eligible: Vec<(usize, &Person)> = roster
        .people()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.has_capacity(slot.category))
        .filter(|(_, p)| p.is_available(slot.start, slot.end))
        .collect();

    eligible.sort_by_key(|(pos, p)| (p.count(slot.category), p.last_assigned(), *pos));
    eligible.into_iter().map(|(_, p)| p).collect()
}
