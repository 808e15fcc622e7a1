//! Per-guest meal choice groups.

use shared::protocol::MealPreference;

/// One optional choice per guest, indexed by guest number starting at 1.
/// Selections hold an index into the configured meal options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealSlots {
    slots: Vec<Option<usize>>,
}

impl MealSlots {
    /// Drops every existing group and builds `guest_count` unselected ones.
    pub fn rebuild(&mut self, guest_count: u32) {
        self.slots = vec![None; guest_count as usize];
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns false when the guest has no group.
    pub fn select(&mut self, guest: u32, option: usize) -> bool {
        match guest
            .checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx as usize))
        {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    pub fn selection(&self, guest: u32) -> Option<usize> {
        let idx = guest.checked_sub(1)? as usize;
        self.slots.get(idx).copied().flatten()
    }

    /// First guest in `1..=guest_count` without a selection.
    pub fn first_missing(&self, guest_count: u32) -> Option<u32> {
        (1..=guest_count).find(|guest| self.selection(*guest).is_none())
    }

    pub fn preferences(&self, guest_count: u32, options: &[String]) -> Vec<MealPreference> {
        (1..=guest_count)
            .map(|guest| MealPreference {
                guest,
                option: self
                    .selection(guest)
                    .and_then(|idx| options.get(idx))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealChoiceView {
    pub id: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealGroupView {
    pub guest: u32,
    pub name: String,
    pub title: String,
    pub choices: Vec<MealChoiceView>,
}

pub fn group_name(guest: u32) -> String {
    format!("meal-guest-{guest}")
}

pub fn choice_id(guest: u32, option: &str) -> String {
    format!("meal-guest-{guest}-{}", option.to_lowercase())
}

/// Projects the slots into radio groups, guests ascending and options in
/// declaration order.
pub fn meal_groups(slots: &MealSlots, options: &[String]) -> Vec<MealGroupView> {
    (1..=slots.len() as u32)
        .map(|guest| {
            let selected = slots.selection(guest);
            MealGroupView {
                guest,
                name: group_name(guest),
                title: format!("Guest {guest} Meal Preference"),
                choices: options
                    .iter()
                    .enumerate()
                    .map(|(idx, option)| MealChoiceView {
                        id: choice_id(guest, option),
                        value: option.clone(),
                        label: option.clone(),
                        checked: selected == Some(idx),
                        required: true,
                    })
                    .collect(),
            }
        })
        .collect()
}
