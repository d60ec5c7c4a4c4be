//! No-repeat rotation through the photo and message catalogs.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, CatalogEntry, Message, Photo};
use crate::random::RandomSource;

/// Streak value at refresh time that swaps in the special message.
pub const SPECIAL_MESSAGE_STREAK: u32 = 17;

/// Result of one rotation draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a, T> {
    pub item: &'a T,
    /// Every entry had already been shown, so the draw came from the full
    /// catalog and the caller should start a new pass.
    pub new_pass: bool,
}

/// Draw uniformly among entries not yet shown; once everything has been
/// shown, draw uniformly from the whole catalog. `None` only for an empty
/// catalog.
pub fn next_item<'a, T: CatalogEntry>(
    shown: &BTreeSet<String>,
    catalog: &'a [T],
    rng: &mut dyn RandomSource,
) -> Option<Pick<'a, T>> {
    if catalog.is_empty() {
        return None;
    }

    let remaining: Vec<&T> = catalog
        .iter()
        .filter(|item| !shown.contains(item.id()))
        .collect();

    if remaining.is_empty() {
        let item = &catalog[rng.choose_index(catalog.len())];
        return Some(Pick {
            item,
            new_pass: true,
        });
    }

    let item = remaining[rng.choose_index(remaining.len())];
    Some(Pick {
        item,
        new_pass: false,
    })
}

pub fn next_photo<'a>(
    shown: &BTreeSet<String>,
    catalog: &'a [Photo],
    rng: &mut dyn RandomSource,
) -> Option<Pick<'a, Photo>> {
    next_item(shown, catalog, rng)
}

pub fn next_message<'a>(
    shown: &BTreeSet<String>,
    catalog: &'a [Message],
    rng: &mut dyn RandomSource,
) -> Option<Pick<'a, Message>> {
    next_item(shown, catalog, rng)
}

/// Record a pick in the shown-set, restarting the pass when needed.
pub fn record_shown<T: CatalogEntry>(shown: &mut BTreeSet<String>, pick: &Pick<'_, T>) {
    if pick.new_pass {
        shown.clear();
    }
    shown.insert(pick.item.id().to_string());
}

/// Message for a refresh at `streak`: the special message at the milestone,
/// otherwise the next message in rotation. The flag reports which one.
///
/// The random draw is skipped entirely for the special message, so the
/// shown-set is left untouched.
pub fn message_for_streak<'a>(
    streak: u32,
    shown: &mut BTreeSet<String>,
    catalog: &'a Catalog,
    rng: &mut dyn RandomSource,
) -> Option<(&'a Message, bool)> {
    if streak == SPECIAL_MESSAGE_STREAK {
        return Some((&catalog.special_message, true));
    }
    let pick = next_message(shown, &catalog.messages, rng)?;
    record_shown(shown, &pick);
    Some((pick.item, false))
}
