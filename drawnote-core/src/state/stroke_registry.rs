//! # Strokes
//!
//! Append-only list of stroke slots and their undo state. A slot's index is always its position in
//! the list: slots are only ever appended, and only [`StrokeRegistry::clear`] removes them.

use crate::{host::StrokeHost, Color, Point};

pub struct StrokeSlot<Handle> {
    pub index: usize,
    /// Color baked into the slot's material when it was created.
    pub color: Color,
    /// Last anchor position handed to the host, or None if never extended.
    pub position: Option<Point>,
    /// Visual owned by the host. Held only to issue lifecycle calls.
    handle: Handle,
}
impl<Handle> StrokeSlot<Handle> {
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    #[error("stroke limit of {limit} reached")]
    CapacityExhausted { limit: usize },
}

/// Name given to a freshly spawned visual, by the registry length at creation time.
#[must_use]
pub fn stroke_name(index: usize) -> String {
    format!("NewDrawTarget({index})")
}

pub struct StrokeRegistry<Handle> {
    strokes: Vec<StrokeSlot<Handle>>,
    /// Flags to determine which strokes are active/not "Undone"
    strokes_active: bitvec::vec::BitVec,
    /// Hard cap on the number of slots, if any.
    limit: Option<usize>,
}
impl<Handle> Default for StrokeRegistry<Handle> {
    fn default() -> Self {
        Self::with_limit(None)
    }
}
// Public methods for readers
impl<Handle> StrokeRegistry<Handle> {
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            strokes: Vec::new(),
            strokes_active: bitvec::vec::BitVec::new(),
            limit,
        }
    }
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
    /// Get a slot, whether or not it has been undone.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StrokeSlot<Handle>> {
        self.strokes.get(index)
    }
    /// Is the slot at `index` present and not undone?
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.strokes_active.get(index).is_some_and(|active| *active)
    }
    pub fn iter(&self) -> impl Iterator<Item = &StrokeSlot<Handle>> + '_ {
        self.strokes.iter()
    }
    pub fn iter_active(&self) -> impl Iterator<Item = &StrokeSlot<Handle>> + '_ {
        self.strokes_active
            .iter_ones()
            .map_while(|index| self.strokes.get(index))
    }
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.strokes_active.count_ones()
    }
}
// Methods for the session, which go through the host.
impl<Handle> StrokeRegistry<Handle> {
    /// Fetch the slot at `index`, first appending fresh slots of `color` until it exists.
    ///
    /// Fails without creating anything if `index` is beyond the registry's limit.
    pub fn ensure_slot<H>(
        &mut self,
        index: usize,
        color: Color,
        host: &mut H,
    ) -> Result<&StrokeSlot<Handle>, RegistryError>
    where
        H: StrokeHost<Handle = Handle>,
    {
        if let Some(limit) = self.limit {
            if index >= limit {
                return Err(RegistryError::CapacityExhausted { limit });
            }
        }
        while self.strokes.len() <= index {
            let new_index = self.strokes.len();
            let handle = host.spawn_stroke(&stroke_name(new_index), color);
            log::debug!("created stroke slot {new_index} with color {color}");
            self.strokes.push(StrokeSlot {
                index: new_index,
                color,
                position: None,
                handle,
            });
            // Initially active.
            self.strokes_active.push(true);
        }
        Ok(&self.strokes[index])
    }
    /// Move the slot's anchor to `point`. Returns false if there is no such slot.
    pub fn extend<H>(&mut self, index: usize, point: Point, host: &mut H) -> bool
    where
        H: StrokeHost<Handle = Handle>,
    {
        let Some(slot) = self.strokes.get_mut(index) else {
            return false;
        };
        host.move_stroke(&slot.handle, point);
        slot.position = Some(point);
        true
    }
    /// Undo the highest-index slot that is still active. Only one slot is touched.
    ///
    /// Returns false if every slot was already inactive.
    pub fn deactivate_most_recent_active<H>(&mut self, host: &mut H) -> bool
    where
        H: StrokeHost<Handle = Handle>,
    {
        let Some(index) = self.strokes_active.last_one() else {
            return false;
        };
        self.strokes_active.set(index, false);
        host.set_stroke_active(&self.strokes[index].handle, false);
        log::debug!("deactivated stroke slot {index}");
        true
    }
    /// Release every visual and forget all slots.
    pub fn clear<H>(&mut self, host: &mut H)
    where
        H: StrokeHost<Handle = Handle>,
    {
        for slot in self.strokes.drain(..) {
            host.release_stroke(slot.handle);
        }
        self.strokes_active.clear();
    }
}
