use crate::error::ShadingError;

use super::Texture2D;

/// Bindless texture table.
///
/// Indices are stable for the lifetime of a texture. Released slots are reused
/// by later inserts, so a stale index may resolve to a different texture; the
/// host is responsible for not drawing with stale indices.
#[derive(Debug, Default, Clone)]
pub struct DescriptorTable {
    slots: Vec<Option<Texture2D>>,
    free: Vec<u32>,
}

impl DescriptorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `texture` resident and returns its shader-visible index.
    pub fn insert(&mut self, texture: Texture2D) -> u32 {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(texture);
            log::trace!("descriptor table: reused slot {index}");
            return index;
        }
        let index = self.slots.len() as u32;
        self.slots.push(Some(texture));
        log::trace!("descriptor table: new slot {index}");
        index
    }

    /// Evicts the texture at `index`, returning it.
    pub fn release(&mut self, index: u32) -> Result<Texture2D, ShadingError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(ShadingError::DescriptorOutOfRange { index, len })?;
        let texture = slot.take().ok_or(ShadingError::DescriptorNotResident { index })?;
        self.free.push(index);
        Ok(texture)
    }

    /// Resolves a shader-supplied index.
    pub fn get(&self, index: u32) -> Result<&Texture2D, ShadingError> {
        match self.slots.get(index as usize) {
            Some(Some(texture)) => Ok(texture),
            Some(None) => Err(ShadingError::DescriptorNotResident { index }),
            None => Err(ShadingError::DescriptorOutOfRange {
                index,
                len: self.slots.len(),
            }),
        }
    }

    /// Number of slots, resident or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn resident_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Resident textures with their indices, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Texture2D)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (i as u32, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn iter_skips_released_slots() {
        let mut table = DescriptorTable::new();
        table.insert(Texture2D::solid(Color::WHITE));
        let hole = table.insert(Texture2D::solid(Color::BLACK));
        table.insert(Texture2D::solid(Color::WHITE));
        table.release(hole).unwrap();
        let indices: Vec<u32> = table.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn insert_hands_out_sequential_indices() {
        let mut table = DescriptorTable::new();
        assert_eq!(table.insert(Texture2D::solid(Color::WHITE)), 0);
        assert_eq!(table.insert(Texture2D::solid(Color::BLACK)), 1);
        assert_eq!(table.get(1).unwrap().load(0, 0), Color::BLACK);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut table = DescriptorTable::new();
        table.insert(Texture2D::solid(Color::WHITE));
        assert_eq!(
            table.get(5).unwrap_err(),
            ShadingError::DescriptorOutOfRange { index: 5, len: 1 }
        );
    }

    #[test]
    fn released_slot_is_not_resident_until_reused() {
        let mut table = DescriptorTable::new();
        let a = table.insert(Texture2D::solid(Color::WHITE));
        table.insert(Texture2D::solid(Color::BLACK));
        table.release(a).unwrap();
        assert_eq!(table.get(a).unwrap_err(), ShadingError::DescriptorNotResident { index: a });
        assert_eq!(table.resident_count(), 1);
        assert_eq!(table.release(a).unwrap_err(), ShadingError::DescriptorNotResident { index: a });

        let reused = table.insert(Texture2D::solid(Color::grey(0.5)));
        assert_eq!(reused, a);
        assert_eq!(table.len(), 2);
    }
}
